//! Compile the exercise's GLSL shaders to SPIR-V.

use shaderc::{Compiler, ShaderKind};
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=shaders/");

    let out_dir = env::var("OUT_DIR").unwrap();
    let compiler = Compiler::new().expect("Failed to create shader compiler");

    for (file, kind) in [
        ("shader.vert", ShaderKind::Vertex),
        ("shader.frag", ShaderKind::Fragment),
    ] {
        let input = Path::new("shaders").join(file);
        let source = fs::read_to_string(&input)
            .unwrap_or_else(|e| panic!("Failed to read shader {}: {e}", input.display()));

        let artifact = compiler
            .compile_into_spirv(&source, kind, file, "main", None)
            .unwrap_or_else(|e| panic!("Failed to compile {}: {e}", input.display()));

        let output = Path::new(&out_dir).join(format!("{file}.spv"));
        fs::write(&output, bytemuck::cast_slice::<u32, u8>(artifact.as_binary()))
            .unwrap_or_else(|e| panic!("Failed to write {}: {e}", output.display()));
    }
}

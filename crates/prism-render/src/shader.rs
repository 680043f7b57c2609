//! SPIR-V shader loading.
//!
//! Shader bytecode is read from disk every time a pipeline is built, so a
//! swapchain rebuild picks up recompiled shaders. A missing file is fatal.

use ash::vk;
use prism_gpu::error::{GpuError, Result};
use std::path::Path;

const SPIRV_MAGIC: u32 = 0x0723_0203;

/// Read SPIR-V bytecode from a file.
pub fn load_spirv(path: &Path) -> Result<Vec<u32>> {
    let bytes = std::fs::read(path).map_err(|source| GpuError::ShaderLoad {
        path: path.to_path_buf(),
        source,
    })?;

    bytes_to_words(&bytes).map_err(|message| GpuError::ShaderInvalid {
        path: path.to_path_buf(),
        message,
    })
}

/// Create a shader module from SPIR-V words.
///
/// # Safety
/// The device must be valid.
pub unsafe fn create_shader_module(
    device: &ash::Device,
    code: &[u32],
) -> Result<vk::ShaderModule> {
    let create_info = vk::ShaderModuleCreateInfo::default().code(code);
    let module = unsafe { device.create_shader_module(&create_info, None)? };
    Ok(module)
}

/// Convert raw bytes to SPIR-V words, checking alignment and magic number.
fn bytes_to_words(bytes: &[u8]) -> std::result::Result<Vec<u32>, String> {
    if bytes.len() % 4 != 0 {
        return Err(format!("length {} is not a multiple of 4", bytes.len()));
    }

    let words: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    match words.first() {
        Some(&SPIRV_MAGIC) => Ok(words),
        Some(&other) => Err(format!("bad magic number {other:#010x}")),
        None => Err("file is empty".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unaligned_bytecode() {
        assert!(bytes_to_words(&[0x03, 0x02, 0x23]).is_err());
    }

    #[test]
    fn rejects_bad_magic() {
        let err = bytes_to_words(&[0xff, 0xff, 0xff, 0xff]).unwrap_err();
        assert!(err.contains("magic"));
    }

    #[test]
    fn rejects_empty_file() {
        assert!(bytes_to_words(&[]).is_err());
    }

    #[test]
    fn accepts_valid_spirv_header() {
        let mut bytes = SPIRV_MAGIC.to_le_bytes().to_vec();
        bytes.extend_from_slice(&42u32.to_le_bytes());
        let words = bytes_to_words(&bytes).unwrap();
        assert_eq!(words, vec![SPIRV_MAGIC, 42]);
    }
}

//! Frame pacing bookkeeping.
//!
//! The swapchain cycles a fixed number of frame slots round-robin while the
//! presentation engine hands out image indices in whatever order it likes.
//! `FramePacer` tracks which slot last submitted work against each image so
//! the swapchain knows exactly which fences to wait on. It is deliberately
//! free of Vulkan handles so the protocol can be tested on its own.

/// Number of frames that may be in flight at once. Independent of the
/// negotiated swapchain image count.
pub const FRAMES_IN_FLIGHT: usize = 2;

/// Round-robin frame slot cursor plus per-image slot stamps.
pub struct FramePacer {
    slot_count: usize,
    current: usize,
    entry_slot: Vec<Option<usize>>,
}

impl FramePacer {
    /// Create a pacer for `slot_count` frame slots and `entry_count`
    /// presentable images.
    pub fn new(slot_count: usize, entry_count: usize) -> Self {
        assert!(slot_count > 0);
        Self {
            slot_count,
            current: 0,
            entry_slot: vec![None; entry_count],
        }
    }

    /// The slot whose fence must be waited on before starting this frame.
    pub fn current_slot(&self) -> usize {
        self.current
    }

    /// Record that the current slot is about to submit against `entry`.
    ///
    /// Returns the slot whose fence must *also* be waited on first: the one
    /// that previously rendered to this image, if it was a different slot.
    /// The frame loop has already waited on the current slot's own fence, so
    /// a same-slot stamp needs no extra wait.
    pub fn stamp_entry(&mut self, entry: usize) -> Option<usize> {
        let previous = self.entry_slot[entry];
        self.entry_slot[entry] = Some(self.current);
        match previous {
            Some(slot) if slot != self.current => Some(slot),
            _ => None,
        }
    }

    /// Advance to the next frame slot.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.slot_count;
    }

    /// Forget all image stamps and resize for a rebuilt swapchain.
    ///
    /// The slot cursor is preserved: frame slots survive recreation.
    pub fn reset_entries(&mut self, entry_count: usize) {
        self.entry_slot = vec![None; entry_count];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_cycle_round_robin() {
        let mut pacer = FramePacer::new(2, 3);
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(pacer.current_slot());
            pacer.advance();
        }
        // Frame n waits on the slot used by frame n - FRAMES_IN_FLIGHT
        assert_eq!(seen, vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn fresh_entry_needs_no_extra_wait() {
        let mut pacer = FramePacer::new(2, 3);
        assert_eq!(pacer.stamp_entry(0), None);
    }

    #[test]
    fn same_slot_reuse_needs_no_extra_wait() {
        let mut pacer = FramePacer::new(2, 3);
        pacer.stamp_entry(1);
        // Two frames later the same slot comes around again
        pacer.advance();
        pacer.advance();
        assert_eq!(pacer.current_slot(), 0);
        assert_eq!(pacer.stamp_entry(1), None);
    }

    #[test]
    fn cross_slot_reuse_waits_on_previous_owner() {
        // More images than slots: image 0 can come back under a different slot
        let mut pacer = FramePacer::new(2, 3);
        pacer.stamp_entry(0);
        pacer.advance();
        // Slot 1 now reuses image 0, which slot 0 may still be rendering
        assert_eq!(pacer.stamp_entry(0), Some(0));
    }

    #[test]
    fn recreation_clears_stale_stamps() {
        let mut pacer = FramePacer::new(2, 3);
        pacer.stamp_entry(0);
        pacer.stamp_entry(2);
        pacer.advance();

        // Swapchain rebuilt with a different image count
        pacer.reset_entries(4);

        // No stale stamp survives; slot cursor is preserved
        assert_eq!(pacer.current_slot(), 1);
        for entry in 0..4 {
            assert_eq!(pacer.stamp_entry(entry), None);
            pacer.entry_slot[entry] = None;
        }
    }
}

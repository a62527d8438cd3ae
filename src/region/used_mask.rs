/// Per-pixel used/unused state for one detection run.
///
/// Every pixel starts unused. A growth pass claims pixels with its own
/// non-zero stamp; a pixel never goes back to unused. Stamps let a candidate
/// re-grow from its own seed (angle-halving refinement) over pixels it
/// already claimed, without releasing them to later seeds.
#[derive(Clone, Debug)]
pub struct UsedMask {
    width: usize,
    stamps: Vec<u32>,
    last_stamp: u32,
}

impl UsedMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            stamps: vec![0; width * height],
            last_stamp: 0,
        }
    }

    #[inline]
    pub fn is_used(&self, x: usize, y: usize) -> bool {
        self.stamps[y * self.width + x] != 0
    }

    pub fn used_count(&self) -> usize {
        self.stamps.iter().filter(|s| **s != 0).count()
    }

    #[inline]
    pub(super) fn stamp(&self, idx: usize) -> u32 {
        self.stamps[idx]
    }

    pub(super) fn fresh_stamp(&mut self) -> u32 {
        self.last_stamp += 1;
        self.last_stamp
    }

    #[inline]
    pub(super) fn claim(&mut self, idx: usize, stamp: u32) {
        debug_assert!(stamp != 0, "claim stamps must be non-zero");
        self.stamps[idx] = stamp;
    }
}

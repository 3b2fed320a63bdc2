use cubelit_blocks::BlockId;
use cubelit_geom::{CHUNK_SIZE, PLANE_AREA};

/// A surviving rectangle after merging, in plane cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlaneRect {
    pub u: usize,
    pub v: usize,
    pub width: usize,
    pub height: usize,
    pub block: BlockId,
    pub light: u16,
}

/// 32×32 working plane for one slice of one face direction.
///
/// Cells are indexed `v * 32 + u`. Block 0 means "no face here", either
/// because nothing qualified or because the cell was merged into a neighbour.
#[derive(Clone, Debug)]
pub struct PlaneScratch {
    pub(crate) block: [BlockId; PLANE_AREA],
    pub(crate) light: [u16; PLANE_AREA],
    pub(crate) width: [u8; PLANE_AREA],
    pub(crate) height: [u8; PLANE_AREA],
}

impl Default for PlaneScratch {
    fn default() -> Self {
        Self {
            block: [0; PLANE_AREA],
            light: [0; PLANE_AREA],
            width: [1; PLANE_AREA],
            height: [1; PLANE_AREA],
        }
    }
}

#[inline]
fn cell(u: usize, v: usize) -> usize {
    v * CHUNK_SIZE + u
}

impl PlaneScratch {
    pub fn reset(&mut self) {
        self.block.fill(0);
        self.light.fill(0);
        self.width.fill(1);
        self.height.fill(1);
    }

    #[inline]
    pub fn set(&mut self, u: usize, v: usize, block: BlockId, light: u16) {
        let i = cell(u, v);
        self.block[i] = block;
        self.light[i] = light;
        self.width[i] = 1;
        self.height[i] = 1;
    }

    /// Greedy run-length merge: first along u, then along v, each from the
    /// high index down. A cell folds into its lower neighbour when block,
    /// light word and the orthogonal run length all match.
    pub fn merge(&mut self) {
        for v in 0..CHUNK_SIZE {
            for u in (1..CHUNK_SIZE).rev() {
                let (hi, lo) = (cell(u, v), cell(u - 1, v));
                if self.block[hi] != 0
                    && self.block[hi] == self.block[lo]
                    && self.light[hi] == self.light[lo]
                    && self.height[hi] == self.height[lo]
                {
                    self.width[lo] += self.width[hi];
                    self.block[hi] = 0;
                }
            }
        }
        for u in 0..CHUNK_SIZE {
            for v in (1..CHUNK_SIZE).rev() {
                let (hi, lo) = (cell(u, v), cell(u, v - 1));
                if self.block[hi] != 0
                    && self.block[hi] == self.block[lo]
                    && self.light[hi] == self.light[lo]
                    && self.width[hi] == self.width[lo]
                {
                    self.height[lo] += self.height[hi];
                    self.block[hi] = 0;
                }
            }
        }
    }

    /// Rectangles still standing, in cell order.
    pub fn rects(&self) -> impl Iterator<Item = PlaneRect> + '_ {
        (0..PLANE_AREA).filter(|&i| self.block[i] != 0).map(move |i| PlaneRect {
            u: i % CHUNK_SIZE,
            v: i / CHUNK_SIZE,
            width: self.width[i] as usize,
            height: self.height[i] as usize,
            block: self.block[i],
            light: self.light[i],
        })
    }
}

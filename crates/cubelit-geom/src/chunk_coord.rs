use serde::{Deserialize, Serialize};

use crate::CHUNK_SIZE;

/// Chunk position in chunk units (world voxel position divided by 32).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// Chunk containing the world voxel `(wx, wy, wz)`.
    #[inline]
    pub const fn containing(wx: i32, wy: i32, wz: i32) -> Self {
        let s = CHUNK_SIZE as i32;
        Self {
            cx: wx.div_euclid(s),
            cy: wy.div_euclid(s),
            cz: wz.div_euclid(s),
        }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    /// World-space voxel position of this chunk's `(0, 0, 0)` corner.
    #[inline]
    pub fn origin(self) -> (i32, i32, i32) {
        let s = CHUNK_SIZE as i32;
        (self.cx * s, self.cy * s, self.cz * s)
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dy = i64::from(self.cy - other.cy);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dy * dy + dz * dz
    }

    /// The 27 coordinates of the 3×3×3 neighborhood centred on `self`, with
    /// the relative offset of each.
    pub fn neighborhood(self) -> impl Iterator<Item = ((i32, i32, i32), ChunkCoord)> {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).flat_map(move |dz| {
                (-1..=1).map(move |dx| ((dx, dy, dz), self.offset(dx, dy, dz)))
            })
        })
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}

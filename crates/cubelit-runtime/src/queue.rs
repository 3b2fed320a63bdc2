use cubelit_geom::ChunkCoord;
use hashbrown::HashSet;

/// A queued mesh rebuild.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshJob {
    pub coord: ChunkCoord,
}

/// Dirty chunk coordinates awaiting a mesh rebuild. Duplicates collapse;
/// [`MeshQueue::pop_one`] hands out the entry nearest the focus chunk.
#[derive(Clone, Debug, Default)]
pub struct MeshQueue {
    pending: HashSet<ChunkCoord>,
    focus: ChunkCoord,
}

impl MeshQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `coord`. Returns false when it was already pending.
    pub fn push_dirty(&mut self, coord: ChunkCoord) -> bool {
        self.pending.insert(coord)
    }

    /// Nearest pending job to the focus; ties break on coordinate order so the
    /// drain order is deterministic.
    pub fn pop_one(&mut self) -> Option<MeshJob> {
        let focus = self.focus;
        let coord = *self
            .pending
            .iter()
            .min_by_key(|c| (c.distance_sq(focus), **c))?;
        self.pending.remove(&coord);
        Some(MeshJob { coord })
    }

    pub fn set_focus(&mut self, focus: ChunkCoord) {
        self.focus = focus;
    }

    pub fn focus(&self) -> ChunkCoord {
        self.focus
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.pending.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

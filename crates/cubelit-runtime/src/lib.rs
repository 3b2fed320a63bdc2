//! Mesh job queue and the executor that drains it, inline or on a worker.
#![forbid(unsafe_code)]

mod halo_pool;
mod queue;
mod worker;

use std::sync::Arc;
use std::time::Instant;

use cubelit_blocks::BlockTable;
use cubelit_chunk::{ChunkError, ChunkProvider};
use cubelit_geom::ChunkCoord;
use cubelit_mesh_cpu::{ChunkMesher, MeshBuild, MeshContext, MeshError};
use hashbrown::HashMap;
use serde::Deserialize;
use thiserror::Error;

pub use queue::{MeshJob, MeshQueue};

use crate::worker::MeshWorker;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Run the mesher on a dedicated worker thread; halos are still
    /// assembled on the calling thread.
    pub off_main_thread: bool,
    /// Jobs started per [`MeshRuntime::tick`].
    pub jobs_per_tick: usize,
    /// Radius in chunks used by [`MeshRuntime::queue_around`].
    pub focus_radius: i32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            off_main_thread: false,
            jobs_per_tick: 1,
            focus_radius: 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("failed to start mesh worker: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("mesh worker disconnected")]
    WorkerGone,
}

impl From<ChunkError> for RuntimeError {
    fn from(e: ChunkError) -> Self {
        RuntimeError::Mesh(MeshError::Chunk(e))
    }
}

/// A finished mesh and the chunk version it was built from.
#[derive(Clone, Debug)]
pub struct ChunkMesh {
    pub coord: ChunkCoord,
    pub mesh: MeshBuild,
    /// `last_updated` of the chunk when its halo was taken.
    pub source_version: u64,
    /// Tick the job ran at.
    pub built_at: u64,
}

enum Executor {
    Inline(Box<ChunkMesher>),
    Worker(MeshWorker),
}

/// Drains a [`MeshQueue`] a few jobs per tick and keeps the latest mesh per chunk.
pub struct MeshRuntime {
    config: MeshConfig,
    blocks: Arc<BlockTable>,
    queue: MeshQueue,
    executor: Executor,
    meshes: HashMap<ChunkCoord, ChunkMesh>,
    updated: Vec<ChunkCoord>,
}

impl MeshRuntime {
    pub fn new(config: MeshConfig, blocks: Arc<BlockTable>) -> Result<Self, RuntimeError> {
        let executor = if config.off_main_thread {
            Executor::Worker(MeshWorker::spawn(Arc::clone(&blocks))?)
        } else {
            Executor::Inline(Box::new(ChunkMesher::new()))
        };
        log::info!(
            target: "runtime",
            "mesh runtime: off_main_thread={} jobs_per_tick={}",
            config.off_main_thread,
            config.jobs_per_tick
        );
        Ok(Self {
            config,
            blocks,
            queue: MeshQueue::new(),
            executor,
            meshes: HashMap::new(),
            updated: Vec::new(),
        })
    }

    pub fn queue(&self) -> &MeshQueue {
        &self.queue
    }

    pub fn push_dirty(&mut self, coord: ChunkCoord) -> bool {
        self.queue.push_dirty(coord)
    }

    /// Queues every chunk within `focus_radius` of `center` (a cube) and
    /// focuses the queue there.
    pub fn queue_around(&mut self, center: ChunkCoord) -> usize {
        let r = self.config.focus_radius.max(0);
        let mut added = 0;
        for dy in -r..=r {
            for dz in -r..=r {
                for dx in -r..=r {
                    if self.queue.push_dirty(center.offset(dx, dy, dz)) {
                        added += 1;
                    }
                }
            }
        }
        self.queue.set_focus(center);
        added
    }

    /// Re-queues every stored mesh whose chunk moved past the version the
    /// mesh was built from.
    pub fn queue_stale<P: ChunkProvider + ?Sized>(
        &mut self,
        provider: &mut P,
    ) -> Result<usize, RuntimeError> {
        let mut queued = 0;
        for (coord, mesh) in &self.meshes {
            let chunk = provider.get_or_gen_chunk(*coord)?;
            if chunk.last_updated() > mesh.source_version && self.queue.push_dirty(*coord) {
                queued += 1;
            }
        }
        if queued > 0 {
            log::debug!(target: "runtime", "re-queued {} stale meshes", queued);
        }
        Ok(queued)
    }

    pub fn mesh(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.meshes.get(&coord)
    }

    pub fn meshes(&self) -> impl Iterator<Item = &ChunkMesh> {
        self.meshes.values()
    }

    /// Coordinates whose mesh changed since the last call.
    pub fn take_updated(&mut self) -> Vec<ChunkCoord> {
        std::mem::take(&mut self.updated)
    }

    /// Jobs handed to the worker and not yet collected.
    pub fn in_flight(&self) -> usize {
        match &self.executor {
            Executor::Inline(_) => 0,
            Executor::Worker(w) => w.in_flight(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.in_flight() == 0
    }

    /// Starts up to `jobs_per_tick` queued jobs and collects finished ones.
    /// Returns how many meshes were stored. A failing job is dropped from
    /// the queue and its error returned.
    pub fn tick<P: ChunkProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        now: u64,
    ) -> Result<usize, RuntimeError> {
        let started = Instant::now();
        let mut stored = 0;
        for _ in 0..self.config.jobs_per_tick.max(1) {
            if let Executor::Worker(w) = &self.executor {
                if !w.has_capacity() {
                    break;
                }
            }
            let Some(job) = self.queue.pop_one() else {
                break;
            };
            match &mut self.executor {
                Executor::Inline(mesher) => {
                    let ctx = MeshContext::new(&self.blocks, now);
                    let (mesh, source_version) = mesher.mesh_chunk(provider, job.coord, &ctx)?;
                    if self.store(ChunkMesh {
                        coord: job.coord,
                        mesh,
                        source_version,
                        built_at: now,
                    }) {
                        stored += 1;
                    }
                }
                Executor::Worker(w) => {
                    w.submit(provider, job.coord, now)?;
                }
            }
        }
        stored += self.collect(false)?;
        log::trace!(
            target: "runtime",
            "tick {}: stored {} meshes, {} queued, {} in flight in {:.2?}",
            now,
            stored,
            self.queue.len(),
            self.in_flight(),
            started.elapsed()
        );
        Ok(stored)
    }

    /// Runs ticks until the queue is empty and every worker job is back.
    pub fn drain<P: ChunkProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        now: u64,
    ) -> Result<usize, RuntimeError> {
        let mut stored = 0;
        while !self.queue.is_empty() {
            stored += self.tick(provider, now)?;
            if self.in_flight() > 0 {
                stored += self.collect(true)?;
            }
        }
        while self.in_flight() > 0 {
            stored += self.collect(true)?;
        }
        Ok(stored)
    }

    fn collect(&mut self, block: bool) -> Result<usize, RuntimeError> {
        let Executor::Worker(w) = &mut self.executor else {
            return Ok(0);
        };
        let mut done = Vec::new();
        let mut first_err = None;
        for out in w.collect(block)? {
            match out {
                Ok(mesh) => done.push(mesh),
                Err(e) => {
                    log::warn!(target: "runtime", "mesh job failed: {}", e);
                    first_err.get_or_insert(e);
                }
            }
        }
        let mut stored = 0;
        for mesh in done {
            if self.store(mesh) {
                stored += 1;
            }
        }
        match first_err {
            Some(e) => Err(e.into()),
            None => Ok(stored),
        }
    }

    // Keeps the newer of the stored and incoming mesh.
    fn store(&mut self, mesh: ChunkMesh) -> bool {
        if let Some(prev) = self.meshes.get(&mesh.coord) {
            if prev.source_version > mesh.source_version {
                log::debug!(target: "runtime", "dropped superseded mesh for {:?}", mesh.coord);
                return false;
            }
        }
        self.updated.push(mesh.coord);
        self.meshes.insert(mesh.coord, mesh);
        true
    }
}

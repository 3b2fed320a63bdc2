use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, unbounded};
use cubelit_blocks::BlockTable;
use cubelit_chunk::ChunkProvider;
use cubelit_geom::ChunkCoord;
use cubelit_mesh_cpu::{HaloBuffers, MeshError, MeshScratch, mesh_halo};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::halo_pool::HaloPool;
use crate::{ChunkMesh, RuntimeError};

/// Halos that may be out with the worker at once.
pub(crate) const MAX_IN_FLIGHT: usize = 2;

struct WorkerJob {
    halo: HaloBuffers,
    built_at: u64,
}

type WorkerOut = Result<ChunkMesh, MeshError>;

fn process_job(
    job: WorkerJob,
    blocks: &BlockTable,
    scratch: &mut MeshScratch,
    halos: &HaloPool,
    tx: &Sender<WorkerOut>,
) {
    let WorkerJob { halo, built_at } = job;
    let out = mesh_halo(&halo, blocks, scratch).map(|mesh| ChunkMesh {
        coord: halo.coord,
        mesh,
        source_version: halo.source_version,
        built_at,
    });
    if let Ok(m) = &out {
        log::debug!(
            target: "mesh",
            "worker meshed {:?}: {} quads, {} vertices",
            m.coord,
            m.mesh.quad_count(),
            m.mesh.vertices.len()
        );
    }
    halos.release(halo);
    let _ = tx.send(out);
}

/// Off-thread executor. Halos are assembled by the caller, which owns the
/// chunks, then meshed on a single named worker with its own scratch.
pub(crate) struct MeshWorker {
    job_tx: Sender<WorkerJob>,
    res_rx: Receiver<WorkerOut>,
    halos: Arc<HaloPool>,
    in_flight: usize,
    _pool: Arc<ThreadPool>,
}

impl MeshWorker {
    pub(crate) fn spawn(blocks: Arc<BlockTable>) -> Result<Self, RuntimeError> {
        let (job_tx, job_rx) = unbounded::<WorkerJob>();
        let (res_tx, res_rx) = unbounded::<WorkerOut>();
        let halos = Arc::new(HaloPool::new(MAX_IN_FLIGHT));
        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(1)
                .thread_name(|i| format!("cubelit-mesh-{i}"))
                .build()?,
        );
        let worker_halos = Arc::clone(&halos);
        pool.spawn(move || {
            let mut scratch = MeshScratch::default();
            while let Ok(job) = job_rx.recv() {
                process_job(
                    job,
                    blocks.as_ref(),
                    &mut scratch,
                    worker_halos.as_ref(),
                    &res_tx,
                );
            }
            log::debug!(target: "runtime", "mesh worker exiting");
        });
        Ok(Self {
            job_tx,
            res_rx,
            halos,
            in_flight: 0,
            _pool: pool,
        })
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub(crate) fn has_capacity(&self) -> bool {
        self.in_flight < MAX_IN_FLIGHT
    }

    /// Assembles the halo for `coord` here and hands it to the worker.
    pub(crate) fn submit<P: ChunkProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        coord: ChunkCoord,
        built_at: u64,
    ) -> Result<(), RuntimeError> {
        let mut halo = self.halos.try_acquire().unwrap_or_default();
        if let Err(e) = halo.assemble(provider, coord) {
            self.halos.release(halo);
            return Err(e.into());
        }
        self.job_tx
            .send(WorkerJob { halo, built_at })
            .map_err(|_| RuntimeError::WorkerGone)?;
        self.in_flight += 1;
        log::trace!(
            target: "runtime",
            "submitted {:?} ({} in flight, {} halos allocated)",
            coord,
            self.in_flight,
            self.halos.allocated()
        );
        Ok(())
    }

    /// Finished jobs. With `block`, waits for at least one when any are out.
    pub(crate) fn collect(&mut self, block: bool) -> Result<Vec<WorkerOut>, RuntimeError> {
        let mut out = Vec::new();
        if block && self.in_flight > 0 {
            let first = self.res_rx.recv().map_err(|_| RuntimeError::WorkerGone)?;
            out.push(first);
        }
        out.extend(self.res_rx.try_iter());
        self.in_flight = self.in_flight.saturating_sub(out.len());
        Ok(out)
    }
}

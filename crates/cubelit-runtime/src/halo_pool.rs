use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use cubelit_mesh_cpu::HaloBuffers;

/// Lock-free pool of halo buffers shipped between the main thread and the
/// mesh worker. Caps how many jobs can be in flight.
pub(crate) struct HaloPool {
    available_tx: Sender<HaloBuffers>,
    available_rx: Receiver<HaloBuffers>,
    allocated: AtomicUsize,
    max_halos: usize,
}

impl HaloPool {
    pub(crate) fn new(max_halos: usize) -> Self {
        debug_assert!(max_halos > 0);
        let (tx, rx) = bounded(max_halos);
        Self {
            available_tx: tx,
            available_rx: rx,
            allocated: AtomicUsize::new(0),
            max_halos,
        }
    }

    /// A free halo, allocating while under capacity. `None` when every halo is
    /// out with the worker.
    pub(crate) fn try_acquire(&self) -> Option<HaloBuffers> {
        if let Ok(halo) = self.available_rx.try_recv() {
            return Some(halo);
        }
        let prev = self.allocated.fetch_add(1, Ordering::AcqRel);
        if prev < self.max_halos {
            return Some(HaloBuffers::new());
        }
        self.allocated.fetch_sub(1, Ordering::AcqRel);
        None
    }

    pub(crate) fn release(&self, halo: HaloBuffers) {
        let _ = self.available_tx.try_send(halo);
    }

    pub(crate) fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Acquire)
    }
}

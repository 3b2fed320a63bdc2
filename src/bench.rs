use std::time::{Duration, Instant};

use cubelit_chunk::{ChunkError, ChunkProvider};
use cubelit_geom::{ChunkCoord, Face};
use cubelit_mesh_cpu::Pass;
use cubelit_runtime::{MeshRuntime, RuntimeError};
use cubelit_world::World;
use hashbrown::HashSet;

use crate::config::BenchConfig;

#[derive(Debug, Default)]
pub struct BenchReport {
    pub chunks: usize,
    /// Chunks whose whole 3×3×3 neighborhood is empty.
    pub empty_neighborhoods: usize,
    pub skipped_out_of_bounds: usize,
    pub iterations: usize,
    pub elapsed: Duration,
    pub quads: usize,
    pub see_through_quads: usize,
}

impl BenchReport {
    pub fn per_chunk(&self) -> Duration {
        let jobs = (self.chunks * self.iterations).max(1) as u32;
        self.elapsed / jobs
    }
}

// Cube of chunks around every point whose full neighborhood can be loaded.
fn bench_coords(world: &World, cfg: &BenchConfig) -> (Vec<ChunkCoord>, usize) {
    let r = cfg.radius.max(0);
    let mut seen = HashSet::new();
    let mut coords = Vec::new();
    let mut skipped = 0;
    for p in &cfg.points {
        let center = ChunkCoord::new(p[0], p[1], p[2]);
        for dy in -r..=r {
            for dz in -r..=r {
                for dx in -r..=r {
                    let c = center.offset(dx, dy, dz);
                    if !seen.insert(c) {
                        continue;
                    }
                    if c.neighborhood().all(|(_, n)| world.in_bounds(n)) {
                        coords.push(c);
                    } else {
                        skipped += 1;
                    }
                }
            }
        }
    }
    coords.sort();
    (coords, skipped)
}

fn neighborhood_is_empty(world: &mut World, coord: ChunkCoord) -> Result<bool, ChunkError> {
    for (_, c) in coord.neighborhood() {
        if !world.get_or_gen_chunk(c)?.is_empty() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Meshes every bench chunk `warmup + iterations` times. Each iteration
/// invalidates the chunks first so light is recomputed as part of the job.
pub fn run_meshing_bench(
    world: &mut World,
    runtime: &mut MeshRuntime,
    cfg: &BenchConfig,
) -> Result<BenchReport, RuntimeError> {
    let (coords, skipped) = bench_coords(world, cfg);
    if skipped > 0 {
        log::warn!(target: "bench", "skipping {} chunks with neighbors outside the world", skipped);
    }
    let mut report = BenchReport {
        chunks: coords.len(),
        skipped_out_of_bounds: skipped,
        iterations: cfg.iterations,
        ..Default::default()
    };
    for &c in &coords {
        if neighborhood_is_empty(world, c)? {
            report.empty_neighborhoods += 1;
        }
    }
    log::info!(
        target: "bench",
        "meshing {} chunks ({} with empty neighborhoods), {} warmup + {} timed iterations",
        report.chunks,
        report.empty_neighborhoods,
        cfg.warmup,
        cfg.iterations
    );

    for iter in 0..cfg.warmup + cfg.iterations {
        let tick = world.advance_tick();
        for &c in &coords {
            world.get_or_gen_chunk(c)?.invalidate(tick);
            runtime.push_dirty(c);
        }
        let started = Instant::now();
        runtime.drain(world, tick)?;
        let took = started.elapsed();
        if iter < cfg.warmup {
            log::debug!(target: "bench", "warmup {} took {:.2?}", iter, took);
            continue;
        }
        log::debug!(target: "bench", "iteration {} took {:.2?}", iter - cfg.warmup, took);
        report.elapsed += took;
    }

    for &c in &coords {
        if let Some(m) = runtime.mesh(c) {
            report.quads += m.mesh.quad_count();
            report.see_through_quads += Face::ALL
                .iter()
                .map(|f| m.mesh.regions.get(Pass::SeeThrough, *f).vertex_count as usize / 4)
                .sum::<usize>();
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cubelit_blocks::default_block_table;
    use cubelit_runtime::MeshConfig;
    use cubelit_world::{WorldConfig, WorldGenMode};

    #[test]
    fn bench_meshes_every_chunk_in_range() {
        let mut world = World::with_mode(WorldGenMode::Flat {
            surface_y: 0,
            block: 3,
        });
        let mut rt = MeshRuntime::new(MeshConfig::default(), Arc::new(default_block_table())).unwrap();
        let cfg = BenchConfig {
            iterations: 2,
            warmup: 1,
            radius: 1,
            points: vec![[0, 0, 0]],
        };
        let report = run_meshing_bench(&mut world, &mut rt, &cfg).unwrap();
        assert_eq!(report.chunks, 27);
        assert_eq!(report.skipped_out_of_bounds, 0);
        // Every neighborhood reaches the ground layer at cy = 0.
        assert_eq!(report.empty_neighborhoods, 0);
        assert!(report.quads > 0);
        assert_eq!(report.see_through_quads, 0);
        assert_eq!(rt.meshes().count(), 27);
    }

    #[test]
    fn chunks_next_to_world_bounds_are_skipped() {
        let mut world = World::new(WorldConfig {
            terrain: WorldGenMode::Empty,
            min_cy: Some(0),
            max_cy: Some(2),
        });
        let mut rt = MeshRuntime::new(MeshConfig::default(), Arc::new(default_block_table())).unwrap();
        let cfg = BenchConfig {
            iterations: 1,
            warmup: 0,
            radius: 1,
            points: vec![[0, 1, 0]],
        };
        let report = run_meshing_bench(&mut world, &mut rt, &cfg).unwrap();
        assert_eq!(report.chunks, 9);
        assert_eq!(report.skipped_out_of_bounds, 18);
        assert_eq!(report.empty_neighborhoods, 9);
        assert_eq!(report.quads, 0);
    }
}

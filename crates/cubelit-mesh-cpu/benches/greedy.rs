use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};

use cubelit_blocks::default_block_table;
use cubelit_geom::{CHUNK_VOLUME, ChunkCoord, chunk_index};
use cubelit_mesh_cpu::{ChunkMesher, HaloBuffers, MeshContext, MeshScratch, mesh_halo, mesh_voxel_model};
use cubelit_world::{World, WorldGenMode};

fn hills() -> World {
    World::with_mode(WorldGenMode::Hills {
        seed: 0xC0FFEE,
        base: 16,
        amplitude: 12.0,
        frequency: 0.03,
        block: 3,
        top_block: Some(2),
    })
}

fn bench_mesh_chunk_hills(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_chunk_hills");
    let table = default_block_table();
    let mut world = hills();
    let mut mesher = ChunkMesher::new();
    let coord = ChunkCoord::new(0, 0, 0);
    group.bench_function("assemble_and_mesh", |b| {
        b.iter(|| {
            let ctx = MeshContext::new(&table, world.tick());
            let out = mesher.mesh_chunk(&mut world, coord, &ctx).unwrap();
            black_box(out);
        })
    });
    group.bench_function("assemble_and_mesh_relight", |b| {
        b.iter(|| {
            for (_, n) in coord.neighborhood() {
                if let Some(chunk) = world.chunk_mut(n) {
                    chunk.invalidate(0);
                }
            }
            let ctx = MeshContext::new(&table, world.tick());
            let out = mesher.mesh_chunk(&mut world, coord, &ctx).unwrap();
            black_box(out);
        })
    });

    let mut halo = HaloBuffers::new();
    halo.assemble(&mut world, coord).unwrap();
    let mut scratch = MeshScratch::default();
    group.bench_function("mesh_halo_only", |b| {
        b.iter(|| black_box(mesh_halo(&halo, &table, &mut scratch).unwrap()))
    });
    group.finish();
}

fn bench_voxel_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_voxel_model");
    group.measurement_time(Duration::from_secs(5));
    // Checkerboard: worst case for merging.
    let mut checker = Box::new([0u8; CHUNK_VOLUME]);
    for y in 0..32 {
        for z in 0..32 {
            for x in 0..32 {
                if (x + y + z) % 2 == 0 {
                    checker[chunk_index(x, y, z)] = 1 + ((x + z) % 4) as u8;
                }
            }
        }
    }
    group.bench_function("checkerboard", |b| {
        b.iter(|| black_box(mesh_voxel_model(&checker).unwrap()))
    });
    let solid = Box::new([7u8; CHUNK_VOLUME]);
    group.bench_function("solid", |b| {
        b.iter(|| black_box(mesh_voxel_model(&solid).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_mesh_chunk_hills, bench_voxel_model);
criterion_main!(benches);

use super::*;
use cubelit_geom::{CHUNK_VOLUME, ChunkCoord, chunk_index};

fn stone_at(points: &[(usize, usize, usize)]) -> Vec<BlockId> {
    let mut blocks = vec![0; CHUNK_VOLUME];
    for &(x, y, z) in points {
        blocks[chunk_index(x, y, z)] = 3;
    }
    blocks
}

#[test]
fn empty_chunk_seeds_full_sunlight() {
    let blocks = vec![0; CHUNK_VOLUME];
    let mut light = vec![0; CHUNK_VOLUME];
    seed_sunlight(&blocks, &mut light);
    assert!(light.iter().all(|l| *l == 15));
}

#[test]
fn column_below_a_block_recovers_one_step_per_voxel() {
    let blocks = stone_at(&[(3, 20, 4)]);
    let mut light = vec![0; CHUNK_VOLUME];
    seed_sunlight(&blocks, &mut light);
    assert_eq!(light[chunk_index(3, 21, 4)], 15);
    assert_eq!(light[chunk_index(3, 20, 4)], 0);
    assert_eq!(light[chunk_index(3, 19, 4)], 1);
    assert_eq!(light[chunk_index(3, 10, 4)], 10);
    assert_eq!(light[chunk_index(3, 0, 4)], 15);
    assert_eq!(light[chunk_index(4, 19, 4)], 15);
}

#[test]
fn blur_of_single_source_is_manhattan_falloff() {
    let mut light = vec![0; CHUNK_VOLUME];
    light[chunk_index(16, 16, 16)] = 15;
    blur_light::<CHUNK_SIZE>(&mut light);
    assert_eq!(light[chunk_index(16, 16, 16)], 15);
    assert_eq!(light[chunk_index(20, 16, 16)], 11);
    assert_eq!(light[chunk_index(16, 10, 16)], 9);
    assert_eq!(light[chunk_index(18, 14, 19)], 8);
    assert_eq!(light[chunk_index(0, 0, 0)], 0);
}

#[test]
fn blur_clamps_out_of_range_input() {
    let mut light = vec![0; HALO_SIZE * HALO_SIZE * HALO_SIZE];
    light[0] = 200;
    blur_light::<HALO_SIZE>(&mut light);
    assert_eq!(light[0], 15);
    assert!(light.iter().all(|l| *l <= 15));
}

#[test]
fn occlusion_halves_occupied_voxels_after_full_pipeline() {
    let blocks = stone_at(&[(5, 5, 5), (5, 6, 5), (20, 31, 7), (0, 0, 0)]);
    let mut pre = vec![0; CHUNK_VOLUME];
    seed_sunlight(&blocks, &mut pre);
    blur_light::<CHUNK_SIZE>(&mut pre);
    let mut post = vec![0; CHUNK_VOLUME];
    light_chunk_buffer(&blocks, &mut post);
    for i in 0..CHUNK_VOLUME {
        if blocks[i] != 0 {
            assert_eq!(post[i], pre[i] / 2);
        } else {
            assert_eq!(post[i], pre[i]);
        }
    }
}

#[test]
fn refresh_runs_only_when_stale() {
    let mut chunk = Chunk::from_blocks(ChunkCoord::new(0, 0, 0), stone_at(&[(1, 31, 1)]), 1).unwrap();
    assert!(refresh_chunk_light(&mut chunk));
    assert!(!chunk.light_is_stale());
    assert!(!refresh_chunk_light(&mut chunk));
    assert_eq!(chunk.light()[chunk_index(1, 31, 1)], 7);
    assert_eq!(chunk.light()[chunk_index(1, 30, 1)], 14);

    chunk.set_block(1, 31, 1, 0, 2);
    assert!(refresh_chunk_light(&mut chunk));
    assert!(chunk.light().iter().all(|l| *l == 15));
}

#[test]
fn stored_chunk_light_is_occluded() {
    let blocks = stone_at(&[(1, 31, 1), (9, 4, 9), (9, 5, 9), (31, 0, 31)]);
    let mut pre = vec![0; CHUNK_VOLUME];
    seed_sunlight(&blocks, &mut pre);
    blur_light::<CHUNK_SIZE>(&mut pre);
    let mut chunk = Chunk::from_blocks(ChunkCoord::new(0, 0, 0), blocks.clone(), 1).unwrap();
    assert!(refresh_chunk_light(&mut chunk));
    for i in 0..CHUNK_VOLUME {
        let expected = if blocks[i] != 0 { pre[i] / 2 } else { pre[i] };
        assert_eq!(chunk.light()[i], expected, "voxel {i}");
    }
}

#[test]
fn finished_halo_skips_blur() {
    let n = HALO_SIZE * HALO_SIZE * HALO_SIZE;
    let blocks = vec![0; n];
    let mut light = vec![0; n];
    light[n / 2] = 10;
    let mut blurred = light.clone();
    finish_halo_light(&mut light, &blocks, true);
    assert_eq!(light.iter().filter(|l| **l != 0).count(), 1);
    finish_halo_light(&mut blurred, &blocks, false);
    assert!(blurred.iter().filter(|l| **l != 0).count() > 1);
}

use cubelit_chunk::{Chunk, ChunkError};
use cubelit_geom::{CHUNK_SIZE, CHUNK_VOLUME, ChunkCoord};
use proptest::prelude::*;

fn local() -> impl Strategy<Value = usize> {
    0usize..CHUNK_SIZE
}

#[test]
fn new_chunk_is_empty_with_stale_light() {
    let c = Chunk::new(ChunkCoord::new(1, -2, 3), 0);
    assert!(c.is_empty());
    assert!(c.light_is_stale());
    assert_eq!(c.blocks().len(), CHUNK_VOLUME);
    assert_eq!(c.light().len(), CHUNK_VOLUME);
}

#[test]
fn from_blocks_rejects_wrong_length() {
    let err = Chunk::from_blocks(ChunkCoord::new(0, 0, 0), vec![0; 10], 1).unwrap_err();
    assert_eq!(
        err,
        ChunkError::BadLength {
            expected: CHUNK_VOLUME,
            got: 10
        }
    );
}

#[test]
fn storing_light_clamps_and_validates() {
    let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 5);
    c.store_light(&vec![40u8; CHUNK_VOLUME]);
    assert!(!c.light_is_stale());
    assert!(c.light().iter().all(|l| *l == 15));
    c.set_block(0, 0, 0, 3, 5);
    assert!(c.light_is_stale());
}

#[test]
fn empty_check_follows_writes() {
    let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 1);
    assert!(c.is_empty());
    c.fill_box((30, 30, 30), (8, 8, 8), 2, 2);
    assert!(!c.is_empty());
    assert_eq!(c.get_block(31, 31, 31), 2);
    assert_eq!(c.get_block(29, 31, 31), 0);
    c.fill_box((0, 0, 0), (32, 32, 32), 0, 3);
    assert!(c.is_empty());
}

#[test]
fn fill_box_clips_oversized_extent() {
    let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 1);
    c.fill_box((30, 0, 0), (usize::MAX, 2, 2), 5, 2);
    assert_eq!(c.blocks().iter().filter(|b| **b == 5).count(), 2 * 2 * 2);
    assert_eq!(c.get_block(30, 1, 1), 5);
    assert_eq!(c.get_block(CHUNK_SIZE - 1, 0, 0), 5);
    assert_eq!(c.get_block(29, 0, 0), 0);
    assert_eq!(c.last_updated(), 2);
}

proptest! {
    // Every write strictly advances the content version, whatever tick is passed
    #[test]
    fn writes_always_invalidate_light(ticks in proptest::collection::vec(0u64..50, 1..20)) {
        let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 1);
        for t in ticks {
            c.mark_light_valid();
            let before = c.last_updated();
            c.set_block(1, 2, 3, 4, t);
            prop_assert!(c.last_updated() > before);
            prop_assert!(c.last_updated() >= t);
            prop_assert!(c.light_is_stale());
        }
    }

    // get_block reads back what set_block wrote, at the linear index
    #[test]
    fn set_then_get(x in local(), y in local(), z in local(), id in 1u8..=255) {
        let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 1);
        c.set_block(x, y, z, id, 2);
        prop_assert_eq!(c.get_block(x, y, z), id);
        prop_assert_eq!(c.blocks()[Chunk::idx(x, y, z)], id);
        prop_assert_eq!(Chunk::idx(x, y, z), (y * CHUNK_SIZE + z) * CHUNK_SIZE + x);
        prop_assert_eq!(c.blocks().iter().filter(|b| **b != 0).count(), 1);
    }
}

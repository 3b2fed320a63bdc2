use cubelit_blocks::{AIR, BlockId};
use cubelit_geom::{MAX_LIGHT, cube_index};

/// Spreads light through a cube of edge `N`, in place.
///
/// Every line along X, then Y, then Z is swept from both ends at once. Each
/// sweep carries a running maximum that decays by one per voxel; a voxel takes
/// `max(own, running)`. Values are clamped to 15 first.
pub fn blur_light<const N: usize>(light: &mut [u8]) {
    debug_assert_eq!(light.len(), N * N * N);
    for l in light.iter_mut() {
        *l = (*l).min(MAX_LIGHT);
    }
    // X lines are contiguous.
    for y in 0..N {
        for z in 0..N {
            sweep(light, cube_index::<N>(0, y, z), 1, N);
        }
    }
    for z in 0..N {
        for x in 0..N {
            sweep(light, cube_index::<N>(x, 0, z), N * N, N);
        }
    }
    for y in 0..N {
        for x in 0..N {
            sweep(light, cube_index::<N>(x, y, 0), N, N);
        }
    }
}

#[inline]
fn sweep(light: &mut [u8], start: usize, stride: usize, n: usize) {
    let (mut a, mut b) = (0u8, 0u8);
    for k in 0..n {
        let fa = start + k * stride;
        a = a.max(light[fa]);
        light[fa] = a;
        a = a.saturating_sub(1);

        let fb = start + (n - 1 - k) * stride;
        b = b.max(light[fb]);
        light[fb] = b;
        b = b.saturating_sub(1);
    }
}

/// Halves the light of every occupied voxel. `blocks` and `light` share a layout.
pub fn apply_ambient_occlusion(light: &mut [u8], blocks: &[BlockId]) {
    debug_assert_eq!(light.len(), blocks.len());
    for (l, b) in light.iter_mut().zip(blocks) {
        if *b != AIR {
            *l /= 2;
        }
    }
}

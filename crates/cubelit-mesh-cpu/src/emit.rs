use cubelit_geom::{Axis, Face};

use crate::constants::{CORNER_OFFSETS, SPLIT_02, SPLIT_02_FLIPPED, SPLIT_13, SPLIT_13_FLIPPED};
use crate::mesh_build::{MeshBuild, PackedVertex};
use crate::plane::PlaneRect;

#[inline]
pub(crate) fn light_nibble(word: u16, corner: usize) -> u8 {
    ((word >> (corner * 4)) & 0x0f) as u8
}

#[inline]
fn place(axis: Axis, value: usize, pos: &mut [u8; 3]) {
    let slot = match axis {
        Axis::X => 0,
        Axis::Y => 1,
        Axis::Z => 2,
    };
    pos[slot] = value as u8;
}

/// Appends one merged rectangle as four vertices and six indices.
///
/// `depth` is the coordinate of the face plane along the normal axis (core
/// slice + 1 for positive faces). The split diagonal joins the pair of
/// opposite corners with the larger summed light.
pub(crate) fn emit_quad(build: &mut MeshBuild, face: Face, depth: usize, rect: &PlaneRect, texture: u8) {
    let (ua, va) = face.plane_axes();
    let normal = face.normal_axis();
    let base = build.vertices.len() as u32;
    for (corner, (du, dv)) in CORNER_OFFSETS.iter().enumerate() {
        let mut pos = [0u8; 3];
        place(ua, rect.u + du * rect.width, &mut pos);
        place(va, rect.v + dv * rect.height, &mut pos);
        place(normal, depth, &mut pos);
        build
            .vertices
            .push(PackedVertex::new(pos, texture, face, light_nibble(rect.light, corner)));
    }

    let n = |k| u32::from(light_nibble(rect.light, k));
    let split_02 = n(0) + n(2) > n(1) + n(3);
    let pattern = match (split_02, face.flips_winding()) {
        (true, false) => &SPLIT_02,
        (false, false) => &SPLIT_13,
        (true, true) => &SPLIT_02_FLIPPED,
        (false, true) => &SPLIT_13_FLIPPED,
    };
    build.indices.extend(pattern.iter().map(|i| base + i));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(light: u16) -> PlaneRect {
        PlaneRect {
            u: 2,
            v: 3,
            width: 4,
            height: 5,
            block: 1,
            light,
        }
    }

    #[test]
    fn corners_follow_plane_axes() {
        let mut b = MeshBuild::default();
        emit_quad(&mut b, Face::Left, 7, &rect(0), 9);
        let pos: Vec<[u8; 3]> = b.vertices.iter().map(|v| v.pos).collect();
        // Left faces: u = z, v = y, normal = x.
        assert_eq!(pos, vec![[7, 3, 2], [7, 3, 6], [7, 8, 6], [7, 8, 2]]);
        assert!(b.vertices.iter().all(|v| v.texture == 9 && v.face() == Some(Face::Left)));
    }

    #[test]
    fn split_follows_brighter_diagonal() {
        // Corners 0 and 2 bright.
        let mut b = MeshBuild::default();
        emit_quad(&mut b, Face::Front, 1, &rect(0x0f0f), 0);
        assert_eq!(b.indices, SPLIT_02.to_vec());
        assert_eq!(b.vertices[0].light(), 15);
        assert_eq!(b.vertices[1].light(), 0);

        // Tie goes to the 1-3 diagonal.
        let mut b = MeshBuild::default();
        emit_quad(&mut b, Face::Front, 1, &rect(0x5555), 0);
        assert_eq!(b.indices, SPLIT_13.to_vec());

        let mut b = MeshBuild::default();
        emit_quad(&mut b, Face::Top, 1, &rect(0x0f0f), 0);
        assert_eq!(b.indices, SPLIT_02_FLIPPED.to_vec());
    }
}

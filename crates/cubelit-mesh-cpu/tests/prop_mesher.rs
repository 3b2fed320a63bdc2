use cubelit_geom::{CHUNK_SIZE, CHUNK_VOLUME, Face, chunk_index};
use cubelit_mesh_cpu::{MeshBuild, Pass, mesh_voxel_model};
use proptest::prelude::*;

fn sparse_model() -> impl Strategy<Value = Box<[u8; CHUNK_VOLUME]>> {
    prop::collection::vec((0usize..CHUNK_SIZE, 0usize..CHUNK_SIZE, 0usize..CHUNK_SIZE, 1u8..4), 0..48)
        .prop_map(|voxels| {
            let mut blocks = Box::new([0u8; CHUNK_VOLUME]);
            for (x, y, z, id) in voxels {
                blocks[chunk_index(x, y, z)] = id;
            }
            blocks
        })
}

// Exposed unit faces per direction, treating everything outside the model as empty.
fn exposed_faces(blocks: &[u8; CHUNK_VOLUME]) -> [u32; 6] {
    let mut out = [0u32; 6];
    let n = CHUNK_SIZE as i32;
    for y in 0..n {
        for z in 0..n {
            for x in 0..n {
                if blocks[chunk_index(x as usize, y as usize, z as usize)] == 0 {
                    continue;
                }
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                    let inside = (0..n).contains(&nx) && (0..n).contains(&ny) && (0..n).contains(&nz);
                    if !inside || blocks[chunk_index(nx as usize, ny as usize, nz as usize)] == 0 {
                        out[face.index()] += 1;
                    }
                }
            }
        }
    }
    out
}

fn quad_area(m: &MeshBuild, first: usize) -> u32 {
    let a = m.vertices[first].pos;
    let c = m.vertices[first + 2].pos;
    let d: Vec<u32> = (0..3).map(|k| u32::from(a[k].abs_diff(c[k]))).collect();
    d[0] * d[1] + d[1] * d[2] + d[0] * d[2]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Merging never changes the covered area of any face direction
    #[test]
    fn merged_area_matches_exposed_faces(blocks in sparse_model()) {
        let m = mesh_voxel_model(&blocks).unwrap();
        let expected = exposed_faces(&blocks);
        for face in Face::ALL {
            let r = m.regions.get(Pass::Opaque, face);
            let mut area = 0;
            let mut q = r.vertex_offset as usize;
            while q < (r.vertex_offset + r.vertex_count) as usize {
                area += quad_area(&m, q);
                q += 4;
            }
            prop_assert_eq!(area, expected[face.index()], "{:?}", face);
        }
    }

    // Quads are well formed: in range, one face tag and texture each, valid indices
    #[test]
    fn quads_are_well_formed(blocks in sparse_model()) {
        let m = mesh_voxel_model(&blocks).unwrap();
        prop_assert_eq!(m.indices.len(), m.vertices.len() / 4 * 6);
        prop_assert!(m.indices.iter().all(|i| (*i as usize) < m.vertices.len()));
        for quad in m.vertices.chunks(4) {
            prop_assert!(quad.iter().all(|v| v.pos.iter().all(|c| *c as usize <= CHUNK_SIZE)));
            prop_assert!(quad.iter().all(|v| v.face() == quad[0].face() && v.texture == quad[0].texture));
            prop_assert!(quad.iter().all(|v| v.light() <= 15));
        }
        let total: u32 = exposed_faces(&blocks).iter().sum();
        prop_assert!(m.quad_count() as u32 <= total);
    }

    // Same input, same bytes
    #[test]
    fn model_meshing_is_deterministic(blocks in sparse_model()) {
        let a = mesh_voxel_model(&blocks).unwrap();
        let b = mesh_voxel_model(&blocks).unwrap();
        prop_assert_eq!(a.vertex_bytes(), b.vertex_bytes());
        prop_assert_eq!(a.indices, b.indices);
        prop_assert_eq!(a.regions, b.regions);
    }
}

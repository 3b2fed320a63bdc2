use cubelit_blocks::{
    AIR, BlockConfigError, BlockDef, BlockTable, MiningCategory, TextureDef, build_block_table,
    default_block_table, identity_block_table,
};
use cubelit_geom::Face;
use proptest::prelude::*;

fn def(name: &str) -> BlockDef {
    BlockDef {
        name: name.into(),
        ..Default::default()
    }
}

#[test]
fn air_is_always_id_zero_and_passable() {
    let table = build_block_table(Vec::new()).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.id_by_name("air"), Some(AIR));
    assert!(table.is_see_through(AIR));
    assert!(table.is_invisible(AIR));
    assert!(!table.contains(1));
}

#[test]
fn parses_toml_with_face_overrides() {
    let src = r#"
        [[blocks]]
        name = "grass"
        texture = { all = 16, top = 0, bottom = 1 }
        mining = "shovel"

        [[blocks]]
        name = "water"
        id = 2
        texture = 24
        liquid = true
        see_through = true

        [[blocks]]
        name = "log"
        texture = { all = 9, side = 4, front = 5 }
    "#;
    let table = BlockTable::from_toml_str(src).unwrap();
    let grass = table.id_by_name("grass").unwrap();
    assert_eq!(grass, 1);
    assert_eq!(table.texture(grass, Face::Top), Some(0));
    assert_eq!(table.texture(grass, Face::Bottom), Some(1));
    assert_eq!(table.texture(grass, Face::Left), Some(16));
    assert_eq!(table.get(grass).unwrap().mining, MiningCategory::Shovel);

    let water = table.id_by_name("water").unwrap();
    assert!(table.is_see_through(water));
    assert!(table.get(water).unwrap().liquid);

    let log = table.id_by_name("log").unwrap();
    assert_eq!(log, 3);
    assert_eq!(table.texture(log, Face::Top), Some(9));
    assert_eq!(table.texture(log, Face::Right), Some(4));
    assert_eq!(table.texture(log, Face::Front), Some(5));
}

#[test]
fn invisible_implies_see_through() {
    let mut barrier = def("barrier");
    barrier.invisible = true;
    let table = build_block_table(vec![barrier]).unwrap();
    assert!(table.is_see_through(1));
    assert!(table.is_invisible(1));
}

#[test]
fn rejects_reserved_duplicate_and_gapped_ids() {
    let mut zero = def("void2");
    zero.id = Some(0);
    assert!(matches!(
        build_block_table(vec![zero]),
        Err(BlockConfigError::ReservedId(_))
    ));

    let mut a = def("a");
    a.id = Some(1);
    let mut b = def("b");
    b.id = Some(1);
    assert!(matches!(
        build_block_table(vec![a, b]),
        Err(BlockConfigError::DuplicateId { id: 1, .. })
    ));

    let mut far = def("far");
    far.id = Some(5);
    assert!(matches!(
        build_block_table(vec![far]),
        Err(BlockConfigError::MissingId(1))
    ));

    assert!(matches!(
        build_block_table(vec![def("x"), def("x")]),
        Err(BlockConfigError::DuplicateName(_))
    ));
}

#[test]
fn too_many_types_is_an_error() {
    let defs: Vec<BlockDef> = (0..256).map(|i| def(&format!("b{i}"))).collect();
    assert!(matches!(
        build_block_table(defs),
        Err(BlockConfigError::TooMany(_))
    ));
}

#[test]
fn builtin_tables_are_consistent() {
    let table = default_block_table();
    let water = table.id_by_name("water").unwrap();
    let stone = table.id_by_name("stone").unwrap();
    assert!(table.is_see_through(water));
    assert!(!table.is_see_through(stone));
    for (i, ty) in table.iter().enumerate() {
        assert_eq!(ty.id as usize, i);
    }

    let ident = identity_block_table();
    assert_eq!(ident.len(), 256);
    assert_eq!(ident.texture(1, Face::Top), Some(0));
    assert_eq!(ident.texture(255, Face::Left), Some(254));
    assert!(!ident.is_see_through(7));
}

proptest! {
    // Sequential definitions get contiguous ids and uniform textures round-trip
    #[test]
    fn sequential_defs_get_contiguous_ids(texs in proptest::collection::vec(any::<u8>(), 0..64)) {
        let defs: Vec<BlockDef> = texs
            .iter()
            .enumerate()
            .map(|(i, t)| BlockDef {
                name: format!("b{i}"),
                texture: Some(TextureDef::All(*t)),
                ..Default::default()
            })
            .collect();
        let table = build_block_table(defs).unwrap();
        prop_assert_eq!(table.len(), texs.len() + 1);
        for (i, t) in texs.iter().enumerate() {
            let id = (i + 1) as u8;
            prop_assert_eq!(table.id_by_name(&format!("b{i}")), Some(id));
            for f in Face::ALL {
                prop_assert_eq!(table.texture(id, f), Some(*t));
            }
            prop_assert!(!table.is_see_through(id));
        }
        prop_assert!(!table.contains((texs.len() + 1) as u8) || texs.len() == 255);
    }
}

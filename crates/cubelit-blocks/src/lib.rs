//! Block-type table: per-type textures and transparency flags, loaded once at startup.
#![forbid(unsafe_code)]

pub mod config;
pub mod defaults;
pub mod registry;
pub mod types;

pub use config::{BlockDef, BlocksConfig, TextureDef};
pub use defaults::{default_block_table, identity_block_table};
pub use registry::{BlockConfigError, BlockTable, build_block_table};
pub use types::{AIR, BlockId, BlockType, FaceTextures, MiningCategory};

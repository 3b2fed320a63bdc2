use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use cubelit_runtime::MeshConfig;
use cubelit_world::WorldConfig;

// Top-level engine config file
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub world: WorldConfig,
    pub meshing: MeshConfig,
    pub bench: BenchConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BenchConfig {
    /// Timed iterations, after `warmup` untimed ones.
    pub iterations: usize,
    pub warmup: usize,
    /// Chunks meshed in each direction around every point.
    pub radius: i32,
    /// Chunk coordinates to bench around.
    pub points: Vec<[i32; 3]>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            warmup: 1,
            radius: 1,
            points: vec![[0, 0, 0]],
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        Self::from_toml_str(&text)
    }
}

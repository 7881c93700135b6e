use crate::error::Result;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Limits and tolerances of the narrow phase solvers.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub gjk_max_iterations: usize,
    pub epa_max_iterations: usize,
    /// Slots per EPA pool (points, edges, triangles).
    pub epa_pool_capacity: usize,
    /// Distances at or below this count as zero.
    pub tolerance: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gjk_max_iterations: 2000,
            epa_max_iterations: 500,
            epa_pool_capacity: 1024,
            tolerance: 1e-5,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: Vec3,
    /// Coefficient of restitution used for every contact.
    pub restitution: f32,
    pub solver: SolverConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            restitution: 0.0,
            solver: SolverConfig::default(),
        }
    }
}

impl PhysicsConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config = serde_json::from_reader(reader)?;

        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, self)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: PhysicsConfig =
            serde_json::from_str(r#"{ "restitution": 0.5, "solver": { "tolerance": 0.001 } }"#)
                .unwrap();
        assert_eq!(config.restitution, 0.5);
        assert_eq!(config.gravity, Vec3::new(0.0, -9.81, 0.0));
        assert_eq!(config.solver.tolerance, 0.001);
        assert_eq!(config.solver.gjk_max_iterations, 2000);
        assert_eq!(config.solver.epa_pool_capacity, 1024);
    }

    #[test]
    fn test_save_load() {
        let path = std::env::temp_dir().join(format!("physics-config-{}.json", std::process::id()));
        let config = PhysicsConfig {
            gravity: Vec3::new(0.0, -1.62, 0.0),
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = PhysicsConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PhysicsConfig::load("does/not/exist.json").unwrap_err();
        assert!(matches!(err, crate::error::PhysicsError::Io(_)));
    }
}

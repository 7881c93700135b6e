use thiserror::Error;

/// Errors raised by the collision and rigid body core.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// A bounded scratch pool ran out of slots.
    #[error("{pool} pool exhausted at {capacity} slots")]
    ResourceExhausted { pool: &'static str, capacity: usize },
    /// An iterative solver hit its iteration cap.
    #[error("{solver} did not converge within {iterations} iterations")]
    NonConvergence {
        solver: &'static str,
        iterations: usize,
    },
    /// Geometry or parameters that the core cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;

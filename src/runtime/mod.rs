//! Runtime adapters and the spawn abstraction surface.

pub mod tokio_spawner;

pub use crate::core::Spawn;
pub use tokio_spawner::TokioSpawner;

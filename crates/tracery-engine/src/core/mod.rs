pub mod error;
pub mod scene;

pub use error::{EngineError, EngineResult};
pub use scene::Scene;

pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-wide error type.
///
/// Geometric degeneracies (parallel offset lines, too-short polylines) are
/// handled by policy fallbacks in the geometry code and never surface here;
/// these variants cover contract violations and reconstruction failures.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// A programming-contract violation, e.g. cloning a bare subpath.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// An action was bound to a target lacking a needed capability.
    #[error("missing capability: {0}")]
    MissingCapability(String),

    /// An action was scheduled for a node that is not in the scene.
    #[error("missing target: {0}")]
    MissingTarget(String),

    /// An initializer did not match the action type being reconstructed.
    #[error("invalid initializer: {0}")]
    InvalidInitializer(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl EngineError {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn missing_capability(msg: impl Into<String>) -> Self {
        Self::MissingCapability(msg.into())
    }

    pub fn missing_target(msg: impl Into<String>) -> Self {
        Self::MissingTarget(msg.into())
    }

    pub fn invalid_initializer(msg: impl Into<String>) -> Self {
        Self::InvalidInitializer(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(EngineError::unsupported("x")
            .to_string()
            .contains("unsupported operation:"));
        assert!(EngineError::missing_capability("x")
            .to_string()
            .contains("missing capability:"));
        assert!(EngineError::missing_target("x")
            .to_string()
            .contains("missing target:"));
        assert!(EngineError::invalid_initializer("x")
            .to_string()
            .contains("invalid initializer:"));
    }

    #[test]
    fn serde_errors_convert() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let engine: EngineError = err.into();
        assert!(engine.to_string().contains("serialization error:"));
    }
}

use thiserror::Error;

/// Top-level error type for BiasLens operations.
///
/// The analyzers themselves are fail-closed and never return these; errors
/// surface only at the edges (configuration, rating construction, and
/// external candidate sources).
#[derive(Debug, Error)]
pub enum BiasLensError {
    // --- External collaborators (analysis degrades, never aborts) ---
    #[error("Inferential detector error: {0}")]
    Inferential(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    // --- Operational errors ---
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rating error: {0}")]
    Rating(String),
}

impl BiasLensError {
    /// Whether this error came from an external, non-deterministic collaborator.
    /// Callers skip that collaborator's output and keep the deterministic results.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::Inferential(_) | Self::Timeout(_))
    }
}

/// Result type alias for BiasLens operations.
pub type Result<T> = std::result::Result<T, BiasLensError>;

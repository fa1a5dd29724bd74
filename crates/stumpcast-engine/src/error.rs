//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: stumpcast_core::config::ConfigError,
    },

    /// Pipeline construction failed.
    #[error("pipeline error: {source}")]
    Pipeline {
        /// The underlying feed buffer error.
        #[from]
        source: stumpcast_core::feed::FeedError,
    },

    /// Observer API server failed to start.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying server error.
        #[from]
        source: stumpcast_observer::server::ServerError,
    },

    /// Generator configuration failed to parse.
    #[error("generator error: {message}")]
    Generator {
        /// Description of the generator failure.
        message: String,
    },
}

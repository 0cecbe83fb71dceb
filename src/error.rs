//! Error types for the migration analyzer.
//!
//! The analysis core is total and never produces errors; everything here
//! originates in the collaborators (cluster discovery, config loading,
//! report writing).

use thiserror::Error;

/// Top-level error type for analyzer operations.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Kubernetes API request failed.
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// Could not infer a client configuration from the environment.
    #[error("failed to infer cluster configuration: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    /// Kubeconfig file could not be read or parsed.
    #[error("kubeconfig error: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    /// Cluster is reachable but the connection probe failed.
    #[error("cluster connection failed: {0}")]
    Connection(String),

    /// Analyzer configuration problem.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Filesystem error while writing a report or reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result alias used across the crate.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

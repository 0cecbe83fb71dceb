//! Analyzer configuration.
//!
//! Everything the engine treats as tunable lives here: the managed
//! annotation prefix, the noise filter, the criticality ranking limit,
//! the namespace complexity thresholds, and report display limits.
//! Values can be overridden via a YAML file or builder methods.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the migration analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    /// Annotation prefix that marks a key as belonging to the
    /// classification domain.
    pub managed_prefix: String,

    /// Key prefixes excluded from aggregation (operational metadata).
    pub noise_prefixes: Vec<String>,

    /// Exact keys excluded from aggregation.
    pub noise_keys: Vec<String>,

    /// Maximum number of entries returned by the criticality ranking.
    pub critical_limit: usize,

    /// High-risk share above which a namespace is labeled HIGH
    /// complexity. The comparison is strict (`share > threshold`).
    pub high_complexity_threshold: f64,

    /// High-risk share above which a namespace is labeled MEDIUM
    /// complexity. The comparison is strict (`share > threshold`).
    pub medium_complexity_threshold: f64,

    /// Maximum annotations listed per risk level in markdown reports.
    pub max_annotations_per_risk_level: usize,

    /// Maximum value-frequency examples shown in detailed reports.
    pub max_value_examples: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            managed_prefix: "nginx.ingress.kubernetes.io/".to_string(),
            noise_prefixes: vec![
                "kubectl.kubernetes.io/".to_string(),
                "deployment.kubernetes.io/".to_string(),
                "control-plane.alpha.kubernetes.io/".to_string(),
                "pv.kubernetes.io/".to_string(),
                "volume.beta.kubernetes.io/".to_string(),
                "alpha.kubernetes.io/".to_string(),
                "beta.kubernetes.io/".to_string(),
                "node.alpha.kubernetes.io/".to_string(),
                "scheduler.alpha.kubernetes.io/".to_string(),
                "autoscaling.alpha.kubernetes.io/".to_string(),
                "controller.kubernetes.io/".to_string(),
            ],
            noise_keys: vec![
                // The legacy class annotation matters for migration but is
                // handled separately by the warning pass, not the inventory.
                "kubernetes.io/ingress.class".to_string(),
                "field.cattle.io/publicEndpoints".to_string(),
                "meta.helm.sh/release-name".to_string(),
                "meta.helm.sh/release-namespace".to_string(),
            ],
            critical_limit: 10,
            high_complexity_threshold: 0.50,
            medium_complexity_threshold: 0.20,
            max_annotations_per_risk_level: 10,
            max_value_examples: 3,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the managed annotation prefix.
    pub fn with_managed_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.managed_prefix = prefix.into();
        self
    }

    /// Set the criticality ranking limit.
    pub fn with_critical_limit(mut self, limit: usize) -> Self {
        self.critical_limit = limit;
        self
    }

    /// Set the namespace complexity thresholds (high, medium).
    pub fn with_complexity_thresholds(mut self, high: f64, medium: f64) -> Self {
        self.high_complexity_threshold = high;
        self.medium_complexity_threshold = medium;
        self
    }

    /// Add a prefix to the noise filter.
    pub fn noise_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.noise_prefixes.push(prefix.into());
        self
    }

    /// Add an exact key to the noise filter.
    pub fn noise_key(mut self, key: impl Into<String>) -> Self {
        self.noise_keys.push(key.into());
        self
    }

    /// Check whether a key falls inside the managed prefix.
    pub fn is_managed(&self, key: &str) -> bool {
        key.starts_with(&self.managed_prefix)
    }

    /// Check whether a key is filtered out of the inventory as
    /// operational noise.
    pub fn is_noise(&self, key: &str) -> bool {
        self.noise_prefixes.iter().any(|p| key.starts_with(p.as_str()))
            || self.noise_keys.iter().any(|k| k == key)
    }

    /// Load configuration from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the config file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Parse error in the config file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.managed_prefix, "nginx.ingress.kubernetes.io/");
        assert_eq!(config.critical_limit, 10);
        assert_eq!(config.high_complexity_threshold, 0.50);
        assert_eq!(config.medium_complexity_threshold, 0.20);
    }

    #[test]
    fn test_is_managed() {
        let config = AnalyzerConfig::default();
        assert!(config.is_managed("nginx.ingress.kubernetes.io/rewrite-target"));
        assert!(!config.is_managed("cert-manager.io/issuer"));
    }

    #[test]
    fn test_is_noise() {
        let config = AnalyzerConfig::default();
        assert!(config.is_noise("kubectl.kubernetes.io/last-applied-configuration"));
        assert!(config.is_noise("kubernetes.io/ingress.class"));
        assert!(config.is_noise("meta.helm.sh/release-name"));
        assert!(!config.is_noise("nginx.ingress.kubernetes.io/ssl-redirect"));
        assert!(!config.is_noise("cert-manager.io/issuer"));
    }

    #[test]
    fn test_config_builder() {
        let config = AnalyzerConfig::new()
            .with_managed_prefix("example.io/")
            .with_critical_limit(5)
            .noise_prefix("internal.example.io/");

        assert!(config.is_managed("example.io/feature"));
        assert!(config.is_noise("internal.example.io/build-id"));
        assert_eq!(config.critical_limit, 5);
    }

    #[test]
    fn test_load_from_str() {
        let yaml = r#"
managedPrefix: "custom.io/"
criticalLimit: 3
highComplexityThreshold: 0.6
"#;
        let config = AnalyzerConfig::load_from_str(yaml).unwrap();
        assert_eq!(config.managed_prefix, "custom.io/");
        assert_eq!(config.critical_limit, 3);
        assert_eq!(config.high_complexity_threshold, 0.6);
        // Unspecified fields keep their defaults.
        assert_eq!(config.medium_complexity_threshold, 0.20);
        assert!(config.is_noise("kubernetes.io/ingress.class"));
    }

    #[test]
    fn test_load_errors_keep_their_source() {
        let err = AnalyzerConfig::load_from_str("criticalLimit: [not a number").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());

        let err = AnalyzerConfig::load_from_file(Path::new("/nonexistent/analyzer.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}

//! # Ingress Migration Analyzer
//!
//! A Rust-based command-line tool that scans Kubernetes clusters for
//! ingress-nginx resources, classifies the migration complexity of their
//! annotations, and generates reports for planning the move to Gateway API.
//!
//! ## Features
//!
//! - **Cluster Discovery**: Finds ingress-nginx resources by class name,
//!   legacy class annotation, or nginx-specific annotations
//! - **Risk Classification**: Rates every known annotation AUTO, MANUAL,
//!   or HIGH_RISK against a built-in knowledge base
//! - **Annotation Inventory**: Aggregates usage counts, namespaces, and
//!   value distributions across the cluster
//! - **Migration Reports**: Renders markdown and JSON reports with a
//!   phased migration strategy
//!
//! ## Example
//!
//! ```rust
//! use ingress_migration_analyzer::analyze::analyze_resource;
//! use ingress_migration_analyzer::config::AnalyzerConfig;
//! use ingress_migration_analyzer::models::{IngressResource, RiskLevel};
//! use ingress_migration_analyzer::rules::RuleTable;
//!
//! let rules = RuleTable::builtin();
//! let config = AnalyzerConfig::default();
//! let resource = IngressResource {
//!     name: "web".into(),
//!     namespace: "default".into(),
//!     class_name: "nginx".into(),
//!     annotations: [(
//!         "nginx.ingress.kubernetes.io/ssl-redirect".to_string(),
//!         "true".to_string(),
//!     )]
//!     .into_iter()
//!     .collect(),
//!     labels: Default::default(),
//!     hosts: vec![],
//!     paths: vec![],
//!     created_at: None,
//! };
//! let analysis = analyze_resource(&resource, &rules, &config);
//! assert_eq!(analysis.risk_level, RiskLevel::Auto);
//! ```

pub mod analyze;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod handlers;
pub mod models;
pub mod report;
pub mod rules;

// Re-export commonly used types
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use models::{ClusterAnalysis, IngressAnalysis, IngressResource, Risk, RiskLevel};
pub use rules::RuleTable;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

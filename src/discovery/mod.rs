//! Cluster discovery: Kubernetes client construction and Ingress scanning.
//!
//! Everything that talks to the API server lives here. The rest of the
//! crate only ever sees the normalized [`crate::models::ScanResult`].

pub mod client;
pub mod scanner;

pub use client::ClusterClient;
pub use scanner::IngressScanner;

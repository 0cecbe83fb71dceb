//! Kubernetes client construction and connection verification.
//!
//! Requirements:
//! - Valid kubeconfig (uses default context or specified context), or
//!   in-cluster service account credentials
//! - RBAC permission to list Ingresses cluster-wide or in the target
//!   namespace

use crate::error::{AnalyzerError, Result};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    Client, Config,
    api::{Api, ListParams},
};
use std::path::Path;

/// A verified connection to a Kubernetes cluster.
pub struct ClusterClient {
    client: Client,
    cluster_version: String,
}

impl ClusterClient {
    /// Connect to the cluster and verify the connection.
    ///
    /// With no arguments the configuration is inferred from the
    /// environment (in-cluster credentials, then default kubeconfig).
    /// An explicit kubeconfig path or context overrides the default.
    pub async fn connect(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Self> {
        let config = match (kubeconfig, context) {
            (None, None) => Config::infer().await?,
            (path, context) => {
                let kubeconfig = match path {
                    Some(path) => kube::config::Kubeconfig::read_from(path)?,
                    None => kube::config::Kubeconfig::read()?,
                };
                Config::from_custom_kubeconfig(
                    kubeconfig,
                    &kube::config::KubeConfigOptions {
                        context: context.map(str::to_string),
                        ..Default::default()
                    },
                )
                .await?
            }
        };
        let client = Client::try_from(config)?;

        // Two-step probe: version endpoint proves reachability, the
        // namespace list proves the credentials can actually read.
        let version = client
            .apiserver_version()
            .await
            .map_err(|e| AnalyzerError::Connection(format!("cannot reach API server: {}", e)))?;
        let namespaces: Api<Namespace> = Api::all(client.clone());
        namespaces
            .list(&ListParams::default().limit(1))
            .await
            .map_err(|e| AnalyzerError::Connection(format!("cannot list namespaces: {}", e)))?;

        log::info!("connected to cluster running {}", version.git_version);

        Ok(Self {
            client,
            cluster_version: version.git_version,
        })
    }

    /// The API server version string (e.g. "v1.31.2").
    pub fn cluster_version(&self) -> &str {
        &self.cluster_version
    }

    /// The underlying kube client.
    pub fn client(&self) -> Client {
        self.client.clone()
    }
}

//! Ingress discovery and nginx-resource filtering.
//!
//! Lists `networking.k8s.io/v1` Ingresses, keeps the ones managed by
//! ingress-nginx, and normalizes them into [`IngressResource`]s. The
//! filter and the conversion are pure functions so they are testable
//! without a cluster.

use crate::analyze::LEGACY_CLASS_ANNOTATION;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::models::{IngressResource, ScanResult};
use chrono::Utc;
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::{Api, ListParams};

/// Scans a cluster for ingress-nginx resources.
pub struct IngressScanner {
    client: kube::Client,
    config: AnalyzerConfig,
}

impl IngressScanner {
    pub fn new(client: kube::Client, config: AnalyzerConfig) -> Self {
        Self { client, config }
    }

    /// List Ingresses (one namespace or all) and keep the nginx ones.
    pub async fn scan(
        &self,
        namespace: Option<&str>,
        cluster_version: &str,
    ) -> Result<ScanResult> {
        let api: Api<Ingress> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };

        let list = api.list(&ListParams::default()).await?;
        let total_ingresses = list.items.len();
        log::debug!("listed {} ingresses", total_ingresses);

        let mut nginx_ingresses: Vec<IngressResource> = list
            .items
            .iter()
            .filter(|ingress| is_nginx_ingress(ingress, &self.config))
            .map(convert_ingress)
            .collect();
        // List order is server-defined; sort for stable output.
        nginx_ingresses.sort_by(|a, b| {
            a.namespace
                .cmp(&b.namespace)
                .then_with(|| a.name.cmp(&b.name))
        });

        log::info!(
            "found {} nginx ingresses out of {} total",
            nginx_ingresses.len(),
            total_ingresses
        );

        Ok(ScanResult {
            cluster_version: cluster_version.to_string(),
            total_ingresses,
            nginx_ingresses,
            scan_time: Utc::now(),
        })
    }
}

/// Decide whether an Ingress is managed by ingress-nginx.
///
/// True when any of:
/// - `spec.ingressClassName` is "nginx" or starts with "nginx-"
/// - the legacy `kubernetes.io/ingress.class` annotation says "nginx"
/// - any annotation key carries the managed prefix
pub fn is_nginx_ingress(ingress: &Ingress, config: &AnalyzerConfig) -> bool {
    if let Some(class) = ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.ingress_class_name.as_deref())
        && (class == "nginx" || class.starts_with("nginx-"))
    {
        return true;
    }

    if let Some(annotations) = ingress.metadata.annotations.as_ref() {
        if annotations
            .get(LEGACY_CLASS_ANNOTATION)
            .is_some_and(|v| v == "nginx")
        {
            return true;
        }
        if annotations.keys().any(|key| config.is_managed(key)) {
            return true;
        }
    }

    false
}

/// Normalize a raw Ingress into the analyzer's resource model.
///
/// The annotation and label maps are always present afterwards, hosts
/// and paths are deduplicated, and the class name falls back to the
/// legacy annotation when the spec field is unset.
pub fn convert_ingress(ingress: &Ingress) -> IngressResource {
    let metadata = &ingress.metadata;
    let annotations = metadata.annotations.clone().unwrap_or_default();
    let labels = metadata.labels.clone().unwrap_or_default();

    let class_name = ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.ingress_class_name.clone())
        .or_else(|| annotations.get(LEGACY_CLASS_ANNOTATION).cloned())
        .unwrap_or_default();

    let mut hosts = Vec::new();
    let mut paths = Vec::new();
    if let Some(rules) = ingress.spec.as_ref().and_then(|spec| spec.rules.as_ref()) {
        for rule in rules {
            if let Some(host) = rule.host.as_ref()
                && !host.is_empty()
                && !hosts.contains(host)
            {
                hosts.push(host.clone());
            }
            if let Some(http) = rule.http.as_ref() {
                for path in &http.paths {
                    if let Some(p) = path.path.as_ref()
                        && !p.is_empty()
                        && !paths.contains(p)
                    {
                        paths.push(p.clone());
                    }
                }
            }
        }
    }

    IngressResource {
        name: metadata.name.clone().unwrap_or_default(),
        namespace: metadata
            .namespace
            .clone()
            .unwrap_or_else(|| "default".to_string()),
        class_name,
        annotations,
        labels,
        hosts,
        paths,
        created_at: metadata.creation_timestamp.as_ref().map(|t| t.0),
    }
}

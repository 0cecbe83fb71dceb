//! The per-resource analysis pass and cluster-wide summary.
//!
//! This module is the pure core of the pipeline: it takes discovered
//! [`IngressResource`]s plus the rule table and produces classification
//! results. No I/O happens here; errors cannot occur.

pub mod inventory;

use crate::config::AnalyzerConfig;
use crate::models::{
    AnalysisSummary, ClusterAnalysis, IngressAnalysis, IngressResource, RiskLevel, ScanResult,
};
use crate::rules::{RuleTable, resolve_risk};

/// Legacy class annotation deprecated since Kubernetes 1.18.
pub const LEGACY_CLASS_ANNOTATION: &str = "kubernetes.io/ingress.class";

/// Analyze a single Ingress resource against the rule table.
///
/// Produces the matched rules, the resolved overall risk, the unknown
/// managed-prefix annotations, and any migration warnings. The result
/// is immutable once built.
pub fn analyze_resource(
    resource: &IngressResource,
    rules: &RuleTable,
    config: &AnalyzerConfig,
) -> IngressAnalysis {
    let matched: Vec<_> = rules
        .match_annotations(&resource.annotations)
        .into_iter()
        .cloned()
        .collect();
    let risk_level = resolve_risk(matched.iter());
    let unknown_annotations = rules.unknown_keys(&resource.annotations, &config.managed_prefix);

    let mut warnings = Vec::new();
    for rule in &matched {
        if rule.pattern.ends_with("-snippet") {
            warnings.push(format!(
                "Contains {}: requires manual review and reimplementation",
                rule.name
            ));
        }
    }
    if !unknown_annotations.is_empty() {
        warnings.push(format!(
            "Contains {} unknown nginx annotations that need investigation",
            unknown_annotations.len()
        ));
    }
    if resource.annotations.contains_key(LEGACY_CLASS_ANNOTATION) {
        warnings.push(format!(
            "Uses deprecated {} annotation; migrate to spec.ingressClassName",
            LEGACY_CLASS_ANNOTATION
        ));
    }

    IngressAnalysis {
        resource: resource.clone(),
        matched_rules: matched,
        risk_level,
        unknown_annotations,
        warnings,
    }
}

/// Fold per-resource analyses into cluster-wide statistics.
///
/// Counts each analysis exactly once, globally and in its namespace
/// bucket, so `auto + manual + high == total` holds at both levels.
pub fn summarize(analyses: &[IngressAnalysis]) -> AnalysisSummary {
    let mut summary = AnalysisSummary {
        total_ingresses: analyses.len(),
        ..Default::default()
    };

    for analysis in analyses {
        let ns = summary
            .by_namespace
            .entry(analysis.resource.namespace.clone())
            .or_default();
        match analysis.risk_level {
            RiskLevel::Auto => {
                summary.auto_count += 1;
                ns.auto_count += 1;
            }
            RiskLevel::Manual => {
                summary.manual_count += 1;
                ns.manual_count += 1;
            }
            RiskLevel::High => {
                summary.high_risk_count += 1;
                ns.high_risk_count += 1;
            }
        }
    }

    summary
}

/// Run the full analysis over a scan result.
///
/// When `with_inventory` is set the annotation inventory is built and
/// attached; the `scan` command skips it, the `inventory` command needs it.
pub fn analyze_cluster(
    scan_result: ScanResult,
    rules: &RuleTable,
    config: &AnalyzerConfig,
    with_inventory: bool,
) -> ClusterAnalysis {
    let analyses: Vec<_> = scan_result
        .nginx_ingresses
        .iter()
        .map(|resource| analyze_resource(resource, rules, config))
        .collect();
    let summary = summarize(&analyses);
    let inventory = with_inventory
        .then(|| inventory::AnnotationInventory::build(&analyses, rules, config));

    ClusterAnalysis {
        scan_result,
        analyses,
        summary,
        inventory,
    }
}

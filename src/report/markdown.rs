//! Markdown migration report.
//!
//! Renders the per-cluster analysis as a human-readable report: header,
//! executive summary, high-risk spotlight, namespace breakdown, full
//! resource details, and general recommendations. Every section sorts
//! its rows before emitting so identical analyses render identically.

use crate::models::{AnnotationRule, ClusterAnalysis, IngressAnalysis, RiskLevel};
use std::collections::BTreeMap;

/// Render the full migration report.
pub fn render(analysis: &ClusterAnalysis, context: Option<&str>) -> String {
    let mut out = String::new();
    write_header(&mut out, analysis, context);
    write_executive_summary(&mut out, analysis);
    if analysis.summary.high_risk_count > 0 {
        write_high_risk_resources(&mut out, analysis);
    }
    write_namespace_analysis(&mut out, analysis);
    write_detailed_analysis(&mut out, analysis);
    write_recommendations(&mut out, analysis);
    out
}

fn write_header(out: &mut String, analysis: &ClusterAnalysis, context: Option<&str>) {
    out.push_str("# Ingress-NGINX Migration Report\n\n");
    out.push_str(&format!(
        "**Generated**: {}\n",
        analysis.scan_result.scan_time.format("%Y-%m-%d %H:%M:%S")
    ));
    if let Some(context) = context {
        out.push_str(&format!("**Cluster Context**: {}\n", context));
    }
    out.push_str(&format!(
        "**Cluster Version**: {}\n",
        analysis.scan_result.cluster_version
    ));
    out.push_str(&format!(
        "**Total Ingress Resources**: {}\n",
        analysis.scan_result.total_ingresses
    ));
    out.push_str(&format!(
        "**Ingress-NGINX Resources**: {}\n",
        analysis.scan_result.nginx_ingresses.len()
    ));
    out.push_str("\n---\n\n");
}

fn write_executive_summary(out: &mut String, analysis: &ClusterAnalysis) {
    let summary = &analysis.summary;
    out.push_str("## Executive Summary\n\n");

    if summary.total_ingresses == 0 {
        out.push_str(
            "🎉 **No ingress-nginx resources found!** Your cluster is already using \
             other ingress solutions.\n\n",
        );
        return;
    }

    let total = summary.total_ingresses as f64;
    let pct = |count: usize| (count as f64 / total * 100.0).round();
    out.push_str(&format!(
        "- ✅ **AUTO-MIGRATABLE**: {} ({:.0}%)\n",
        summary.auto_count,
        pct(summary.auto_count)
    ));
    out.push_str(&format!(
        "- ⚠️  **MANUAL REVIEW**: {} ({:.0}%)\n",
        summary.manual_count,
        pct(summary.manual_count)
    ));
    out.push_str(&format!(
        "- ❌ **HIGH RISK**: {} ({:.0}%)\n",
        summary.high_risk_count,
        pct(summary.high_risk_count)
    ));

    out.push_str("\n### Migration Complexity Levels\n\n");
    out.push_str("- **✅ AUTO-MIGRATABLE**: Simple annotations with direct Gateway API equivalents\n");
    out.push_str("- **⚠️ MANUAL REVIEW**: Requires review but migration path exists\n");
    out.push_str("- **❌ HIGH RISK**: Complex configurations requiring careful planning\n");
    out.push_str("\n---\n\n");
}

fn write_high_risk_resources(out: &mut String, analysis: &ClusterAnalysis) {
    out.push_str("## High-Risk Resources (Immediate Attention Required)\n\n");
    out.push_str("These resources use complex annotations that require careful migration planning.\n\n");

    let mut by_namespace: BTreeMap<&str, Vec<&IngressAnalysis>> = BTreeMap::new();
    for a in &analysis.analyses {
        if a.risk_level == RiskLevel::High {
            by_namespace
                .entry(a.resource.namespace.as_str())
                .or_default()
                .push(a);
        }
    }

    for (namespace, entries) in by_namespace {
        out.push_str(&format!("### Namespace: {}\n\n", namespace));
        for a in entries {
            let names: Vec<&str> = rules_by_risk(&a.matched_rules, RiskLevel::High)
                .map(|rule| rule.name)
                .collect();
            out.push_str(&format!(
                "- **{}** - Uses: {}\n",
                a.resource.name,
                names.join(", ")
            ));
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
}

fn write_namespace_analysis(out: &mut String, analysis: &ClusterAnalysis) {
    // A single-namespace table repeats the executive summary.
    if analysis.summary.by_namespace.len() <= 1 {
        return;
    }

    out.push_str("## Analysis by Namespace\n\n");
    out.push_str("| Namespace | AUTO | MANUAL | HIGH RISK | Total |\n");
    out.push_str("|-----------|------|--------|-----------|-------|\n");
    for (namespace, ns) in &analysis.summary.by_namespace {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            namespace,
            ns.auto_count,
            ns.manual_count,
            ns.high_risk_count,
            ns.total()
        ));
    }
    out.push_str("\n---\n\n");
}

fn write_detailed_analysis(out: &mut String, analysis: &ClusterAnalysis) {
    out.push_str("## Detailed Resource Analysis\n\n");

    let mut analyses: Vec<&IngressAnalysis> = analysis.analyses.iter().collect();
    analyses.sort_by(|a, b| {
        a.resource
            .namespace
            .cmp(&b.resource.namespace)
            .then_with(|| a.resource.name.cmp(&b.resource.name))
    });

    for a in analyses {
        write_resource_details(out, a);
    }
}

fn write_resource_details(out: &mut String, analysis: &IngressAnalysis) {
    let resource = &analysis.resource;
    out.push_str(&format!(
        "### {} {}/{}\n\n",
        analysis.risk_level.icon(),
        resource.namespace,
        resource.name
    ));
    out.push_str(&format!("- **Risk Level**: {}\n", analysis.risk_level));
    out.push_str(&format!("- **Ingress Class**: {}\n", resource.class_name));
    if !resource.hosts.is_empty() {
        out.push_str(&format!("- **Hosts**: {}\n", resource.hosts.join(", ")));
    }

    if !analysis.matched_rules.is_empty() {
        out.push_str("- **Annotations**:\n");
        for level in [RiskLevel::Auto, RiskLevel::Manual, RiskLevel::High] {
            for rule in rules_by_risk(&analysis.matched_rules, level) {
                let value = resource
                    .annotations
                    .get(rule.pattern)
                    .map(String::as_str)
                    .unwrap_or_default();
                out.push_str(&format!(
                    "  - {} {}: `{}` → {}",
                    level.icon(),
                    rule.name,
                    value,
                    rule.migration_note
                ));
                if !rule.source_url.is_empty() {
                    out.push_str(&format!(" ([docs]({}))", rule.source_url));
                }
                out.push('\n');
            }
        }
    }

    if !analysis.unknown_annotations.is_empty() {
        out.push_str("- **Unknown NGINX Annotations**:\n");
        for key in &analysis.unknown_annotations {
            let value = resource
                .annotations
                .get(key)
                .map(String::as_str)
                .unwrap_or_default();
            out.push_str(&format!("  - ❓ {}: `{}`\n", key, value));
        }
    }

    if !analysis.warnings.is_empty() {
        out.push_str("- **Warnings**:\n");
        for warning in &analysis.warnings {
            out.push_str(&format!("  - ⚠️  {}\n", warning));
        }
    }

    if analysis.risk_level == RiskLevel::High {
        out.push_str("\n**Migration Notes**:\n");
        for rule in rules_by_risk(&analysis.matched_rules, RiskLevel::High) {
            out.push_str(&format!("- {}\n", rule.migration_note));
        }
    }

    out.push('\n');
}

fn write_recommendations(out: &mut String, analysis: &ClusterAnalysis) {
    out.push_str("## Migration Recommendations\n\n");

    let summary = &analysis.summary;
    if summary.total_ingresses == 0 {
        out.push_str("No ingress-nginx resources found - no migration needed!\n");
        return;
    }

    out.push_str("### General Guidance\n\n");
    if summary.auto_count > 0 {
        out.push_str(&format!(
            "1. **Start with AUTO-MIGRATABLE resources** ({} resources)\n",
            summary.auto_count
        ));
        out.push_str("   - These have direct Gateway API equivalents\n");
        out.push_str("   - Low risk for initial migration testing\n\n");
    }
    if summary.manual_count > 0 {
        out.push_str(&format!(
            "2. **Plan MANUAL REVIEW resources** ({} resources)\n",
            summary.manual_count
        ));
        out.push_str("   - Check your Gateway implementation's policy support\n");
        out.push_str("   - Consider service mesh alternatives\n");
        out.push_str("   - May require application-level changes\n\n");
    }
    if summary.high_risk_count > 0 {
        out.push_str(&format!(
            "3. **HIGH RISK resources require careful planning** ({} resources)\n",
            summary.high_risk_count
        ));
        out.push_str("   - Custom NGINX configurations have no direct equivalent\n");
        out.push_str("   - Consider staying with NGINX Inc commercial controller\n");
        out.push_str("   - Evaluate service mesh for complex routing needs\n\n");
    }

    out.push_str("### Next Steps\n\n");
    out.push_str("1. Review this report with your platform team\n");
    out.push_str("2. Choose a Gateway API implementation (Istio, Kong, Contour, etc.)\n");
    out.push_str("3. Set up a test cluster for migration validation\n");
    out.push_str("4. Start with AUTO-MIGRATABLE resources for proof of concept\n");
    out.push_str("5. Develop migration runbooks for MANUAL and HIGH RISK resources\n");
}

fn rules_by_risk(
    rules: &[AnnotationRule],
    level: RiskLevel,
) -> impl Iterator<Item = &AnnotationRule> {
    rules.iter().filter(move |rule| rule.risk_level == level)
}

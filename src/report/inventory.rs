//! Markdown annotation-inventory report.
//!
//! Renders the aggregated annotation inventory: executive summary, the
//! critical-annotation ranking, per-risk breakdowns, the unknown table,
//! optional detailed usage analysis, and a phased migration strategy
//! with namespace complexity labels.

use crate::analyze::inventory::{AnnotationInventory, InventorySort, UsageRecord};
use crate::config::AnalyzerConfig;
use crate::models::{ClusterAnalysis, Risk, RiskLevel};

/// Display options for the inventory report.
#[derive(Debug, Clone, Default)]
pub struct InventoryReportOptions {
    /// Include the detailed usage and value-frequency sections.
    pub detailed: bool,
    /// Sort order for the unknown and detailed tables.
    pub sort: InventorySort,
    /// Number of entries in the critical-annotation ranking.
    pub top_n: usize,
    /// Kubeconfig context name shown in the header.
    pub context: Option<String>,
}

/// Render the full inventory report.
pub fn render(
    inventory: &AnnotationInventory,
    analysis: &ClusterAnalysis,
    config: &AnalyzerConfig,
    options: &InventoryReportOptions,
) -> String {
    let mut out = String::new();
    write_header(&mut out, inventory, analysis, options);
    write_summary(&mut out, inventory);
    write_critical(&mut out, inventory, options.top_n);
    write_by_risk(&mut out, inventory, config);
    if !inventory.unknown.is_empty() {
        write_unknown(&mut out, inventory, config, options.sort);
    }
    if options.detailed {
        write_detailed_usage(&mut out, inventory, config, options.sort);
    }
    write_strategy(&mut out, inventory, config);
    write_footer(&mut out);
    out
}

fn write_header(
    out: &mut String,
    inventory: &AnnotationInventory,
    analysis: &ClusterAnalysis,
    options: &InventoryReportOptions,
) {
    out.push_str("# NGINX Ingress Annotation Inventory Report\n\n");
    out.push_str(&format!(
        "**Generated**: {}\n",
        analysis.scan_result.scan_time.format("%Y-%m-%d %H:%M:%S")
    ));
    if let Some(context) = options.context.as_deref() {
        out.push_str(&format!("**Cluster Context**: {}\n", context));
    }
    out.push_str(&format!(
        "**Cluster Version**: {}\n",
        analysis.scan_result.cluster_version
    ));
    out.push_str(&format!(
        "**Total Ingress Resources Scanned**: {}\n",
        analysis.scan_result.total_ingresses
    ));
    out.push_str(&format!(
        "**Total Unique Annotations Found**: {}\n",
        inventory.summary.total_unique_keys
    ));
    out.push_str(&format!(
        "**Classified NGINX Annotations**: {}\n",
        inventory.summary.known_count
    ));
    out.push_str("\n---\n\n");
}

fn write_summary(out: &mut String, inventory: &AnnotationInventory) {
    out.push_str("## Executive Summary\n\n");

    if inventory.summary.total_unique_keys == 0 {
        out.push_str(
            "🎉 **No annotations found!** Your ingress resources are using minimal \
             configuration.\n\n",
        );
        return;
    }

    out.push_str(&format!(
        "This cluster uses **{} unique annotations** across all ingress resources.\n",
        inventory.summary.total_unique_keys
    ));
    out.push_str(&format!(
        "Of these, **{} are classified NGINX** annotations that will need migration \
         attention.\n\n",
        inventory.summary.known_count
    ));
    out.push_str(
        "ℹ️  **Note**: System annotations (like `kubectl.kubernetes.io/*`) are \
         automatically filtered out from this analysis as they are not relevant for \
         migration planning.\n\n",
    );

    if inventory.summary.unknown_count > 0 {
        out.push_str(&format!(
            "⚠️  **{} unknown NGINX annotations** were found - these require immediate \
             investigation.\n\n",
            inventory.summary.unknown_count
        ));
    }

    if let Some(key) = inventory.summary.most_used_key.as_deref()
        && let Some(record) = inventory.all.get(key)
    {
        out.push_str(&format!(
            "📈 **Most frequently used annotation**: `{}` (used {} times across {} \
             namespaces)\n\n",
            key,
            record.usage_count,
            record.namespaces.len()
        ));
    }

    out.push_str("---\n\n");
}

fn write_critical(out: &mut String, inventory: &AnnotationInventory, top_n: usize) {
    let critical = inventory.most_critical(top_n);

    if critical.is_empty() {
        out.push_str("## Critical Annotations\n\n");
        out.push_str(
            "✅ **No critical annotations found!** This is excellent news for your \
             migration.\n\n",
        );
        out.push_str("---\n\n");
        return;
    }

    out.push_str("## Critical Annotations (Migration Priority)\n\n");
    out.push_str("These annotations require immediate attention for migration planning:\n\n");
    out.push_str("| Rank | Annotation | Usage Count | Namespaces | Risk Level | Description |\n");
    out.push_str("|------|------------|-------------|------------|------------|-------------|\n");

    for (i, record) in critical.iter().enumerate() {
        let risk = record.risk.unwrap_or(Risk::Unknown);
        out.push_str(&format!(
            "| {} | `{}` | {} | {} | {} {} | {} |\n",
            i + 1,
            record.key,
            record.usage_count,
            record.namespaces.len(),
            risk.icon(),
            risk,
            record.description.as_deref().unwrap_or_default()
        ));
    }

    out.push_str("\n---\n\n");
}

fn write_by_risk(out: &mut String, inventory: &AnnotationInventory, config: &AnalyzerConfig) {
    out.push_str("## Annotations by Migration Risk Level\n\n");

    let by_risk = inventory.by_risk();
    for level in [RiskLevel::Auto, RiskLevel::Manual, RiskLevel::High] {
        let Some(records) = by_risk.get(&level) else {
            continue;
        };
        out.push_str(&format!(
            "### {} {} ({} annotations)\n\n",
            level.icon(),
            level,
            records.len()
        ));

        let limit = config.max_annotations_per_risk_level;
        for record in records.iter().take(limit) {
            out.push_str(&format!(
                "- `{}` - used {} times",
                record.key, record.usage_count
            ));
            if let Some(note) = record.migration_note.as_deref() {
                out.push_str(&format!(" → {}", note));
            }
            if let Some(url) = record.source_url.as_deref() {
                out.push_str(&format!(" ([docs]({}))", url));
            }
            out.push('\n');
        }
        if records.len() > limit {
            out.push_str(&format!("   ... and {} more\n", records.len() - limit));
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
}

fn write_unknown(
    out: &mut String,
    inventory: &AnnotationInventory,
    config: &AnalyzerConfig,
    sort: InventorySort,
) {
    out.push_str("## Unknown NGINX Annotations\n\n");
    out.push_str("These annotations are not in our knowledge base and require manual research:\n\n");
    out.push_str("| Annotation | Usage Count | Namespaces | Example Values |\n");
    out.push_str("|------------|-------------|------------|----------------|\n");

    let mut unknown: Vec<&UsageRecord> = inventory.unknown.values().collect();
    sort_records(&mut unknown, sort);
    for record in unknown {
        let namespaces: Vec<&str> = record.namespaces.iter().map(String::as_str).collect();
        out.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            record.key,
            record.usage_count,
            namespaces.join(", "),
            format_value_examples(record, config.max_value_examples)
        ));
    }

    out.push_str(
        "\n**Action Required**: Research these annotations in the \
         [NGINX documentation](https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/) \
         and determine Gateway API equivalents.\n\n",
    );
    out.push_str("---\n\n");
}

fn write_detailed_usage(
    out: &mut String,
    inventory: &AnnotationInventory,
    config: &AnalyzerConfig,
    sort: InventorySort,
) {
    out.push_str("## Detailed Usage Analysis\n\n");

    let mut managed: Vec<&UsageRecord> = inventory
        .all
        .values()
        .filter(|r| r.risk.is_some())
        .collect();
    sort_records(&mut managed, sort);

    out.push_str("### All NGINX Annotations\n\n");
    out.push_str("| Annotation | Usage | Namespaces | Unique Values | Risk | Migration Note |\n");
    out.push_str("|------------|-------|------------|---------------|------|----------------|\n");
    for record in &managed {
        let risk = record.risk.unwrap_or(Risk::Unknown);
        let namespaces: Vec<&str> = record.namespaces.iter().map(String::as_str).collect();
        out.push_str(&format!(
            "| `{}` | {} | {} | {} | {} | {} |\n",
            record.key,
            record.usage_count,
            namespaces.join(", "),
            record.value_histogram.len(),
            risk.icon(),
            record.migration_note.as_deref().unwrap_or_default()
        ));
    }
    out.push('\n');

    out.push_str("### Value Frequency Analysis\n\n");
    out.push_str("Most common values for frequently used annotations:\n\n");
    for record in managed.iter().take(5) {
        if record.value_histogram.len() <= 1 {
            continue;
        }
        out.push_str(&format!("#### `{}`\n\n", record.key));
        for (value, count) in record
            .values_by_frequency()
            .into_iter()
            .take(config.max_value_examples)
        {
            out.push_str(&format!("- `{}`: {} times\n", value, count));
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
}

fn write_strategy(out: &mut String, inventory: &AnnotationInventory, config: &AnalyzerConfig) {
    out.push_str("## Migration Strategy Recommendations\n\n");

    let by_risk = inventory.by_risk();
    let phases = [
        (RiskLevel::Auto, "Phase 1: Auto-Migratable (Low Risk)", "can be migrated automatically"),
        (RiskLevel::Manual, "Phase 2: Manual Review Required (Medium Risk)", "require manual review"),
        (RiskLevel::High, "Phase 3: High Risk (Complex Migration)", "require complex migration planning"),
    ];

    for (level, heading, verb) in phases {
        out.push_str(&format!("### {}\n", heading));
        match by_risk.get(&level) {
            Some(records) if !records.is_empty() => {
                out.push_str(&format!("**{} annotations** {}:\n\n", records.len(), verb));
                for record in records.iter().take(5) {
                    out.push_str(&format!(
                        "- `{}` → {}\n",
                        record.key,
                        record.migration_note.as_deref().unwrap_or_default()
                    ));
                }
                if records.len() > 5 {
                    out.push_str(&format!("... and {} more\n", records.len() - 5));
                }
            }
            _ => {
                out.push_str(&format!("No {} annotations found.\n", level.as_str()));
            }
        }
        out.push('\n');
    }

    let complexity = inventory.namespace_complexity(config);
    if complexity.len() > 1 {
        out.push_str("### Namespace-Specific Considerations\n\n");
        out.push_str("Migration complexity by namespace:\n\n");
        for (namespace, label) in &complexity {
            out.push_str(&format!("- **{}**: {} complexity\n", namespace, label));
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
}

fn write_footer(out: &mut String) {
    out.push_str("## Additional Resources\n\n");
    out.push_str("- [Gateway API Documentation](https://gateway-api.sigs.k8s.io/)\n");
    out.push_str("- [NGINX Ingress Annotations](https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/)\n");
}

fn sort_records(records: &mut [&UsageRecord], sort: InventorySort) {
    match sort {
        InventorySort::Usage => records.sort_by(|a, b| {
            b.usage_count
                .cmp(&a.usage_count)
                .then_with(|| a.key.cmp(&b.key))
        }),
        InventorySort::Risk => records.sort_by(|a, b| {
            let rank = |r: &UsageRecord| r.risk.map_or(0, |risk| risk.criticality() + 1);
            rank(b)
                .cmp(&rank(a))
                .then_with(|| b.usage_count.cmp(&a.usage_count))
                .then_with(|| a.key.cmp(&b.key))
        }),
        InventorySort::Name => records.sort_by(|a, b| a.key.cmp(&b.key)),
        InventorySort::Namespace => records.sort_by(|a, b| {
            b.namespaces
                .len()
                .cmp(&a.namespaces.len())
                .then_with(|| b.usage_count.cmp(&a.usage_count))
                .then_with(|| a.key.cmp(&b.key))
        }),
    }
}

fn format_value_examples(record: &UsageRecord, limit: usize) -> String {
    let values = record.values_by_frequency();
    let mut examples: Vec<String> = values
        .iter()
        .take(limit)
        .map(|(value, count)| format!("`{}`({})", value, count))
        .collect();
    if values.len() > limit {
        examples.push("...".to_string());
    }
    examples.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze_cluster;
    use crate::models::{IngressResource, ScanResult};
    use crate::rules::RuleTable;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn resource(name: &str, namespace: &str, pairs: &[(&str, &str)]) -> IngressResource {
        IngressResource {
            name: name.to_string(),
            namespace: namespace.to_string(),
            class_name: "nginx".to_string(),
            annotations: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            labels: BTreeMap::new(),
            hosts: vec![],
            paths: vec![],
            created_at: None,
        }
    }

    fn analyze(resources: Vec<IngressResource>) -> ClusterAnalysis {
        let total = resources.len();
        analyze_cluster(
            ScanResult {
                cluster_version: "v1.31.0".to_string(),
                total_ingresses: total,
                nginx_ingresses: resources,
                scan_time: Utc::now(),
            },
            &RuleTable::builtin(),
            &AnalyzerConfig::default(),
            true,
        )
    }

    fn render_default(analysis: &ClusterAnalysis, detailed: bool) -> String {
        let inventory = analysis.inventory.as_ref().unwrap();
        render(
            inventory,
            analysis,
            &AnalyzerConfig::default(),
            &InventoryReportOptions {
                detailed,
                top_n: 10,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_inventory_report_sections() {
        let analysis = analyze(vec![
            resource("web", "prod", &[
                ("nginx.ingress.kubernetes.io/server-snippet", "return 404;"),
                ("nginx.ingress.kubernetes.io/mystery", "on"),
            ]),
            resource("api", "staging", &[
                ("nginx.ingress.kubernetes.io/ssl-redirect", "true"),
            ]),
        ]);
        let report = render_default(&analysis, false);

        assert!(report.contains("# NGINX Ingress Annotation Inventory Report"));
        assert!(report.contains("## Critical Annotations (Migration Priority)"));
        assert!(report.contains("## Unknown NGINX Annotations"));
        assert!(report.contains("`nginx.ingress.kubernetes.io/mystery`"));
        assert!(report.contains("### Phase 3: High Risk"));
        // Not requested, so absent.
        assert!(!report.contains("## Detailed Usage Analysis"));
    }

    #[test]
    fn test_detailed_section_rendered_on_request() {
        let analysis = analyze(vec![
            resource("a", "ns1", &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")]),
            resource("b", "ns1", &[("nginx.ingress.kubernetes.io/ssl-redirect", "false")]),
        ]);
        let report = render_default(&analysis, true);
        assert!(report.contains("## Detailed Usage Analysis"));
        assert!(report.contains("### Value Frequency Analysis"));
    }

    #[test]
    fn test_empty_inventory_report() {
        let analysis = analyze(vec![]);
        let report = render_default(&analysis, false);
        assert!(report.contains("No annotations found"));
        assert!(report.contains("No critical annotations found"));
    }

    #[test]
    fn test_namespace_sort_orders_by_spread() {
        let analysis = analyze(vec![
            resource("a", "ns1", &[("nginx.ingress.kubernetes.io/rewrite-target", "/")]),
            resource("b", "ns1", &[("nginx.ingress.kubernetes.io/rewrite-target", "/")]),
            resource("c", "ns1", &[("nginx.ingress.kubernetes.io/rewrite-target", "/")]),
            resource("d", "ns1", &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")]),
            resource("e", "ns2", &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")]),
        ]);
        let inventory = analysis.inventory.as_ref().unwrap();
        let mut records: Vec<&UsageRecord> = inventory
            .all
            .values()
            .filter(|r| r.risk.is_some())
            .collect();

        // ssl-redirect spans two namespaces, rewrite-target only one.
        sort_records(&mut records, InventorySort::Namespace);
        assert_eq!(records[0].key, "nginx.ingress.kubernetes.io/ssl-redirect");
        assert_eq!(records[1].key, "nginx.ingress.kubernetes.io/rewrite-target");

        // Usage order flips them: rewrite-target has three uses.
        sort_records(&mut records, InventorySort::Usage);
        assert_eq!(records[0].key, "nginx.ingress.kubernetes.io/rewrite-target");
    }

    #[test]
    fn test_namespace_complexity_section_needs_multiple_namespaces() {
        let analysis = analyze(vec![
            resource("a", "only-ns", &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")]),
        ]);
        let report = render_default(&analysis, false);
        assert!(!report.contains("Namespace-Specific Considerations"));
    }
}

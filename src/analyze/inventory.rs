//! Annotation inventory: cluster-wide aggregation of annotation usage.
//!
//! The inventory folds every analyzed resource's annotations (minus
//! operational noise) into per-key usage records, splits them into
//! known and unknown views, ranks the most critical keys, and scores
//! per-namespace migration complexity. All containers are ordered maps
//! and sets so two runs over the same resources produce identical
//! output regardless of input order.

use crate::config::AnalyzerConfig;
use crate::models::{IngressAnalysis, Risk, RiskLevel};
use crate::rules::RuleTable;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Aggregated usage of a single annotation key across the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// The annotation key.
    pub key: String,
    /// Number of resource occurrences of this key.
    pub usage_count: u64,
    /// Namespaces in which the key appears.
    pub namespaces: BTreeSet<String>,
    /// Distinct values with their occurrence counts.
    pub value_histogram: BTreeMap<String, u64>,
    /// Classification, if the key is in scope for risk analysis.
    /// Keys outside the managed prefix with no rule carry `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<Risk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migration_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl UsageRecord {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            usage_count: 0,
            namespaces: BTreeSet::new(),
            value_histogram: BTreeMap::new(),
            risk: None,
            description: None,
            migration_note: None,
            source_url: None,
        }
    }

    fn record_use(&mut self, namespace: &str, value: &str) {
        self.usage_count += 1;
        self.namespaces.insert(namespace.to_string());
        *self.value_histogram.entry(value.to_string()).or_insert(0) += 1;
    }

    /// Values ordered by frequency (descending), then value text.
    pub fn values_by_frequency(&self) -> Vec<(&str, u64)> {
        let mut values: Vec<_> = self
            .value_histogram
            .iter()
            .map(|(v, n)| (v.as_str(), *n))
            .collect();
        values.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        values
    }
}

/// Roll-up statistics over the inventory.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_unique_keys: usize,
    pub known_count: usize,
    pub unknown_count: usize,
    /// Key with the highest usage count; ties break toward the
    /// lexicographically smallest key. `None` for an empty inventory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_used_key: Option<String>,
}

/// Namespace migration complexity label derived from the high-risk
/// share of annotation usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ComplexityLabel {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

impl ComplexityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for ComplexityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort order for inventory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventorySort {
    /// Highest usage first, key ascending on ties.
    #[default]
    Usage,
    /// Most critical risk first, then usage, then key.
    Risk,
    /// Key ascending.
    Name,
    /// Widest namespace spread first, then usage, then key.
    Namespace,
}

/// The complete annotation inventory for one analysis run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationInventory {
    /// Every non-noise annotation key observed.
    pub all: BTreeMap<String, UsageRecord>,
    /// Keys classified by a rule.
    pub known: BTreeMap<String, UsageRecord>,
    /// Managed-prefix keys without a rule. Disjoint from `known`.
    pub unknown: BTreeMap<String, UsageRecord>,
    pub summary: InventorySummary,
}

impl AnnotationInventory {
    /// Build the inventory from per-resource analyses.
    ///
    /// Iterates annotations in key order per resource, so the result
    /// depends only on the multiset of (namespace, key, value) triples,
    /// never on input ordering.
    pub fn build(
        analyses: &[IngressAnalysis],
        rules: &RuleTable,
        config: &AnalyzerConfig,
    ) -> Self {
        let mut all: BTreeMap<String, UsageRecord> = BTreeMap::new();

        for analysis in analyses {
            let namespace = &analysis.resource.namespace;
            for (key, value) in &analysis.resource.annotations {
                if config.is_noise(key) {
                    continue;
                }
                all.entry(key.clone())
                    .or_insert_with(|| UsageRecord::new(key))
                    .record_use(namespace, value);
            }
        }

        let mut known = BTreeMap::new();
        let mut unknown = BTreeMap::new();
        for (key, record) in &mut all {
            if let Some(rule) = rules.lookup(key) {
                record.risk = Some(Risk::Known(rule.risk_level));
                record.description = Some(rule.description.to_string());
                record.migration_note = Some(rule.migration_note.to_string());
                record.source_url = Some(rule.source_url.to_string());
                known.insert(key.clone(), record.clone());
            } else if config.is_managed(key) {
                record.risk = Some(Risk::Unknown);
                record.description = Some("Unclassified nginx annotation".to_string());
                record.migration_note = Some(
                    "Not in the knowledge base. Review the ingress-nginx documentation \
                     and verify Gateway API support manually."
                        .to_string(),
                );
                unknown.insert(key.clone(), record.clone());
            }
        }

        let most_used_key = all
            .values()
            .max_by(|a, b| {
                // max_by keeps the later element on ties; comparing keys in
                // reverse makes the lexicographically smallest key win.
                a.usage_count
                    .cmp(&b.usage_count)
                    .then_with(|| b.key.cmp(&a.key))
            })
            .map(|r| r.key.clone());

        let summary = InventorySummary {
            total_unique_keys: all.len(),
            known_count: known.len(),
            unknown_count: unknown.len(),
            most_used_key,
        };

        Self {
            all,
            known,
            unknown,
            summary,
        }
    }

    /// Rank the most critical annotation keys.
    ///
    /// Candidates are known high-risk keys plus all unknown keys.
    /// Ordered by usage count descending, key ascending on ties, and
    /// truncated to `limit`.
    pub fn most_critical(&self, limit: usize) -> Vec<&UsageRecord> {
        let mut critical: Vec<&UsageRecord> = self
            .known
            .values()
            .filter(|r| r.risk == Some(Risk::Known(RiskLevel::High)))
            .chain(self.unknown.values())
            .collect();
        critical.sort_by(|a, b| {
            b.usage_count
                .cmp(&a.usage_count)
                .then_with(|| a.key.cmp(&b.key))
        });
        critical.truncate(limit);
        critical
    }

    /// Group known records by risk level, each group ordered by usage
    /// descending then key.
    pub fn by_risk(&self) -> BTreeMap<RiskLevel, Vec<&UsageRecord>> {
        let mut groups: BTreeMap<RiskLevel, Vec<&UsageRecord>> = BTreeMap::new();
        for record in self.known.values() {
            if let Some(Risk::Known(level)) = record.risk {
                groups.entry(level).or_default().push(record);
            }
        }
        for records in groups.values_mut() {
            records.sort_by(|a, b| {
                b.usage_count
                    .cmp(&a.usage_count)
                    .then_with(|| a.key.cmp(&b.key))
            });
        }
        groups
    }

    /// Score migration complexity per namespace.
    ///
    /// Only classified records count; unclassified keys say nothing
    /// about migration effort yet (they surface through the ranking
    /// instead). A record contributes its full usage count to every
    /// namespace it appears in. Share of high-risk usage strictly above
    /// the high threshold labels the namespace HIGH, strictly above the
    /// medium threshold MEDIUM, otherwise LOW. Namespaces with zero
    /// counted usage are omitted.
    pub fn namespace_complexity(
        &self,
        config: &AnalyzerConfig,
    ) -> BTreeMap<String, ComplexityLabel> {
        let mut totals: BTreeMap<String, (u64, u64)> = BTreeMap::new();
        for record in self.known.values() {
            let high = record.risk == Some(Risk::Known(RiskLevel::High));
            for namespace in &record.namespaces {
                let entry = totals.entry(namespace.clone()).or_insert((0, 0));
                entry.0 += record.usage_count;
                if high {
                    entry.1 += record.usage_count;
                }
            }
        }

        totals
            .into_iter()
            .filter(|(_, (total, _))| *total > 0)
            .map(|(namespace, (total, high))| {
                let share = high as f64 / total as f64;
                let label = if share > config.high_complexity_threshold {
                    ComplexityLabel::High
                } else if share > config.medium_complexity_threshold {
                    ComplexityLabel::Medium
                } else {
                    ComplexityLabel::Low
                };
                (namespace, label)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze_resource;
    use crate::models::IngressResource;

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

    fn analyses(resources: &[IngressResource]) -> Vec<IngressAnalysis> {
        let rules = RuleTable::builtin();
        let config = AnalyzerConfig::default();
        resources
            .iter()
            .map(|r| analyze_resource(r, &rules, &config))
            .collect()
    }

    fn build(resources: &[IngressResource]) -> AnnotationInventory {
        AnnotationInventory::build(
            &analyses(resources),
            &RuleTable::builtin(),
            &AnalyzerConfig::default(),
        )
    }

    #[test]
    fn test_views_are_disjoint_and_counted() {
        let inv = build(&[
            resource("a", "ns1", &[
                ("nginx.ingress.kubernetes.io/ssl-redirect", "true"),
                ("nginx.ingress.kubernetes.io/custom-thing", "x"),
                ("cert-manager.io/issuer", "letsencrypt"),
            ]),
            resource("b", "ns2", &[
                ("nginx.ingress.kubernetes.io/ssl-redirect", "false"),
            ]),
        ]);

        assert_eq!(inv.summary.total_unique_keys, 3);
        assert_eq!(inv.summary.known_count, 1);
        assert_eq!(inv.summary.unknown_count, 1);
        for key in inv.known.keys() {
            assert!(!inv.unknown.contains_key(key), "{key} in both views");
        }
        // Out-of-scope key stays in `all` only, with no classification.
        let cert = &inv.all["cert-manager.io/issuer"];
        assert_eq!(cert.risk, None);
    }

    #[test]
    fn test_usage_counts_and_histogram() {
        let inv = build(&[
            resource("a", "ns1", &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")]),
            resource("b", "ns1", &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")]),
            resource("c", "ns2", &[("nginx.ingress.kubernetes.io/ssl-redirect", "false")]),
        ]);
        let record = &inv.known["nginx.ingress.kubernetes.io/ssl-redirect"];
        assert_eq!(record.usage_count, 3);
        assert_eq!(record.namespaces.len(), 2);
        assert_eq!(record.value_histogram["true"], 2);
        assert_eq!(record.value_histogram["false"], 1);
        assert_eq!(record.values_by_frequency()[0], ("true", 2));
    }

    #[test]
    fn test_noise_is_excluded() {
        let inv = build(&[resource("a", "ns1", &[
            ("kubectl.kubernetes.io/last-applied-configuration", "{}"),
            ("kubernetes.io/ingress.class", "nginx"),
            ("nginx.ingress.kubernetes.io/ssl-redirect", "true"),
        ])]);
        assert_eq!(inv.summary.total_unique_keys, 1);
        assert!(!inv.all.contains_key("kubernetes.io/ingress.class"));
    }

    #[test]
    fn test_build_is_order_independent() {
        let a = resource("a", "ns1", &[
            ("nginx.ingress.kubernetes.io/ssl-redirect", "true"),
            ("nginx.ingress.kubernetes.io/custom", "1"),
        ]);
        let b = resource("b", "ns2", &[
            ("nginx.ingress.kubernetes.io/proxy-body-size", "10m"),
        ]);
        let forward = build(&[a.clone(), b.clone()]);
        let reverse = build(&[b, a]);
        assert_eq!(forward.all, reverse.all);
        assert_eq!(forward.summary.most_used_key, reverse.summary.most_used_key);
    }

    #[test]
    fn test_most_used_tie_breaks_to_smallest_key() {
        let inv = build(&[resource("a", "ns1", &[
            ("nginx.ingress.kubernetes.io/ssl-redirect", "true"),
            ("nginx.ingress.kubernetes.io/proxy-body-size", "10m"),
        ])]);
        assert_eq!(
            inv.summary.most_used_key.as_deref(),
            Some("nginx.ingress.kubernetes.io/proxy-body-size")
        );
    }

    #[test]
    fn test_most_critical_ordering_and_truncation() {
        let mut resources = vec![
            resource("u1", "ns1", &[("nginx.ingress.kubernetes.io/mystery", "x")]),
            resource("u2", "ns1", &[("nginx.ingress.kubernetes.io/mystery", "y")]),
            resource("s1", "ns2", &[("nginx.ingress.kubernetes.io/server-snippet", "a")]),
            resource("auto", "ns1", &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")]),
        ];
        resources.push(resource("s2", "ns2", &[
            ("nginx.ingress.kubernetes.io/configuration-snippet", "b"),
        ]));

        let inv = build(&resources);
        let critical = inv.most_critical(10);
        let keys: Vec<_> = critical.iter().map(|r| r.key.as_str()).collect();
        // mystery has usage 2; the two snippets tie at 1 and order by key.
        assert_eq!(
            keys,
            vec![
                "nginx.ingress.kubernetes.io/mystery",
                "nginx.ingress.kubernetes.io/configuration-snippet",
                "nginx.ingress.kubernetes.io/server-snippet",
            ]
        );
        // AUTO keys never rank.
        assert!(!keys.contains(&"nginx.ingress.kubernetes.io/ssl-redirect"));

        assert_eq!(inv.most_critical(1).len(), 1);
        assert_eq!(inv.most_critical(0).len(), 0);
    }

    #[test]
    fn test_by_risk_groups() {
        let inv = build(&[resource("a", "ns1", &[
            ("nginx.ingress.kubernetes.io/ssl-redirect", "true"),
            ("nginx.ingress.kubernetes.io/proxy-body-size", "10m"),
            ("nginx.ingress.kubernetes.io/server-snippet", "x"),
        ])]);
        let groups = inv.by_risk();
        assert_eq!(groups[&RiskLevel::Auto].len(), 1);
        assert_eq!(groups[&RiskLevel::Manual].len(), 1);
        assert_eq!(groups[&RiskLevel::High].len(), 1);
    }

    #[test]
    fn test_namespace_complexity_thresholds() {
        // ns-high: 2 high of 3 total (66%) -> HIGH.
        // ns-med: 1 high of 4 total (25%) -> MEDIUM.
        // ns-low: 1 high of 5 total (20%, not strictly above) -> LOW.
        let mut resources = vec![
            resource("h1", "ns-high", &[("nginx.ingress.kubernetes.io/server-snippet", "a")]),
            resource("h2", "ns-high", &[("nginx.ingress.kubernetes.io/server-snippet", "b")]),
            resource("h3", "ns-high", &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")]),
            resource("m1", "ns-med", &[("nginx.ingress.kubernetes.io/http-snippet", "a")]),
        ];
        for i in 0..3 {
            resources.push(resource(
                &format!("m{}", i + 2),
                "ns-med",
                &[("nginx.ingress.kubernetes.io/rewrite-target", "/")],
            ));
        }
        resources.push(resource("l1", "ns-low", &[
            ("nginx.ingress.kubernetes.io/stream-snippet", "a"),
        ]));
        for i in 0..4 {
            resources.push(resource(
                &format!("l{}", i + 2),
                "ns-low",
                &[("nginx.ingress.kubernetes.io/force-ssl-redirect", "true")],
            ));
        }

        let inv = build(&resources);
        let complexity = inv.namespace_complexity(&AnalyzerConfig::default());
        assert_eq!(complexity["ns-high"], ComplexityLabel::High);
        assert_eq!(complexity["ns-med"], ComplexityLabel::Medium);
        assert_eq!(complexity["ns-low"], ComplexityLabel::Low);
    }

    #[test]
    fn test_namespace_complexity_boundary_is_strict() {
        // Exactly 50% high share stays MEDIUM, exactly 20% stays LOW.
        let half = build(&[
            resource("a", "ns", &[("nginx.ingress.kubernetes.io/server-snippet", "x")]),
            resource("b", "ns", &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")]),
        ]);
        let labels = half.namespace_complexity(&AnalyzerConfig::default());
        assert_eq!(labels["ns"], ComplexityLabel::Medium);

        let mut resources = vec![resource("a", "ns", &[
            ("nginx.ingress.kubernetes.io/server-snippet", "x"),
        ])];
        for i in 0..4 {
            resources.push(resource(
                &format!("b{i}"),
                "ns",
                &[("nginx.ingress.kubernetes.io/ssl-redirect", "true")],
            ));
        }
        let fifth = build(&resources);
        let labels = fifth.namespace_complexity(&AnalyzerConfig::default());
        assert_eq!(labels["ns"], ComplexityLabel::Low);
    }

    #[test]
    fn test_empty_inventory() {
        let inv = build(&[]);
        assert_eq!(inv.summary.total_unique_keys, 0);
        assert_eq!(inv.summary.most_used_key, None);
        assert!(inv.most_critical(10).is_empty());
        assert!(inv.namespace_complexity(&AnalyzerConfig::default()).is_empty());
    }
}

//! Core data model for the migration analyzer.
//!
//! These types flow through the whole pipeline: the discovery scanner
//! produces [`IngressResource`]s, the analyzer turns each one into an
//! [`IngressAnalysis`], and the aggregate output is a [`ClusterAnalysis`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Migration complexity classification for a rule or a resource.
///
/// Ordered by precedence: `High > Manual > Auto`. A resource's overall
/// risk is the maximum over its matched rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Direct Gateway API equivalent exists; migratable automatically.
    #[default]
    #[serde(rename = "AUTO")]
    Auto,
    /// A migration path exists but requires human review.
    #[serde(rename = "MANUAL")]
    Manual,
    /// Complex configuration with no direct equivalent.
    #[serde(rename = "HIGH_RISK")]
    High,
}

impl RiskLevel {
    /// Get the string representation used in reports and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Manual => "MANUAL",
            Self::High => "HIGH_RISK",
        }
    }

    /// Icon used in console output and markdown reports.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Auto => "✅",
            Self::Manual => "⚠️",
            Self::High => "❌",
        }
    }

    /// Human-readable description of the level.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Auto => "Auto-migratable",
            Self::Manual => "Manual review required",
            Self::High => "High risk - complex migration",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification state of an annotation key in the inventory.
///
/// Keys inside the managed prefix that have no rule are `Unknown` - a
/// distinct state, not a fourth [`RiskLevel`]. Unknown keys are treated
/// as maximally critical when ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Risk {
    /// Classified by a rule with the given level.
    Known(RiskLevel),
    /// Inside the managed prefix but absent from the rule table.
    Unknown,
}

impl Risk {
    /// String form used in reports ("AUTO", "MANUAL", "HIGH_RISK", "UNKNOWN").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Known(level) => level.as_str(),
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Icon used in reports. Unknown keys get a question mark.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Known(level) => level.icon(),
            Self::Unknown => "❓",
        }
    }

    /// Sort weight for risk-ordered views; Unknown ranks above High
    /// because unclassified keys need investigation first.
    pub fn criticality(&self) -> u8 {
        match self {
            Self::Known(RiskLevel::Auto) => 0,
            Self::Known(RiskLevel::Manual) => 1,
            Self::Known(RiskLevel::High) => 2,
            Self::Unknown => 3,
        }
    }
}

impl Ord for Risk {
    fn cmp(&self, other: &Self) -> Ordering {
        self.criticality().cmp(&other.criticality())
    }
}

impl PartialOrd for Risk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Risk {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single annotation classification rule.
///
/// The pattern is a literal annotation key; lookup is exact string
/// equality (see [`crate::rules::RuleTable::lookup`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRule {
    /// Short human-readable name (e.g., "Rewrite Target").
    pub name: &'static str,
    /// The annotation key this rule classifies.
    pub pattern: &'static str,
    /// Migration complexity of the annotation.
    pub risk_level: RiskLevel,
    /// What the annotation does.
    pub description: &'static str,
    /// What to do about it when migrating.
    pub migration_note: &'static str,
    /// Documentation source.
    pub source_url: &'static str,
}

/// A discovered Ingress resource, normalized for analysis.
///
/// The annotation map is always present (empty when the source resource
/// had none) so the core never needs to handle a missing map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressResource {
    pub name: String,
    pub namespace: String,
    pub class_name: String,
    pub annotations: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    pub hosts: Vec<String>,
    pub paths: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// The result of scanning a cluster for ingress-nginx resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub cluster_version: String,
    pub total_ingresses: usize,
    pub nginx_ingresses: Vec<IngressResource>,
    pub scan_time: DateTime<Utc>,
}

/// The analysis result for a single Ingress resource.
///
/// Created exactly once per resource and immutable thereafter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressAnalysis {
    pub resource: IngressResource,
    pub matched_rules: Vec<AnnotationRule>,
    pub risk_level: RiskLevel,
    pub unknown_annotations: Vec<String>,
    pub warnings: Vec<String>,
}

/// Per-namespace risk-level counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSummary {
    pub auto_count: usize,
    pub manual_count: usize,
    pub high_risk_count: usize,
}

impl NamespaceSummary {
    pub fn total(&self) -> usize {
        self.auto_count + self.manual_count + self.high_risk_count
    }
}

/// Cluster-wide risk statistics over the per-resource analyses.
///
/// Invariant: `auto_count + manual_count + high_risk_count == total`,
/// globally and within each namespace entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_ingresses: usize,
    pub auto_count: usize,
    pub manual_count: usize,
    pub high_risk_count: usize,
    pub by_namespace: BTreeMap<String, NamespaceSummary>,
}

/// The complete analysis output for one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAnalysis {
    pub scan_result: ScanResult,
    pub analyses: Vec<IngressAnalysis>,
    pub summary: AnalysisSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<crate::analyze::inventory::AnnotationInventory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::High > RiskLevel::Manual);
        assert!(RiskLevel::Manual > RiskLevel::Auto);
    }

    #[test]
    fn test_risk_level_descriptions_are_distinct() {
        let descriptions = [
            RiskLevel::Auto.description(),
            RiskLevel::Manual.description(),
            RiskLevel::High.description(),
        ];
        assert_eq!(descriptions[0], "Auto-migratable");
        let unique: std::collections::BTreeSet<_> = descriptions.iter().collect();
        assert_eq!(unique.len(), descriptions.len());
    }

    #[test]
    fn test_unknown_ranks_above_high() {
        assert!(Risk::Unknown > Risk::Known(RiskLevel::High));
        assert!(Risk::Known(RiskLevel::High) > Risk::Known(RiskLevel::Manual));
    }

    #[test]
    fn test_risk_serializes_as_string() {
        let json = serde_json::to_string(&Risk::Unknown).unwrap();
        assert_eq!(json, "\"UNKNOWN\"");
        let json = serde_json::to_string(&Risk::Known(RiskLevel::High)).unwrap();
        assert_eq!(json, "\"HIGH_RISK\"");
    }

    #[test]
    fn test_namespace_summary_total() {
        let ns = NamespaceSummary {
            auto_count: 2,
            manual_count: 1,
            high_risk_count: 3,
        };
        assert_eq!(ns.total(), 6);
    }
}

//! JSON report output.

use crate::error::Result;
use crate::models::ClusterAnalysis;

/// Serialize the full analysis as pretty-printed JSON.
pub fn render(analysis: &ClusterAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze_cluster;
    use crate::config::AnalyzerConfig;
    use crate::models::{IngressResource, ScanResult};
    use crate::rules::RuleTable;
    use chrono::Utc;
    use std::collections::BTreeMap;

    #[test]
    fn test_render_includes_summary_and_risk_strings() {
        let resource = IngressResource {
            name: "web".to_string(),
            namespace: "default".to_string(),
            class_name: "nginx".to_string(),
            annotations: [(
                "nginx.ingress.kubernetes.io/server-snippet".to_string(),
                "return 404;".to_string(),
            )]
            .into_iter()
            .collect(),
            labels: BTreeMap::new(),
            hosts: vec![],
            paths: vec![],
            created_at: None,
        };
        let scan = ScanResult {
            cluster_version: "v1.31.0".to_string(),
            total_ingresses: 1,
            nginx_ingresses: vec![resource],
            scan_time: Utc::now(),
        };
        let analysis = analyze_cluster(
            scan,
            &RuleTable::builtin(),
            &AnalyzerConfig::default(),
            true,
        );

        let json = render(&analysis).unwrap();
        assert!(json.contains("\"riskLevel\": \"HIGH_RISK\""));
        assert!(json.contains("\"totalIngresses\": 1"));
        assert!(json.contains("\"inventory\""));
    }
}

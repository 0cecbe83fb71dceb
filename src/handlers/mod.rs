//! Command handlers: wire the CLI to the discovery, analysis, and
//! report modules.

use crate::analyze::analyze_cluster;
use crate::analyze::inventory::InventorySort;
use crate::config::AnalyzerConfig;
use crate::discovery::{ClusterClient, IngressScanner};
use crate::error::Result;
use crate::models::{ClusterAnalysis, RiskLevel};
use crate::report::{self, ReportFormat};
use crate::rules::RuleTable;
use std::path::{Path, PathBuf};

/// Shared connection options coming from the global CLI flags.
pub struct ConnectionOptions {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub namespace: Option<String>,
}

/// Load the analyzer configuration, from file when given.
pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => Ok(AnalyzerConfig::load_from_file(path)?),
        None => Ok(AnalyzerConfig::default()),
    }
}

async fn run_analysis(
    conn: &ConnectionOptions,
    config: &AnalyzerConfig,
    with_inventory: bool,
) -> Result<ClusterAnalysis> {
    println!("\n🔌 Testing Kubernetes connection...");
    let client = ClusterClient::connect(conn.kubeconfig.as_deref(), conn.context.as_deref()).await?;
    println!("✅ Connected to cluster ({})", client.cluster_version());

    let scanner = IngressScanner::new(client.client(), config.clone());
    let scan = scanner
        .scan(conn.namespace.as_deref(), client.cluster_version())
        .await?;
    println!(
        "🔍 Found {} ingress-nginx resources ({} total ingresses)",
        scan.nginx_ingresses.len(),
        scan.total_ingresses
    );

    let rules = RuleTable::builtin();
    Ok(analyze_cluster(scan, &rules, config, with_inventory))
}

fn print_risk_summary(analysis: &ClusterAnalysis) {
    let summary = &analysis.summary;
    println!("\n📊 Migration Complexity Summary:");
    for (level, count) in [
        (RiskLevel::Auto, summary.auto_count),
        (RiskLevel::Manual, summary.manual_count),
        (RiskLevel::High, summary.high_risk_count),
    ] {
        println!("   {} {}: {}", level.icon(), level.description(), count);
    }
}

/// `scan` command: connect, analyze, and write the migration report.
pub async fn handle_scan(
    conn: ConnectionOptions,
    config_path: Option<&Path>,
    output: &Path,
    format: ReportFormat,
) -> Result<()> {
    println!("🔍 Starting ingress-nginx migration analysis...");
    println!("📁 Output directory: {}", output.display());
    match conn.namespace.as_deref() {
        Some(ns) => println!("📦 Namespace: {}", ns),
        None => println!("📦 Scanning all namespaces"),
    }

    let config = load_config(config_path)?;
    let analysis = run_analysis(&conn, &config, false).await?;
    print_risk_summary(&analysis);

    println!("\n📝 Generating report...");
    let content = match format {
        ReportFormat::Markdown => report::markdown::render(&analysis, conn.context.as_deref()),
        ReportFormat::Json => report::json::render(&analysis)?,
    };
    let path = report::write_report(output, "migration-report", format, &content)?;
    println!("✅ Analysis complete! Report saved to: {}", path.display());
    Ok(())
}

/// `inventory` command: the scan pipeline plus the annotation inventory.
pub async fn handle_inventory(
    conn: ConnectionOptions,
    config_path: Option<&Path>,
    output: &Path,
    format: ReportFormat,
    detailed: bool,
    sort: InventorySort,
    top: usize,
) -> Result<()> {
    println!("📋 Generating annotation inventory...");
    println!("📁 Output directory: {}", output.display());

    let config = load_config(config_path)?;
    let analysis = run_analysis(&conn, &config, true).await?;
    print_risk_summary(&analysis);

    // Built by run_analysis when with_inventory is set.
    let Some(inventory) = analysis.inventory.as_ref() else {
        return Ok(());
    };

    println!("\n📈 Annotation Inventory Summary:");
    println!(
        "   Total Unique Annotations: {}",
        inventory.summary.total_unique_keys
    );
    println!("   Classified: {}", inventory.summary.known_count);
    println!("   Unknown: {}", inventory.summary.unknown_count);
    if let Some(key) = inventory.summary.most_used_key.as_deref() {
        println!("   Most Used: {}", key);
    }

    let critical = inventory.most_critical(top);
    if !critical.is_empty() {
        println!("\n🚨 Most Critical Annotations (for migration):");
        for (i, record) in critical.iter().enumerate() {
            println!(
                "   {}. {} (used {} times across {} namespaces)",
                i + 1,
                record.key,
                record.usage_count,
                record.namespaces.len()
            );
        }
    }

    println!("\n📝 Generating inventory report...");
    let content = match format {
        ReportFormat::Markdown => {
            let options = report::inventory::InventoryReportOptions {
                detailed,
                sort,
                top_n: top,
                context: conn.context.clone(),
            };
            report::inventory::render(inventory, &analysis, &config, &options)
        }
        ReportFormat::Json => report::json::render(&analysis)?,
    };
    let path = report::write_report(output, "annotation-inventory", format, &content)?;
    println!(
        "✅ Inventory analysis complete! Report saved to: {}",
        path.display()
    );
    Ok(())
}

use crate::analyze::inventory::InventorySort;
use crate::report::ReportFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ingress-analyzer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analyze ingress-nginx usage and plan your Gateway API migration")]
#[command(
    long_about = "Scans Kubernetes clusters for ingress-nginx resources, classifies annotation migration complexity, and generates actionable reports for planning the move to Gateway API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to kubeconfig file (default: standard discovery)
    #[arg(long, global = true, value_name = "FILE")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubernetes context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Specific namespace to scan (default: all namespaces)
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Path to analyzer configuration file (YAML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan cluster for ingress-nginx usage and generate a migration report
    Scan {
        /// Output directory for reports
        #[arg(long, value_name = "DIR", default_value = "./reports/")]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: ReportFormat,
    },

    /// Generate a detailed annotation inventory and usage analysis
    Inventory {
        /// Output directory for reports
        #[arg(long, value_name = "DIR", default_value = "./reports/")]
        output: PathBuf,

        /// Output format (json recommended for inventory data)
        #[arg(long, value_enum, default_value = "json")]
        format: ReportFormat,

        /// Include detailed value analysis
        #[arg(short, long)]
        detailed: bool,

        /// Sort order for inventory tables
        #[arg(short, long, value_enum, default_value = "usage")]
        sort: SortKey,

        /// Show top N most critical annotations
        #[arg(short, long, default_value_t = 10)]
        top: usize,
    },
}

/// Sort key accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Usage,
    Risk,
    Namespace,
    Name,
}

impl From<SortKey> for InventorySort {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Usage => InventorySort::Usage,
            SortKey::Risk => InventorySort::Risk,
            SortKey::Namespace => InventorySort::Namespace,
            SortKey::Name => InventorySort::Name,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_scan_defaults() {
        let cli = Cli::try_parse_from(["ingress-analyzer", "scan"]).unwrap();
        match cli.command {
            Commands::Scan { output, format } => {
                assert_eq!(output, PathBuf::from("./reports/"));
                assert_eq!(format, ReportFormat::Markdown);
            }
            _ => panic!("expected scan command"),
        }
    }

    #[test]
    fn test_cli_parses_namespace_sort() {
        let cli = Cli::try_parse_from(["ingress-analyzer", "inventory", "--sort", "namespace"])
            .unwrap();
        match cli.command {
            Commands::Inventory { sort, .. } => assert_eq!(sort, SortKey::Namespace),
            _ => panic!("expected inventory command"),
        }
    }

    #[test]
    fn test_cli_parses_inventory_flags() {
        let cli = Cli::try_parse_from([
            "ingress-analyzer",
            "inventory",
            "--detailed",
            "--sort",
            "risk",
            "--top",
            "5",
            "--format",
            "markdown",
            "--namespace",
            "prod",
        ])
        .unwrap();
        assert_eq!(cli.namespace.as_deref(), Some("prod"));
        match cli.command {
            Commands::Inventory {
                detailed,
                sort,
                top,
                format,
                ..
            } => {
                assert!(detailed);
                assert_eq!(sort, SortKey::Risk);
                assert_eq!(top, 5);
                assert_eq!(format, ReportFormat::Markdown);
            }
            _ => panic!("expected inventory command"),
        }
    }
}

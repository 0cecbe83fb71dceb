use clap::Parser;
use ingress_migration_analyzer::cli::{Cli, Commands};
use ingress_migration_analyzer::handlers::{self, ConnectionOptions};
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> ingress_migration_analyzer::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    let conn = ConnectionOptions {
        kubeconfig: cli.kubeconfig.clone(),
        context: cli.context.clone(),
        namespace: cli.namespace.clone(),
    };

    match cli.command {
        Commands::Scan { ref output, format } => {
            handlers::handle_scan(conn, cli.config.as_deref(), output, format).await
        }
        Commands::Inventory {
            ref output,
            format,
            detailed,
            sort,
            top,
        } => {
            handlers::handle_inventory(
                conn,
                cli.config.as_deref(),
                output,
                format,
                detailed,
                sort.into(),
                top,
            )
            .await
        }
    }
}

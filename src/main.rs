use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use taskboard::cli::Cli;
use taskboard::cmd::*;
use taskboard::server::ServerConfig;
use taskboard::TaskStore;

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    // Completions never touch the task file.
    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return;
    }

    let store = match TaskStore::open(&cli.db) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "failed to open task file");
            eprintln!("Failed to open {}: {e}", cli.db.display());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Serve { host, port } => cmd_serve(store, ServerConfig::new(host, port)),
        Commands::List { query, all } => {
            cmd_list(&store, query, all);
            Ok(())
        }
        Commands::Add { title } => cmd_add(&store, title),
        Commands::Toggle { id } => cmd_toggle(&store, id),
        Commands::Delete { id } => cmd_delete(&store, id),
        Commands::Completions { .. } => unreachable!("completions handled above"),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("taskboard=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

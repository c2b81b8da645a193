use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands::*};
use colored::Colorize;
use dotenv::dotenv;
use std::sync::Arc;
use stockpair_common::{fs, Dashboard, Selection, Session};
use stockpair_web::ServerConfig;
use tracing::{error, info, trace, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;

fn preprocess(trace_level: Level) -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(trace_level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    preprocess(cli.trace.into())?;
    trace!("Command line input recorded: {cli:#?}");

    let mut config = ServerConfig::from_env();
    if let Some(path) = &cli.data {
        config.data_path = path.clone();
    }

    // the dataset is loaded once, then only ever read
    info!("Loading dataset from {}", config.data_path.display());
    let table = fs::read_table(&config.data_path).await.map_err(|e| {
        error!("Dataset load failed: {e}");
        e
    })?;
    let dashboard = Dashboard::new(Arc::new(table));

    ////////////////////////////////////////////////////////////////////////////////////////////////////

    // cli framework:
    // "> stockpair <COMMAND>"
    match cli.command {
        // "> stockpair serve [--host HOST] [--port PORT]"
        Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            stockpair_web::serve(dashboard, &config).await?;
        }

        // "> stockpair inspect"
        Inspect => {
            let table = dashboard.table();
            println!("{} {}", "rows:".bold(), table.len());
            println!(
                "{} {}",
                "symbols:".bold(),
                table.distinct_symbols().join(", ").cyan()
            );
            let years: Vec<String> = table
                .distinct_years()
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("{} {}", "years:".bold(), years.join(", ").green());
        }

        // "> stockpair figure [--symbol-a S] [--symbol-b S] [--year Y] [--mode M] [--pretty]"
        Figure {
            symbol_a,
            symbol_b,
            year,
            mode,
            pretty,
        } => {
            let mut session = Session::new(dashboard);
            let defaults = session.selection().clone();
            let figure = session.apply(Selection {
                symbol_a: symbol_a.unwrap_or(defaults.symbol_a),
                symbol_b: symbol_b.unwrap_or(defaults.symbol_b),
                year: year.unwrap_or(defaults.year),
                mode: mode.unwrap_or(defaults.mode),
            });

            let json = if pretty {
                serde_json::to_string_pretty(figure)?
            } else {
                serde_json::to_string(figure)?
            };
            println!("{json}");
        }
    }

    Ok(())
}

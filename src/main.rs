//! News-edge-bot: Kalshi news-sentiment scanner.
//!
//! Single-binary Tokio application that:
//! 1. Lists open markets on Kalshi
//! 2. Searches recent news for each market title
//! 3. Scores the articles with a lexicon sentiment model
//! 4. Flags markets whose price disagrees with the news-implied probability

mod config;
mod render;
mod scanner;

use std::future::Future;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use common::config::BotConfig;
use common::Error;
use kalshi_client::KalshiRestClient;
use news_client::NewsClient;
use scanner::Scanner;

/// Kalshi News Sentiment Scanner
#[derive(Parser)]
#[command(name = "news-edge-bot", about = "Kalshi news-sentiment edge scanner")]
struct Cli {
    /// Run a single scan, print it, and exit.
    #[arg(long)]
    once: bool,

    /// Print the scan report as JSON instead of the dashboard.
    #[arg(long)]
    json: bool,
}

enum Command {
    Refresh,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "r" | "refresh" => Command::Refresh,
        "q" | "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Run one scan and print it. Returns false on a hard stop.
async fn scan_and_print(scanner: &Scanner, cfg: &BotConfig, json: bool) -> bool {
    match scanner.run_scan().await {
        Ok(report) => {
            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(s) => println!("{}", s),
                    Err(e) => error!("Failed to serialize report: {}", e),
                }
            } else {
                println!("{}", render::render_report(&report, &cfg.strategy));
            }
            true
        }
        Err(e) => {
            if e.is_transport() {
                error!("Scan failed, Kalshi unreachable: {}", e);
            } else {
                error!("Scan failed: {}", e);
            }
            if json {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            } else {
                println!("{}", render::render_failure(&e, &cfg.strategy));
            }
            false
        }
    }
}

/// Drive `work` to completion unless `shutdown` resolves first.
async fn until_shutdown<W, S>(work: W, shutdown: S) -> Option<W::Output>
where
    W: Future,
    S: Future,
{
    tokio::select! {
        _ = shutdown => None,
        out = work => Some(out),
    }
}

fn build_scanner(cfg: &BotConfig) -> Result<Scanner, Error> {
    let kalshi = KalshiRestClient::new(
        &cfg.kalshi.base_url,
        Duration::from_secs(cfg.kalshi.timeout_secs),
    )?;
    let news = NewsClient::new(&cfg.news, &cfg.news_api_key)?;
    Ok(Scanner::new(cfg.clone(), kalshi, news))
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so the dashboard on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "news_edge_bot=info,kalshi_client=info,news_client=info,strategy=info".into()
            }),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("📰 News Edge Bot starting up...");

    let cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!("Kalshi: {}", cfg.kalshi.base_url);
    info!(
        "Strategy: edge>{:.0}%, min_articles={}, scan_cap={}, show={}",
        cfg.strategy.edge_threshold * 100.0,
        cfg.strategy.min_articles,
        cfg.strategy.max_markets,
        cfg.strategy.max_suggestions
    );
    info!(
        "Cache TTLs: markets={}s, news={}s; refresh every {}s",
        cfg.cache.markets_ttl_secs, cfg.cache.news_ttl_secs, cfg.timing.refresh_interval_secs
    );

    let scanner = match build_scanner(&cfg) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create HTTP clients: {}", e);
            std::process::exit(1);
        }
    };

    // A scan can run for minutes; Ctrl+C must still interrupt it.
    if cli.once {
        let scan = scan_and_print(&scanner, &cfg, cli.json);
        let code = match until_shutdown(scan, tokio::signal::ctrl_c()).await {
            Some(true) => 0,
            Some(false) => 1,
            None => {
                info!("Shutdown signal received");
                130
            }
        };
        std::process::exit(code);
    }

    let mut ticker = interval(Duration::from_secs(cfg.timing.refresh_interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately.
    ticker.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    'scan: loop {
        let scan = scan_and_print(&scanner, &cfg, cli.json);
        if until_shutdown(scan, tokio::signal::ctrl_c()).await.is_none() {
            info!("Shutdown signal received");
            break 'scan;
        }
        if !cli.json {
            println!("[Enter/r] refresh   [q] quit");
        }

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break 'scan;
                }
                _ = ticker.tick() => {
                    info!("Scheduled refresh");
                    continue 'scan;
                }
                line = lines.next_line(), if stdin_open => match line {
                    Ok(Some(line)) => match parse_command(&line) {
                        Command::Refresh => {
                            info!("Manual refresh requested");
                            scanner.refresh();
                            ticker.reset();
                            continue 'scan;
                        }
                        Command::Quit => break 'scan,
                        Command::Unknown(cmd) => {
                            warn!("Unknown command {:?} (use r to refresh, q to quit)", cmd);
                        }
                    },
                    Ok(None) => {
                        info!("stdin closed; continuing on the refresh timer");
                        stdin_open = false;
                    }
                    Err(e) => {
                        warn!("stdin read failed: {}", e);
                        stdin_open = false;
                    }
                },
            }
        }
    }

    info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert!(matches!(parse_command(""), Command::Refresh));
        assert!(matches!(parse_command(" R \n"), Command::Refresh));
        assert!(matches!(parse_command("refresh"), Command::Refresh));
        assert!(matches!(parse_command("q"), Command::Quit));
        assert!(matches!(parse_command("QUIT"), Command::Quit));
        assert!(matches!(parse_command("help"), Command::Unknown(ref c) if c == "help"));
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_pending_work() {
        let out = until_shutdown(std::future::pending::<bool>(), async {}).await;
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn test_work_finishes_without_shutdown() {
        let out = until_shutdown(async { true }, std::future::pending::<()>()).await;
        assert_eq!(out, Some(true));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["news-edge-bot", "--once", "--json"]);
        assert!(cli.once);
        assert!(cli.json);
        let cli = Cli::parse_from(["news-edge-bot"]);
        assert!(!cli.once && !cli.json);
    }
}

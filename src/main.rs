//! # Storefront CLI
//!
//! - `browse` (default): shows the catalog and reads `buy <n>`, `show` and
//!   `quit` from stdin. Order notifications are printed as they arrive.
//! - `load-test`: runs the load generator against the gateway.
//! - `health`: queries the gateway's health endpoint.

use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use storefront::api::{HttpStorefrontApi, StorefrontApi};
use storefront::config::{StorefrontConfig, API_URL_ENV, DEFAULT_API_URL};
use storefront::lifecycle::{setup_tracing, Storefront};
use storefront::loadgen::{run_load_test, LoadTestConfig};
use storefront::view::{ChannelNotifier, Frame, Notification, StorefrontHandle, ViewState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "storefront", version, about = "Browse the product catalog and place orders")]
struct Cli {
    /// Base URL of the shop gateway
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the catalog and buy products interactively
    Browse,
    /// Generate synthetic shopper traffic against the gateway
    LoadTest(LoadTestArgs),
    /// Check whether the gateway reports itself healthy
    Health,
}

#[derive(Args)]
struct LoadTestArgs {
    /// Number of concurrent simulated users
    #[arg(long, default_value_t = 10)]
    users: usize,
    /// How long to run, in seconds
    #[arg(long, default_value_t = 300)]
    duration_secs: u64,
    /// Chance per round of requesting a nonexistent product
    #[arg(long, default_value_t = 0.05)]
    error_rate: f64,
    /// Chance per round of placing an order
    #[arg(long, default_value_t = 0.3)]
    order_probability: f64,
    /// Stop each user after this many rounds
    #[arg(long)]
    rounds: Option<u32>,
    /// Seed for reproducible traffic
    #[arg(long)]
    seed: Option<u64>,
}

impl From<LoadTestArgs> for LoadTestConfig {
    fn from(args: LoadTestArgs) -> Self {
        Self {
            users: args.users,
            duration: Duration::from_secs(args.duration_secs),
            error_rate: args.error_rate,
            order_probability: args.order_probability,
            rounds: args.rounds,
            seed: args.seed,
            ..LoadTestConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let cli = Cli::parse();
    let config = StorefrontConfig::new(&cli.api_url).map_err(|e| e.to_string())?;
    info!(api = %config.api_base_url, "Using gateway");

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => browse(config).await,
        Command::LoadTest(args) => {
            let api = HttpStorefrontApi::new(config).map_err(|e| e.to_string())?;
            let report = run_load_test(Arc::new(api), args.into())
                .await
                .map_err(|e| e.to_string())?;
            println!("{report}");
            Ok(())
        }
        Command::Health => {
            let api = HttpStorefrontApi::new(config).map_err(|e| e.to_string())?;
            let up = api.health().await.map_err(|e| e.to_string())?;
            println!("{}", if up { "UP" } else { "DOWN" });
            Ok(())
        }
    }
}

/// A line typed at the browse prompt.
#[derive(Debug, PartialEq)]
enum Input {
    Buy(usize),
    Show,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    let mut words = line.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("buy" | "b"), Some(n), None) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Input::Buy(n),
            _ => Input::Unknown,
        },
        (Some("show" | "s"), None, None) => Input::Show,
        (Some("quit" | "q" | "exit"), None, None) => Input::Quit,
        _ => Input::Unknown,
    }
}

fn print_notification(notification: &Notification) {
    let mark = if notification.is_success() { "✔" } else { "✘" };
    println!("{mark} [{}] {notification}", notification.product_id());
}

async fn buy(handle: &StorefrontHandle, card: usize) {
    let frame = handle.frame();
    let Some(control) = frame.purchase_controls().nth(card - 1) else {
        println!("No product #{card}. {} products listed.", frame.cards().len());
        return;
    };
    if let Err(e) = handle.purchase(control.product_id.clone()).await {
        warn!(error = %e, "Purchase not dispatched");
        println!("{e}");
    }
}

async fn browse(config: StorefrontConfig) -> Result<(), String> {
    let (notifier, mut notifications) = ChannelNotifier::new();
    let storefront = Storefront::connect(config, Arc::new(notifier)).map_err(|e| e.to_string())?;
    let handle = storefront.handle.clone();

    print!("{}", handle.frame());
    let state = handle.settled().await.map_err(|e| e.to_string())?;
    print!("{}", Frame::from_state(&state));

    if let ViewState::Ready(_) = state {
        println!("Commands: buy <n>, show, quit");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                Some(notification) = notifications.recv() => print_notification(&notification),
                line = lines.next_line() => match line {
                    Ok(Some(line)) => match parse_input(&line) {
                        Input::Buy(card) => buy(&handle, card).await,
                        Input::Show => print!("{}", handle.frame()),
                        Input::Quit => break,
                        Input::Unknown => println!("Commands: buy <n>, show, quit"),
                    },
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, "Failed to read stdin");
                        break;
                    }
                },
            }
        }
    }

    drop(handle);
    storefront.shutdown().await?;

    // Submissions still in flight report before the process exits.
    while let Some(notification) = notifications.recv().await {
        print_notification(&notification);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("buy 2"), Input::Buy(2));
        assert_eq!(parse_input("  b 1 "), Input::Buy(1));
        assert_eq!(parse_input("buy 0"), Input::Unknown);
        assert_eq!(parse_input("buy two"), Input::Unknown);
        assert_eq!(parse_input("show"), Input::Show);
        assert_eq!(parse_input("q"), Input::Quit);
        assert_eq!(parse_input(""), Input::Unknown);
    }

    #[test]
    fn test_cli_defaults_to_local_gateway() {
        let cli = Cli::try_parse_from(["storefront"]).unwrap();
        assert_eq!(cli.api_url, DEFAULT_API_URL);
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from([
            "storefront",
            "load-test",
            "--users",
            "3",
            "--api-url",
            "http://gateway:8080",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://gateway:8080");
        match cli.command {
            Some(Command::LoadTest(args)) => assert_eq!(LoadTestConfig::from(args).users, 3),
            _ => panic!("Expected load-test command"),
        }
    }
}

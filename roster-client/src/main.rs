use std::{
    io::{self, Write},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;
use roster_client::{
    ApiClient, DEFAULT_BASE_URL, DirectoryApi, TextStreamClient, WorkerApi,
    WorkerRequestsSession,
};
use roster_core::streaming::DEFAULT_CHAR_DELAY;
use roster_model::{RequestStatus, UserQuery};

#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(about = "Command-line client for a Roster demo server")]
struct Cli {
    /// Base URL of the Roster server
    #[arg(long, global = true, env = "ROSTER_SERVER_URL", default_value = DEFAULT_BASE_URL)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a batch of worker requests and follow it until every one completes
    Batch {
        /// Number of requests to submit concurrently
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,

        /// Seconds to wait for the batch to settle
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
    /// Clear every request held by the server
    Clear,
    /// List the worker requests held by the server
    Requests,
    /// Query the mock user directory
    Users(UsersArgs),
    /// Show the most common hobbies and nationalities
    Filters,
    /// Print streamed lorem text as it arrives
    Stream {
        /// Delay between characters, in milliseconds
        #[arg(long)]
        speed: Option<u64>,
    },
    /// Check that the server is up
    Health,
}

#[derive(Debug, Args)]
struct UsersArgs {
    #[arg(long)]
    page: Option<usize>,
    #[arg(long)]
    limit: Option<usize>,
    /// Case-insensitive match on first or last name
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    nationality: Option<String>,
    /// Comma-separated hobbies; any match counts
    #[arg(long)]
    hobbies: Option<String>,
}

impl From<UsersArgs> for UserQuery {
    fn from(args: UsersArgs) -> Self {
        UserQuery {
            page: args.page,
            limit: args.limit,
            search: args.search,
            nationality: args.nationality,
            hobbies: args.hobbies,
        }
    }
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("roster_client", LevelFilter::Info)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let api = ApiClient::new(&cli.server)?;

    match cli.command {
        Command::Batch { count, timeout } => {
            run_batch(api, count, Duration::from_secs(timeout)).await
        }
        Command::Clear => {
            let response = api.clear().await?;
            println!("{}", response.message);
            Ok(())
        }
        Command::Requests => {
            let listing = api.list().await?;
            for request in &listing.requests {
                println!("{}  {}", request.id, request.status);
            }
            println!(
                "total {}  pending {}  completed {}",
                listing.total, listing.pending, listing.completed
            );
            Ok(())
        }
        Command::Users(args) => {
            let response = api.users(&args.into()).await?;
            for user in &response.data {
                println!(
                    "{:>5}  {} {}  {}  {}  [{}]",
                    user.id,
                    user.first_name,
                    user.last_name,
                    user.age,
                    user.nationality,
                    user.hobbies.join(", ")
                );
            }
            let page = &response.pagination;
            println!(
                "page {}/{}  ({} users)",
                page.current_page, page.total_pages, page.total_items
            );
            Ok(())
        }
        Command::Filters => {
            let filters = api.filters().await?;
            println!("Top hobbies:");
            for item in &filters.top_hobbies {
                println!("  {:<24} {}", item.label(), item.count);
            }
            println!("Top nationalities:");
            for item in &filters.top_nationalities {
                println!("  {:<24} {}", item.label(), item.count);
            }
            Ok(())
        }
        Command::Stream { speed } => {
            let speed = speed
                .unwrap_or(DEFAULT_CHAR_DELAY.as_millis() as u64)
                .max(1);
            let stream = TextStreamClient::new(api);
            let mut stdout = io::stdout();
            stream
                .collect_text(speed, |ch| {
                    let _ = write!(stdout, "{ch}");
                    let _ = stdout.flush();
                })
                .await?;
            println!();
            Ok(())
        }
        Command::Health => {
            let health = api.health().await?;
            println!("{} at {}", health.status, health.timestamp);
            Ok(())
        }
    }
}

async fn run_batch(api: ApiClient, count: usize, timeout: Duration) -> Result<()> {
    let base_url = api.base_url().to_string();
    let session = WorkerRequestsSession::mount(Arc::new(api), &base_url).await;
    if !session.is_connected() {
        log::warn!("Not connected to the notification channel; completions will not be seen");
    }

    session.submit_batch(count).await?;
    println!("Submitted {count} requests");

    let mut counts = session.watch_counts();
    let progress = tokio::spawn(async move {
        while counts.changed().await.is_ok() {
            let current = *counts.borrow_and_update();
            println!(
                "completed {}/{}  pending {}",
                current.completed, current.total, current.pending
            );
            if current.is_settled() {
                break;
            }
        }
    });

    let settled = session.wait_until_settled(timeout).await;
    progress.abort();
    let counts = settled.with_context(|| {
        format!("batch did not finish within {}s", timeout.as_secs())
    })?;

    let failed = session
        .requests()
        .iter()
        .filter(|r| {
            r.status == RequestStatus::Completed
                && r.result.as_deref().is_some_and(|s| s.starts_with("Error: "))
        })
        .count();
    println!(
        "All {} requests completed ({} failed)",
        counts.completed, failed
    );
    session.unmount();
    Ok(())
}

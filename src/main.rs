//! CLI entry point for faxfetch.

use std::path::PathBuf;

use clap::Parser;

use faxfetch::config;
use faxfetch::mailbox::ImapMailbox;
use faxfetch::session::{self, SessionSummary};
use faxfetch::store::MountedShare;

/// Poll an IMAP mailbox for unread faxes and archive their PDF attachments
/// to a file share.
#[derive(Parser)]
#[command(name = "faxfetch", version)]
struct Cli {
    /// Config file (default: $FAXFETCH_CONFIG or ~/.config/faxfetch/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Search and parse, but write and flag nothing
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())?;

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    let mailbox = ImapMailbox::connect(&config.mailbox)?;

    let summary = if cli.dry_run {
        session::dry_run(mailbox)?
    } else {
        let share = MountedShare::new(&config.store.mount);
        session::run(mailbox, &share, &config.store.directory)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, cli.dry_run);
    }

    Ok(())
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "faxfetch.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Print the run summary as a human-readable table.
fn print_summary(summary: &SessionSummary, dry_run: bool) {
    println!();
    println!("  {:<22} {}", "Unread messages", summary.unseen);
    if summary.parse_failures > 0 {
        println!("  {:<22} {}", "Parse failures", summary.parse_failures);
    }
    if dry_run {
        println!("  {:<22} {}", "Would save", summary.saved);
    } else {
        println!("  {:<22} {}", "Attachments saved", summary.saved);
        if summary.failed > 0 {
            println!("  {:<22} {}", "Attachments failed", summary.failed);
        }
        println!("  {:<22} {}", "Marked as read", summary.flagged);
    }
    println!();
}

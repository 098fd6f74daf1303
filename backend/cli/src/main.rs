use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use concierge_core::{ConciergeError, FeedUpdate, SessionUpdate, TranscriptExporter};
use concierge_dialogue::{DialogueConfig, DialogueSession, RejectReason, SubmitOutcome};
use concierge_feed::LogFeed;
use concierge_scripts::{registry, INTAKE_GREETING};

#[derive(Parser)]
#[command(name = "concierge")]
#[command(about = "Concierge — scripted dialogue and log-reveal engines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive scripted chat on stdin
    Chat {
        /// Dialogue script preset to play
        #[arg(short, long, default_value = "intake")]
        script: String,
        /// Delay before each canned reply, in milliseconds
        #[arg(long, default_value_t = 800)]
        delay_ms: u64,
        /// Export the finished transcript as HTML into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Play a log feed preset to stdout
    Feed {
        /// Feed preset to play
        #[arg(short, long, default_value = "system-stats")]
        preset: String,
    },
    /// List available script and feed presets
    Presets,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            script,
            delay_ms,
            export_dir,
        } => run_chat(&script, delay_ms, export_dir).await?,
        Commands::Feed { preset } => run_feed(&preset).await?,
        Commands::Presets => {
            let reg = registry();
            println!("scripts:");
            for name in reg.script_names() {
                println!("  {}", name);
            }
            println!("feeds:");
            for name in reg.feed_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

async fn run_chat(script_name: &str, delay_ms: u64, export_dir: Option<PathBuf>) -> Result<()> {
    let script = registry()
        .script(script_name)
        .cloned()
        .ok_or_else(|| ConciergeError::UnknownPreset(script_name.to_string()))?;

    let config = DialogueConfig {
        reply_delay: Duration::from_millis(delay_ms),
        greeting: Some(INTAKE_GREETING.to_string()),
    };
    let session = DialogueSession::spawn(script, config);
    let mut updates = session.subscribe();

    println!("[system] {}", INTAKE_GREETING);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while !session.is_terminal().await {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("stdin closed, ending chat");
            break;
        };

        match session.submit(&line).await {
            SubmitOutcome::Accepted { .. } => {
                // Echo the update stream until the reply for this step lands.
                loop {
                    match updates.recv().await? {
                        SessionUpdate::UserMessage { .. } => {}
                        SessionUpdate::AgentReply { text, .. } => {
                            println!("[agent] {}", text);
                            break;
                        }
                        SessionUpdate::SessionClosed => break,
                    }
                }
            }
            SubmitOutcome::Rejected(RejectReason::EmptyInput) => continue,
            SubmitOutcome::Rejected(RejectReason::SessionClosed) => break,
        }
    }

    if session.is_terminal().await {
        println!("[system] session closed");
    }

    if let Some(dir) = export_dir {
        let exporter = TranscriptExporter::new(dir);
        let transcript = session.transcript().await;
        let path = exporter
            .export_html(&session.id().to_string(), "Concierge intake", &transcript)
            .await?;
        println!("transcript saved to {}", path.display());
    }

    Ok(())
}

async fn run_feed(preset_name: &str) -> Result<()> {
    let config = registry()
        .feed(preset_name)
        .cloned()
        .ok_or_else(|| ConciergeError::UnknownPreset(preset_name.to_string()))?;

    let feed = LogFeed::new(config);
    let mut updates = feed.subscribe();

    for line in feed.revealed().await {
        println!("{}", line);
    }

    feed.start();
    loop {
        match updates.recv().await? {
            FeedUpdate::LineRevealed { text, .. } => println!("{}", text),
            FeedUpdate::Exhausted | FeedUpdate::Stopped => break,
        }
    }

    Ok(())
}

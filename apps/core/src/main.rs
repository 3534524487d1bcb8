// Security chatbot entry point
// Routes cybersecurity questions to a specialised system prompt, then to the LLM.

mod actors;
mod brain;
mod config;
mod error;
mod models;
mod session;

#[cfg(test)]
mod tests;

use actors::supervisor::SupervisorHandle;
use anyhow::Context;
use brain::IntentRouter;
use clap::Parser;
use config::AppConfig;
use models::ChatTurn;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const TITLE: &str = "🛡️ AI Security Chatbot";
const SUBTITLE: &str =
    "Ask anything about cybersecurity, and I'll respond with expert NLP-powered guidance.";
const PLACEHOLDER: &str = "e.g., How can I detect a phishing email?";

/// Ask cybersecurity questions; each one is routed to a specialist persona.
#[derive(Debug, Parser)]
#[command(name = "secbot", version, about)]
struct Cli {
    /// Ask a single question, print the answer and exit
    #[arg(long, value_name = "MESSAGE")]
    once: Option<String>,

    /// Show how messages would be routed without calling the completion service
    #[arg(long)]
    route_only: bool,

    /// Override the model identifier
    #[arg(long)]
    model: Option<String>,

    /// Emit bunyan-style JSON logs
    #[arg(long)]
    json_logs: bool,
}

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplInput<'a> {
    Skip,
    Quit,
    History,
    Message(&'a str),
}

/// Commands are matched on the trimmed line. Anything else, including a
/// blank but non-empty line, is sent as typed.
fn parse_repl_line(line: &str) -> ReplInput<'_> {
    if line.is_empty() {
        return ReplInput::Skip;
    }
    match line.trim() {
        "/quit" | "/exit" => ReplInput::Quit,
        "/history" => ReplInput::History,
        _ => ReplInput::Message(line),
    }
}

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new("secbot".into(), std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_routing(router: &IntentRouter, message: &str) {
    let packet = router.analyze(message);
    let request = router.request_for(&packet);
    println!("category:      {}", packet.category());
    println!("cleaned text:  {}", packet.cleaned);
    println!("system prompt: {}", request.system_prompt);
}

fn print_transcript(turns: &[ChatTurn]) {
    if turns.is_empty() {
        println!("(no messages yet)");
        return;
    }
    for turn in turns {
        println!("{}: {}", turn.speaker.marker(), turn.text);
    }
}

fn prompt_user() -> std::io::Result<()> {
    print!("🧑 You: ");
    std::io::stdout().flush()
}

async fn run_repl(cli: &Cli, supervisor: Option<&SupervisorHandle>) -> anyhow::Result<()> {
    let router = IntentRouter::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", TITLE);
    println!("{}", SUBTITLE);
    println!("Type /history to see the conversation, /quit to leave. ({})", PLACEHOLDER);
    println!();

    prompt_user()?;
    while let Some(line) = lines.next_line().await? {
        match parse_repl_line(&line) {
            ReplInput::Skip => {}
            ReplInput::Quit => break,
            ReplInput::History => match supervisor {
                Some(supervisor) => print_transcript(&supervisor.transcript().await?),
                None => println!("(history is not kept in --route-only mode)"),
            },
            ReplInput::Message(message) if cli.route_only => print_routing(&router, message),
            ReplInput::Message(message) => {
                if let Some(supervisor) = supervisor {
                    eprintln!("Analyzing...");
                    let reply = supervisor.process_message(message.to_string()).await;
                    println!("🤖: {}", reply);
                }
            }
        }
        prompt_user()?;
    }
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if cli.route_only {
        if let Some(message) = &cli.once {
            print_routing(&IntentRouter::new(), message);
            return Ok(());
        }
        return run_repl(&cli, None).await;
    }

    let mut config = AppConfig::load().context("failed to load configuration")?;
    if let Some(model) = &cli.model {
        config = config
            .with_model(model.clone())
            .context("invalid --model value")?;
    }
    info!(model = %config.completion.model, "Starting security chatbot");

    let supervisor = SupervisorHandle::new(config);

    let result = match &cli.once {
        Some(message) => {
            let reply = supervisor.process_message(message.clone()).await;
            println!("{}", reply);
            Ok(())
        }
        None => run_repl(&cli, Some(&supervisor)).await,
    };

    supervisor.shutdown().await;
    result
}

use std::fmt;

use quiz_core::model::SessionId;
use quiz_core::navigation::{AuthState, NavigationContext, NavigationGuard};
use quiz_services::{QuizApiConfig, QuizServices};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingSessionId,
    UnknownArg(String),
    InvalidLimit { raw: String },
    InvalidSessionId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingSessionId => write!(f, "resume requires a session id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
            ArgsError::InvalidSessionId { raw } => write!(f, "invalid session id: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p quiz-app -- resume <session-id>      [api options]");
    eprintln!("  cargo run -p quiz-app -- history [--limit <n>]    [api options]");
    eprintln!("  cargo run -p quiz-app -- check-incomplete         [api options]");
    eprintln!("  cargo run -p quiz-app -- guard --to <url> [--from <url>] [--authenticated]");
    eprintln!();
    eprintln!("API options:");
    eprintln!("  --base-url <url>   (default: QUIZ_API_BASE_URL or http://localhost:8000/api)");
    eprintln!("  --token <token>    (default: QUIZ_API_TOKEN)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_BASE_URL, QUIZ_API_TOKEN, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Resume { session_id: SessionId },
    History { limit: Option<u32> },
    CheckIncomplete,
    Guard {
        to: String,
        from: String,
        authenticated: bool,
    },
}

struct Args {
    command: Command,
    config: QuizApiConfig,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let Some(subcommand) = args.next() else {
            return Ok(None);
        };

        let mut config = QuizApiConfig::from_env();
        let mut session_id = None;
        let mut limit = None;
        let mut to = None;
        let mut from = String::from("/");
        let mut authenticated = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => config.base_url = require_value(&mut args, "--base-url")?,
                "--token" => config = config.with_token(require_value(&mut args, "--token")?),
                "--limit" => {
                    let value = require_value(&mut args, "--limit")?;
                    let parsed = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidLimit { raw: value.clone() })?;
                    limit = Some(parsed);
                }
                "--to" => to = Some(require_value(&mut args, "--to")?),
                "--from" => from = require_value(&mut args, "--from")?,
                "--authenticated" => authenticated = true,
                "--help" | "-h" => return Ok(None),
                positional
                    if subcommand == "resume"
                        && !positional.starts_with("--")
                        && session_id.is_none() =>
                {
                    let parsed = positional
                        .parse::<SessionId>()
                        .map_err(|_| ArgsError::InvalidSessionId { raw: arg.clone() })?;
                    session_id = Some(parsed);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let command = match subcommand.as_str() {
            "resume" => Command::Resume {
                session_id: session_id.ok_or(ArgsError::MissingSessionId)?,
            },
            "history" => Command::History { limit },
            "check-incomplete" => Command::CheckIncomplete,
            "guard" => Command::Guard {
                to: to.ok_or(ArgsError::MissingValue { flag: "--to" })?,
                from,
                authenticated,
            },
            "--help" | "-h" => return Ok(None),
            _ => return Err(ArgsError::UnknownArg(subcommand)),
        };

        Ok(Some(Self { command, config }))
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Some(args) = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    tracing::debug!(config = ?args.config, "starting");

    match args.command {
        Command::Guard {
            to,
            from,
            authenticated,
        } => {
            // Pure decision; no service calls.
            let guard = NavigationGuard::default();
            let ctx = NavigationContext::from_urls(&to, &from)?;
            let decision = guard.decide(&ctx, AuthState::from_flag(authenticated));
            println!("{decision}");
            if decision.is_allowed() {
                println!("title: {}", guard.routes().document_title(&ctx.target_path));
            }
        }
        Command::Resume { session_id } => {
            let services = QuizServices::http(args.config);
            let resumed = services.resume().resume(&session_id).await?;
            println!("{}", serde_json::to_string_pretty(&resumed)?);
        }
        Command::History { limit } => {
            let services = QuizServices::http(args.config);
            let history = services.api().history(limit).await?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        Command::CheckIncomplete => {
            let services = QuizServices::http(args.config);
            let incomplete = services.api().check_incomplete().await?;
            println!("{}", serde_json::to_string_pretty(&incomplete)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use faq_core::{load_or_builtin, Catalog, IntentMatcher, MatchConfig};

const WELCOME_MESSAGE: &str = "Bonjour ! Je suis l'assistant du département d'informatique de l'EFREI. \
Je peux répondre à vos questions sur nos formations, l'équipe enseignante, les admissions, \
les débouchés et bien plus encore. Comment puis-je vous aider ?";

/// CLI wrapper for log levels
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Chat with the department FAQ assistant from the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Intent catalog (`{"intents": [...]}`); the built-in catalog is used when absent or invalid
    #[arg(short, long, value_name = "FILE", env = "FAQ_CATALOG")]
    catalog: Option<PathBuf>,

    /// Matcher configuration file (JSON), overriding the default threshold and bonuses
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pause before each reply, in milliseconds
    #[arg(short, long, default_value_t = 500)]
    delay_ms: u64,

    /// Seed for reply selection, for reproducible sessions
    #[arg(short, long)]
    seed: Option<u64>,

    /// Answer a single message and exit
    #[arg(long, value_name = "UTTERANCE")]
    once: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

fn init_logging(level: Option<CliLogLevel>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level.into());
    }
    builder.init();
}

fn load_config(path: Option<&PathBuf>) -> Result<MatchConfig> {
    let Some(path) = path else {
        return Ok(MatchConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn chat<R: RngCore>(matcher: &IntentMatcher, rng: &mut R, delay: Duration) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "{}", WELCOME_MESSAGE)?;
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            break;
        }

        thread::sleep(delay);
        writeln!(stdout, "{}", matcher.reply_with(message, rng))?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.clone());

    let catalog = match &args.catalog {
        Some(path) => load_or_builtin(path),
        None => Catalog::builtin(),
    };
    let config = load_config(args.config.as_ref())?;
    info!("Loaded {} intents (threshold {})", catalog.len(), config.threshold);

    let matcher = IntentMatcher::with_config(catalog, config);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match args.once {
        Some(message) => {
            println!("{}", matcher.reply_with(&message, &mut rng));
            Ok(())
        }
        None => chat(&matcher, &mut rng, Duration::from_millis(args.delay_ms)),
    }
}

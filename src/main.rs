use anyhow::Result;
use clap::Parser;
use tracing_subscriber::FmtSubscriber;

const HISTORY_FILE: &str = ".termsh_history";

#[derive(Parser, Debug)]
#[command(name = "termsh")]
#[command(about = "A minimal terminal-style command front-end")]
#[command(version)]
struct Cli {
    /// History file path (defaults to ~/.termsh_history)
    #[arg(long, env = "TERMSH_HISTORY")]
    history: Option<String>,

    /// Prompt prefix
    #[arg(long, env = "TERMSH_PROMPT", default_value = "termsh")]
    prompt: String,

    /// Run a single command line and exit
    #[arg(short = 'c', value_name = "LINE")]
    command: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "debug")]
    quiet: bool,
}

fn default_logfile() -> String {
    let mut home = dirs::home_dir();
    if let Some(h) = &mut home {
        h.push(HISTORY_FILE);
        if let Some(s) = h.to_str() {
            return s.to_string();
        }
    }
    HISTORY_FILE.to_string()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let logfile = cli.history.unwrap_or_else(default_logfile);
    let shell = termsh::Shell::new(&logfile, &cli.prompt);
    let code = match cli.command {
        Some(line) => shell.run_once(&line),
        None => shell.run()?,
    };
    std::process::exit(code);
}

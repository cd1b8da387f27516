#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tourney_core::TournamentError;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tourney: Thompson-sampling tournament coordinator",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Start a tournament",
        long_about = "Start a tournament with N agents, replacing any existing one.",
        after_help = "EXAMPLES:\n    # Three agents with deterministic selection\n    tn init --agents 3 --seed 42\n\n    # System randomness (not reproducible)\n    tn init --agents 3\n\n    # Emit machine-readable output\n    tn init --agents 3 --json"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        about = "Pick the next agent to evaluate",
        long_about = "Thompson-sample one agent from the current posteriors.",
        after_help = "EXAMPLES:\n    # Pick an agent\n    tn select\n\n    # Emit machine-readable output\n    tn select --json"
    )]
    Select(cmd::select::SelectArgs),

    #[command(
        about = "Submit an evaluation score",
        long_about = "Record a score in [0.0, 1.0] for one agent and refresh its posterior.",
        after_help = "EXAMPLES:\n    # Record a score\n    tn update agent_1 0.95\n\n    # Emit machine-readable output\n    tn update agent_1 0.95 --json"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        about = "Show tournament progress",
        long_about = "Show per-agent evaluation counts and sample statistics.",
        after_help = "EXAMPLES:\n    # Show progress\n    tn status\n\n    # Emit machine-readable output\n    tn status --json"
    )]
    Status(cmd::status::StatusArgs),

    #[command(
        about = "Evaluate the winner verdict",
        long_about = "Report the leading agent, confidence, and whether the tournament is decided.",
        after_help = "EXAMPLES:\n    # Check for a winner\n    tn winner\n\n    # Emit machine-readable output\n    tn winner --json"
    )]
    Winner(cmd::winner::WinnerArgs),

    #[command(
        about = "Discard the tournament",
        long_about = "Delete the tournament record; the next command starts from scratch.",
        after_help = "EXAMPLES:\n    # Throw everything away\n    tn reset"
    )]
    Reset(cmd::reset::ResetArgs),

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    tn completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TOURNEY_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "tourney_core=debug,tourney_cli=debug,info"
        } else {
            "tourney_core=info,warn"
        })
    });

    let format = env::var("TOURNEY_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // Logs go to stderr: stdout carries the command's canonical output.
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        debug!("verbose mode enabled");
    }

    let output = cli.output_mode();
    let project_root = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("error: cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, output, &project_root),
        Commands::Select(ref args) => cmd::select::run_select(args, output, &project_root),
        Commands::Update(ref args) => cmd::update::run_update(args, output, &project_root),
        Commands::Status(ref args) => cmd::status::run_status(args, output, &project_root),
        Commands::Winner(ref args) => cmd::winner::run_winner(args, output, &project_root),
        Commands::Reset(ref args) => cmd::reset::run_reset(args, output, &project_root),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Handlers already rendered the error; here we only map the exit
        // code the interface contract promises.
        Err(err) => err.downcast_ref::<TournamentError>().map_or_else(
            || {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            },
            |core| ExitCode::from(core.exit_code()),
        ),
    }
}

use clap::{Parser, Subcommand};
use eyre::Result;
use prioritodo::render::Renderer;
use prioritodo::shell::Shell;
use prioritodo::{Config, TaskList, jsonl};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prioritodo")]
#[command(about = "Priority-sorted to-do list for the terminal")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/prioritodo/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Log store actions to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive shell reading commands from stdin (default)
    Shell,

    /// Apply a JSONL file of actions to an empty list and print the result
    Replay {
        /// File with one JSON action per line
        file: PathBuf,

        /// Print the sorted list as JSONL instead of rendering it
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let color = config.color && !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }
    let renderer = Renderer::new(color, config.show_ids);
    let mut list = TaskList::with_stale_edit_policy(config.stale_edit);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let mut shell = Shell::new(list, renderer, io::stdout());
            shell.run(stdin.lock(), &config.prompt)?;
        }
        Commands::Replay { file, json } => {
            let actions = jsonl::read_actions(&file)?;
            let ignored = list.apply_all(actions);
            if ignored > 0 {
                eprintln!("{} action(s) ignored", ignored);
            }

            let mut stdout = io::stdout().lock();
            if json {
                jsonl::write_jsonl(&mut stdout, list.sorted_view())?;
            } else {
                write!(stdout, "{}", renderer.screen(&list))?;
            }
        }
    }

    Ok(())
}

//! `bookrec`: recommend books by content, by similar readers, or both.

use anyhow::Result;
use bookrec::UserId;
use bookrec_cli::cli::output::Styled;
use bookrec_cli::cli::{commands, repl};
use bookrec_cli::config::Config;
use bookrec_cli::logging;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookrec")]
#[command(about = "Book recommendations: content-based, collaborative and hybrid")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Suppress hints and empty-result notes
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log session build details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Books most similar in title, author and genre
    Content {
        /// Exact title; the first catalog row with this title is used
        title: String,
    },
    /// Users whose ratings look most like this user's
    Collab {
        /// User id from the ratings table
        user_id: u64,
    },
    /// Blend content similarity (0.6) with the user's own ratings (0.4)
    Hybrid {
        /// Exact title; the first catalog row with this title is used
        title: String,
        /// User id from the ratings table
        #[arg(short, long)]
        user: u64,
    },
    /// List every catalog title
    Titles,
    /// Show session statistics
    Stats,
    /// Start the interactive REPL (default)
    Repl,
}

fn main() {
    let cli = Cli::parse();
    export_output_flags(&cli);
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        let s = Styled::new();
        eprintln!("  {} {e:#}", s.fail_sym());
        std::process::exit(1);
    }
}

/// Output switches are read back through `BOOKREC_*` variables by the output layer.
fn export_output_flags(cli: &Cli) {
    let flags = [
        (cli.json, "BOOKREC_JSON"),
        (cli.quiet, "BOOKREC_QUIET"),
        (cli.no_color, "BOOKREC_NO_COLOR"),
    ];
    for (enabled, var) in flags {
        if enabled {
            std::env::set_var(var, "1");
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let recommender = cli.config.load_recommender()?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Content { title } => commands::content(&recommender, &title),
        Commands::Collab { user_id } => commands::collab(&recommender, UserId(user_id)),
        Commands::Hybrid { title, user } => commands::hybrid(&recommender, &title, UserId(user)),
        Commands::Titles => commands::titles(&recommender),
        Commands::Stats => commands::stats(&recommender),
        Commands::Repl => repl::run(recommender),
    }
}

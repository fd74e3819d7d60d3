// Copyright 2026 bookrec contributors
// SPDX-License-Identifier: MIT

//! Interactive REPL for bookrec: slash command interface.
//!
//! Launch with `bookrec` (no subcommand) to enter the interactive mode.
//! Type `/help` for available commands, Tab for completion.

use crate::cli::output::Styled;
use crate::cli::repl_commands::{self, ReplState};
use crate::cli::repl_complete::BookrecHelper;
use anyhow::Result;
use bookrec::Recommender;
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;

/// Directory for per-user state (`~/.bookrec`).
pub fn bookrec_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookrec")
}

/// History file location.
fn history_path() -> PathBuf {
    bookrec_home().join("repl_history")
}

/// Print the welcome banner with a session summary.
fn print_banner(rec: &Recommender) {
    let s = Styled::new();
    let stats = rec.stats();

    eprintln!();
    eprintln!(
        "  {} {} {}",
        s.green("\u{25c9}"),
        s.bold(&format!("bookrec v{}", env!("CARGO_PKG_VERSION"))),
        s.dim("Book Recommendation System")
    );

    let users = match rec.catalog().user_id_range() {
        Some((min, max)) => format!("{} (ids {min}..={max})", stats.users),
        None => stats.users.to_string(),
    };
    eprintln!("    Books: {} | Users: {users}", stats.books);

    eprintln!();
    eprintln!(
        "    Type {} for commands, {} to complete, {} to quit.",
        s.cyan("/help"),
        s.dim("Tab"),
        s.dim("/exit")
    );
    eprintln!();
}

/// Run the interactive REPL.
pub fn run(recommender: Recommender) -> Result<()> {
    print_banner(&recommender);

    // List completion shows all matches like Bash
    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let titles = recommender.catalog().titles().map(String::from).collect();
    let mut rl: Editor<BookrecHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(BookrecHelper::new(titles)));

    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let state = ReplState::new(recommender);

    let prompt = if Styled::new().uses_color() {
        " \x1b[36mbookrec>\x1b[0m ".to_string()
    } else {
        " bookrec> ".to_string()
    };

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match repl_commands::execute(line, &state) {
                    Ok(true) => {
                        let s = Styled::new();
                        eprintln!("  {} Goodbye!", s.dim("\u{2728}"));
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        let s = Styled::new();
                        eprintln!("  {} {e:#}", s.fail_sym());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C: don't exit, just show hint
                let s = Styled::new();
                eprintln!("  {} Type {} to quit.", s.dim("(Ctrl+C)"), s.bold("/exit"));
            }
            Err(ReadlineError::Eof) => {
                let s = Styled::new();
                eprintln!("  {} Goodbye!", s.dim("\u{2728}"));
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(bookrec_home());
    let _ = rl.save_history(&hist_path);

    Ok(())
}

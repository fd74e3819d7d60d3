// Copyright 2026 bookrec contributors
// SPDX-License-Identifier: MIT

//! Slash command parsing and dispatch for the bookrec REPL.
//!
//! Each slash command maps to one of the one-shot subcommands, run against the
//! recommender that was built when the REPL started.

use crate::cli::commands;
use crate::cli::output::{self, Styled};
use crate::cli::repl_complete::{suggest_command, COMMANDS};
use anyhow::{bail, Context, Result};
use bookrec::{Recommender, UserId};

/// Session state preserved across commands.
pub struct ReplState {
    pub recommender: Recommender,
}

impl ReplState {
    pub fn new(recommender: Recommender) -> Self {
        Self { recommender }
    }
}

/// Parse and execute a slash command. Returns `true` if the REPL should exit.
pub fn execute(input: &str, state: &ReplState) -> Result<bool> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(false);
    }

    // Strip leading / if present
    let input = input.strip_prefix('/').unwrap_or(input);

    // Bare `/` with nothing else → show help
    if input.is_empty() {
        cmd_help();
        return Ok(false);
    }

    let (cmd, args) = input.split_once(' ').unwrap_or((input, ""));
    let args = args.trim();
    let rec = &state.recommender;

    match cmd {
        "exit" | "quit" | "q" => return Ok(true),
        "help" | "h" | "?" => cmd_help(),
        "clear" | "cls" => cmd_clear(),
        "content" | "c" => commands::content(rec, require_title(args)?)?,
        "collab" | "u" => commands::collab(rec, parse_user(args)?)?,
        "hybrid" | "hy" => {
            let (user, title) = parse_hybrid_args(args)?;
            commands::hybrid(rec, title, user)?
        }
        "titles" | "ls" => cmd_titles(rec, args),
        "stats" => commands::stats(rec)?,
        _ => {
            let s = Styled::new();
            if let Some(suggestion) = suggest_command(cmd) {
                eprintln!(
                    "  {} Unknown command '/{cmd}'. Did you mean {}?",
                    s.warn_sym(),
                    s.bold(suggestion)
                );
            } else {
                eprintln!(
                    "  {} Unknown command '/{cmd}'. Type {} for commands.",
                    s.warn_sym(),
                    s.bold("/help")
                );
            }
        }
    }

    Ok(false)
}

/// /help: Show available commands.
fn cmd_help() {
    let s = Styled::new();
    eprintln!();
    eprintln!("  {}", s.bold("Commands:"));
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {:<22} {}", s.cyan(cmd), s.dim(desc));
    }
    eprintln!();
    eprintln!(
        "  {}",
        s.dim("Usage: /content <title>, /collab <user_id>, /hybrid <user_id> <title>")
    );
    eprintln!();
}

/// /clear: Clear the terminal.
fn cmd_clear() {
    // ANSI escape to clear screen and move cursor to top-left
    eprint!("\x1b[2J\x1b[H");
}

/// /titles [filter]: List titles containing the filter, case-insensitively.
fn cmd_titles(rec: &Recommender, filter: &str) {
    let filter = filter.to_lowercase();
    let mut shown = 0usize;
    for title in rec.catalog().titles() {
        if filter.is_empty() || title.to_lowercase().contains(&filter) {
            println!("    {title}");
            shown += 1;
        }
    }
    if shown == 0 && !output::is_quiet() {
        let s = Styled::new();
        eprintln!("  {} No titles match '{filter}'.", s.warn_sym());
    }
}

fn require_title(args: &str) -> Result<&str> {
    if args.is_empty() {
        bail!("missing book title. Usage: /content <title>");
    }
    Ok(args)
}

/// Parse a user id argument.
pub fn parse_user(args: &str) -> Result<UserId> {
    if args.is_empty() {
        bail!("missing user id. Usage: /collab <user_id>");
    }
    let id: u64 = args
        .parse()
        .with_context(|| format!("invalid user id '{args}'"))?;
    Ok(UserId(id))
}

/// Split `/hybrid` arguments into a user id and a title; the title may contain spaces.
pub fn parse_hybrid_args(args: &str) -> Result<(UserId, &str)> {
    let Some((user, title)) = args.split_once(' ') else {
        bail!("usage: /hybrid <user_id> <title>");
    };
    let title = title.trim();
    if title.is_empty() {
        bail!("usage: /hybrid <user_id> <title>");
    }
    Ok((parse_user(user)?, title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookrec::{Book, Catalog, Error, Rating};

    fn state() -> ReplState {
        let catalog = Catalog::new(
            vec![
                Book::new(1, "Emma", "Jane Austen", "Romance"),
                Book::new(2, "Persuasion", "Jane Austen", "Romance"),
                Book::new(3, "Dune", "Frank Herbert", "SciFi"),
            ],
            vec![Rating::new(1, 1, 5.0), Rating::new(2, 2, 4.0)],
        );
        ReplState::new(Recommender::new(catalog).expect("recommender"))
    }

    #[test]
    fn test_parse_user() {
        assert_eq!(parse_user("42").expect("valid"), UserId(42));
        assert!(parse_user("").is_err());
        assert!(parse_user("abc").is_err());
        assert!(parse_user("-1").is_err());
    }

    #[test]
    fn test_parse_hybrid_args_keeps_title_spaces() {
        let (user, title) = parse_hybrid_args("7 Dune Messiah").expect("valid");
        assert_eq!(user, UserId(7));
        assert_eq!(title, "Dune Messiah");
        assert!(parse_hybrid_args("7").is_err());
        assert!(parse_hybrid_args("Dune 7").is_err());
    }

    #[test]
    fn test_exit_commands() {
        let state = state();
        assert!(execute("/exit", &state).expect("exit"));
        assert!(execute("quit", &state).expect("quit"));
        assert!(!execute("", &state).expect("empty"));
        assert!(!execute("/stats", &state).expect("stats"));
    }

    #[test]
    fn test_unknown_title_is_error_but_session_continues() {
        let state = state();
        let err = execute("/content Ulysses", &state).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::BookNotFound { .. })
        ));
        assert!(!execute("/content Emma", &state).expect("known title"));
    }

    #[test]
    fn test_unknown_user_is_not_an_error() {
        let state = state();
        assert!(!execute("/collab 999", &state).expect("soft warning"));
        assert!(!execute("/hybrid 999 Emma", &state).expect("soft warning"));
    }
}

// Copyright 2026 bookrec contributors
// SPDX-License-Identifier: MIT

//! Tab completion for the bookrec interactive REPL.
//!
//! Completes slash commands and, for `/content` and `/hybrid`, book titles
//! from the loaded catalog.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;

/// All available REPL slash commands.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/content", "Books similar in title, author and genre"),
    ("/collab", "Users with the most similar ratings"),
    ("/hybrid", "Blend content similarity with a user's ratings"),
    ("/titles", "List catalog titles (optional filter)"),
    ("/stats", "Show session statistics"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// REPL helper providing tab completion over commands and titles.
pub struct BookrecHelper {
    titles: Vec<String>,
}

impl BookrecHelper {
    pub fn new(titles: Vec<String>) -> Self {
        let mut titles = titles;
        titles.sort();
        titles.dedup();
        Self { titles }
    }

    /// Titles starting with `prefix`, compared case-insensitively.
    fn matching_titles(&self, prefix: &str) -> Vec<Pair> {
        let prefix = prefix.to_lowercase();
        self.titles
            .iter()
            .filter(|t| t.to_lowercase().starts_with(&prefix))
            .map(|t| Pair {
                display: t.clone(),
                replacement: t.clone(),
            })
            .collect()
    }
}

impl Completer for BookrecHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos], pos))
    }
}

impl BookrecHelper {
    fn candidates(&self, input: &str, pos: usize) -> (usize, Vec<Pair>) {
        // Complete command names until the first space
        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<16} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return (0, matches);
        }

        let (cmd, args) = input.split_once(' ').unwrap_or((input, ""));
        match cmd {
            "/content" => {
                let prefix_start = input.len() - args.len();
                (prefix_start, self.matching_titles(args))
            }
            // /hybrid <user_id> <title>
            "/hybrid" => match args.split_once(' ') {
                Some((_, title)) => {
                    let prefix_start = input.len() - title.len();
                    (prefix_start, self.matching_titles(title))
                }
                None => (pos, Vec::new()),
            },
            _ => (pos, Vec::new()),
        }
    }
}

impl Hinter for BookrecHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        // Show first matching command as ghost text
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for BookrecHelper {}
impl Validator for BookrecHelper {}
impl Helper for BookrecHelper {}

/// Closest known command to a mistyped one, if any is within two edits.
pub fn suggest_command(cmd: &str) -> Option<&'static str> {
    let typed = format!("/{}", cmd.trim_start_matches('/'));
    COMMANDS
        .iter()
        .map(|(name, _)| (*name, edit_distance(&typed, name)))
        .filter(|&(_, distance)| distance <= 2)
        .min_by_key(|&(_, distance)| distance)
        .map(|(name, _)| name)
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut current = vec![i + 1; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        prev = current;
    }
    prev[b.len()]
}

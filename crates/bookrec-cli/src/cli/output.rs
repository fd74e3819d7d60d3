//! Shared CLI output formatting: colors, symbols, and result rendering.

use bookrec::{EngineStats, ScoredBook, SimilarUser};
use std::io::IsTerminal;

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    // Respect --no-color flag via our global flag
    if std::env::var("BOOKREC_NO_COLOR").is_ok() {
        return false;
    }
    std::io::stdout().is_terminal()
}

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    /// Builder that never emits escape codes.
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    /// Yellow warning symbol.
    pub fn warn_sym(&self) -> &str {
        if self.use_color {
            "\x1b[33m\u{26a0}\x1b[0m"
        } else {
            "??"
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint(YELLOW, s)
    }

    pub fn cyan(&self, s: &str) -> String {
        self.paint(CYAN, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }

    pub fn uses_color(&self) -> bool {
        self.use_color
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if --quiet mode is active.
pub fn is_quiet() -> bool {
    std::env::var("BOOKREC_QUIET").is_ok()
}

/// Check if --json mode is active.
pub fn is_json() -> bool {
    std::env::var("BOOKREC_JSON").is_ok()
}

/// Print JSON output to stdout.
pub fn print_json(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string_pretty(value) {
        println!("{s}");
    }
}

/// Print a section header (e.g., "Recommended Books").
pub fn print_section(s: &Styled, title: &str) {
    println!("  {}", s.bold(title));
}

/// Print the soft warning shown for a user id with no ratings.
pub fn print_user_not_found(s: &Styled) {
    eprintln!("  {} {}", s.warn_sym(), s.yellow("User ID not found in dataset."));
}

/// One line per recommended book, in rank order.
pub fn book_lines(books: &[ScoredBook]) -> Vec<String> {
    books.iter().map(|b| b.title.clone()).collect()
}

/// One line per similar user, scores shown with two decimals.
pub fn user_lines(users: &[SimilarUser]) -> Vec<String> {
    users
        .iter()
        .map(|u| {
            format!(
                "User ID: {} (Similarity Score: {:.2})",
                u.user_id,
                u.display_score()
            )
        })
        .collect()
}

/// Aligned key/value lines for session statistics.
pub fn stats_lines(stats: &EngineStats) -> Vec<String> {
    vec![
        format!("Books:         {}", stats.books),
        format!("Users:         {}", stats.users),
        format!("Rating events: {}", stats.rating_events),
        format!("Book columns:  {}", stats.book_columns),
        format!("Vocabulary:    {}", stats.vocabulary),
    ]
}

//! One-shot subcommands: `content`, `collab`, `hybrid`, `titles`, `stats`.
//!
//! Each command renders either styled text or, with `--json`, a JSON document on
//! stdout. An unknown user is a warning, never a failing exit status.

use crate::cli::output::{self, Styled};
use anyhow::Result;
use bookrec::{Lookup, Recommender, ScoredBook, SimilarUser, UserId};
use serde_json::json;

/// `bookrec content <TITLE>`
pub fn content(rec: &Recommender, title: &str) -> Result<()> {
    let books = rec.recommend_by_content(title)?;

    if output::is_json() {
        output::print_json(&json!({
            "mode": "content",
            "title": title,
            "recommendations": books,
        }));
        return Ok(());
    }

    print_books(&Styled::new(), "Recommended Books (Content-Based):", &books);
    Ok(())
}

/// `bookrec collab <USER_ID>`
pub fn collab(rec: &Recommender, user: UserId) -> Result<()> {
    let outcome = rec.recommend_by_collaboration(user);

    if output::is_json() {
        output::print_json(&collab_json(user, &outcome));
        return Ok(());
    }

    let s = Styled::new();
    match outcome {
        Lookup::Found(users) => print_users(&s, &users),
        Lookup::NotFound(_) => output::print_user_not_found(&s),
    }
    Ok(())
}

/// `bookrec hybrid <TITLE> --user <USER_ID>`
pub fn hybrid(rec: &Recommender, title: &str, user: UserId) -> Result<()> {
    let outcome = rec.recommend_hybrid(title, user)?;

    if output::is_json() {
        output::print_json(&json!({
            "mode": "hybrid",
            "title": title,
            "user_id": user,
            "outcome": outcome,
        }));
        return Ok(());
    }

    let s = Styled::new();
    match outcome {
        Lookup::Found(books) => print_books(&s, "Hybrid Recommendations:", &books),
        Lookup::NotFound(_) => output::print_user_not_found(&s),
    }
    Ok(())
}

/// `bookrec titles`: every title a query can be issued for, in catalog order.
pub fn titles(rec: &Recommender) -> Result<()> {
    let titles: Vec<&str> = rec.catalog().titles().collect();

    if output::is_json() {
        output::print_json(&json!({ "titles": titles }));
        return Ok(());
    }

    for title in titles {
        println!("{title}");
    }
    Ok(())
}

/// `bookrec stats`: sizes of the session's matrices and the user id range.
pub fn stats(rec: &Recommender) -> Result<()> {
    let stats = rec.stats();
    let range = rec.catalog().user_id_range();

    if output::is_json() {
        output::print_json(&json!({
            "stats": stats,
            "user_id_range": range.map(|(min, max)| json!({ "min": min, "max": max })),
        }));
        return Ok(());
    }

    let s = Styled::new();
    output::print_section(&s, "Session");
    for line in output::stats_lines(&stats) {
        println!("    {line}");
    }
    if let Some((min, max)) = range {
        println!("    User IDs:      {min}..={max}");
    }
    Ok(())
}

pub(crate) fn print_books(s: &Styled, heading: &str, books: &[ScoredBook]) {
    output::print_section(s, heading);
    if books.is_empty() && !output::is_quiet() {
        println!("    {}", s.dim("(no other books in the catalog)"));
    }
    for line in output::book_lines(books) {
        println!("    {line}");
    }
}

pub(crate) fn print_users(s: &Styled, users: &[SimilarUser]) {
    output::print_section(s, "Most Similar Users:");
    if users.is_empty() && !output::is_quiet() {
        println!("    {}", s.dim("(no other users rated anything)"));
    }
    for line in output::user_lines(users) {
        println!("    {line}");
    }
}

fn collab_json(user: UserId, outcome: &Lookup<Vec<SimilarUser>>) -> serde_json::Value {
    let outcome = match outcome {
        Lookup::Found(users) => json!({
            "status": "found",
            "result": users
                .iter()
                .map(|u| {
                    json!({
                        "user_id": u.user_id,
                        "score": u.score,
                        "display_score": u.display_score(),
                    })
                })
                .collect::<Vec<_>>(),
        }),
        Lookup::NotFound(id) => json!({ "status": "not_found", "result": id }),
    };
    json!({ "mode": "collaborative", "user_id": user, "outcome": outcome })
}

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::MovieStore;

/// Case-insensitive substring search over titles, in collection order.
pub fn run<S: MovieStore>(store: &S, term: &str) -> Result<CmdResult> {
    let movies = store.list_movies()?;
    let term_lower = term.to_lowercase();

    let matches: Vec<_> = movies
        .into_iter()
        .filter(|m| m.title.to_lowercase().contains(&term_lower))
        .collect();

    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::info("Movie not found"));
    }
    Ok(result.with_listed_movies(matches))
}

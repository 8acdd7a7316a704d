use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MovieError, Result};
use crate::model::Movie;
use crate::store::MovieStore;

/// Adds a movie by looking its metadata up first.
///
/// The stored record uses the canonical title returned by the lookup, not
/// the text the user typed. Duplicates (typed or canonical) and failed
/// lookups leave storage untouched and come back as messages.
pub fn run<S: MovieStore>(store: &mut S, title: &str) -> Result<CmdResult> {
    let title = title.trim();
    let mut result = CmdResult::default();

    if title.is_empty() {
        result.add_message(CmdMessage::warning("Movie title cannot be empty"));
        return Ok(result);
    }

    let movies = store.list_movies()?;
    if movies.contains(title) {
        result.add_message(CmdMessage::warning(format!("Movie {} already exist!", title)));
        return Ok(result);
    }

    let info = match store.fetch_external_info(title) {
        Ok(info) => info,
        Err(MovieError::MetadataNotFound(_)) => {
            result.add_message(CmdMessage::error(format!(
                "There was a problem fetching movie info for {}",
                title
            )));
            return Ok(result);
        }
        Err(e) => return Err(e),
    };

    match store.add_movie(&info) {
        Ok(()) => {}
        Err(MovieError::DuplicateTitle(canonical)) => {
            result.add_message(CmdMessage::warning(format!(
                "Movie {} already exist!",
                canonical
            )));
            return Ok(result);
        }
        Err(e) => return Err(e),
    }

    result.add_message(CmdMessage::success(format!(
        "Movie {} successfully added",
        info.title
    )));
    Ok(result.with_affected_movies(vec![Movie::new(info)]))
}

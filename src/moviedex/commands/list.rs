use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::MovieStore;

pub fn run<S: MovieStore>(store: &S) -> Result<CmdResult> {
    let movies = store.list_movies()?;
    let total = movies.len();

    Ok(CmdResult::default()
        .with_message(CmdMessage::info(format!("{} movies in total", total)))
        .with_listed_movies(movies.into_iter().collect()))
}

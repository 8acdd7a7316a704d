use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::MovieStore;

/// All movies by rating, highest first. Equal ratings keep collection order.
pub fn run<S: MovieStore>(store: &S) -> Result<CmdResult> {
    let mut movies: Vec<_> = store.list_movies()?.into_iter().collect();
    // sort_by is stable
    movies.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    Ok(CmdResult::default().with_listed_movies(movies))
}

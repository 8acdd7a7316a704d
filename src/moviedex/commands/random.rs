use crate::commands::CmdResult;
use crate::error::{MovieError, Result};
use crate::store::MovieStore;
use rand::Rng;

/// Picks one movie uniformly at random.
pub fn run<S: MovieStore, R: Rng>(store: &S, rng: &mut R) -> Result<CmdResult> {
    let movies = store.list_movies()?;
    if movies.is_empty() {
        return Err(MovieError::EmptyCollection);
    }

    let index = rng.gen_range(0..movies.len());
    let picked = movies
        .get_index(index)
        .cloned()
        .ok_or(MovieError::EmptyCollection)?;
    Ok(CmdResult::default().with_listed_movies(vec![picked]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::store_with;
    use crate::store::memory::InMemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn picks_a_movie_from_the_collection() {
        let store = store_with(&[("Heat", 8.3), ("Alien", 8.5), ("Ronin", 7.2)]);
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let result = run(&store, &mut rng).unwrap();
            assert_eq!(result.listed_movies.len(), 1);
            seen.insert(result.listed_movies[0].title.clone());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn empty_collection_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = run(&InMemoryStore::new(), &mut rng).unwrap_err();
        assert!(matches!(err, MovieError::EmptyCollection));
    }
}

use crate::commands::CmdResult;
use crate::error::{MovieError, Result};
use crate::model::{Collection, Movie};
use crate::store::MovieStore;

/// Summary of the ratings in a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub mean: f64,
    pub median: f64,
    /// Highest rated; the first one in collection order on ties.
    pub best: Movie,
    /// Lowest rated; the first one in collection order on ties.
    pub worst: Movie,
}

impl RatingStats {
    pub fn compute(movies: &Collection) -> Result<Self> {
        let mut iter = movies.iter();
        let first = iter.next().ok_or(MovieError::EmptyCollection)?;

        let mut best = first;
        let mut worst = first;
        for movie in iter {
            if movie.rating > best.rating {
                best = movie;
            }
            if movie.rating < worst.rating {
                worst = movie;
            }
        }

        let ratings = movies.ratings();
        Ok(Self {
            mean: mean(&ratings),
            median: median(&ratings),
            best: best.clone(),
            worst: worst.clone(),
        })
    }
}

fn mean(ratings: &[f64]) -> f64 {
    ratings.iter().sum::<f64>() / ratings.len() as f64
}

/// Middle value after sorting; the average of the two middle values for
/// an even count. Callers guarantee a non-empty slice.
fn median(ratings: &[f64]) -> f64 {
    let mut sorted = ratings.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn run<S: MovieStore>(store: &S) -> Result<CmdResult> {
    let movies = store.list_movies()?;
    let stats = RatingStats::compute(&movies)?;
    Ok(CmdResult::default().with_stats(stats))
}

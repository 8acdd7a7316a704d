use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One movie in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub release_year: i32,
    pub rating: f64,
    /// Poster URL or path; empty when the lookup had none.
    pub poster: String,
    pub notes: String,
}

impl Movie {
    pub fn new(info: MovieInfo) -> Self {
        Self {
            title: info.title,
            release_year: info.release_year,
            rating: info.rating,
            poster: info.poster,
            notes: String::new(),
        }
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.trim().is_empty()
    }
}

/// The attributes a metadata lookup resolves for a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieInfo {
    pub title: String,
    pub release_year: i32,
    pub rating: f64,
    pub poster: String,
}

impl MovieInfo {
    pub fn new(title: impl Into<String>, release_year: i32, rating: f64, poster: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            release_year,
            rating,
            poster: poster.into(),
        }
    }
}

/// Movies keyed by title, in insertion (file) order.
///
/// Keys are case-sensitive. Removing a movie keeps the relative order of
/// the others, so listings stay stable across deletes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    movies: IndexMap<String, Movie>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.movies.contains_key(title)
    }

    pub fn get(&self, title: &str) -> Option<&Movie> {
        self.movies.get(title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut Movie> {
        self.movies.get_mut(title)
    }

    pub fn get_index(&self, index: usize) -> Option<&Movie> {
        self.movies.get_index(index).map(|(_, movie)| movie)
    }

    /// Inserts a movie, returning the one it replaced. A replaced movie
    /// keeps its original position.
    pub fn insert(&mut self, movie: Movie) -> Option<Movie> {
        self.movies.insert(movie.title.clone(), movie)
    }

    pub fn remove(&mut self, title: &str) -> Option<Movie> {
        self.movies.shift_remove(title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    pub fn ratings(&self) -> Vec<f64> {
        self.iter().map(|m| m.rating).collect()
    }
}

impl FromIterator<Movie> for Collection {
    fn from_iter<T: IntoIterator<Item = Movie>>(iter: T) -> Self {
        let mut collection = Collection::new();
        for movie in iter {
            collection.insert(movie);
        }
        collection
    }
}

impl IntoIterator for Collection {
    type Item = Movie;
    type IntoIter = indexmap::map::IntoValues<String, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.into_values()
    }
}

/// Parses the leading year of a free-form year field.
///
/// Lookups and older data files report years as text, sometimes as a
/// range (`"2010–2014"`) or with suffixes (`"2019 "`).
pub fn parse_year(raw: &str) -> Option<i32> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parses a rating field, rejecting placeholders such as `"N/A"`.
pub fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, rating: f64) -> Movie {
        Movie::new(MovieInfo::new(title, 2000, rating, ""))
    }

    #[test]
    fn new_movie_has_empty_notes() {
        let m = Movie::new(MovieInfo::new("Heat", 1995, 8.3, "http://x/heat.jpg"));
        assert_eq!(m.notes, "");
        assert!(!m.has_notes());
    }

    #[test]
    fn collection_keeps_insertion_order_across_removal() {
        let mut c: Collection = ["A", "B", "C", "D"]
            .into_iter()
            .map(|t| movie(t, 5.0))
            .collect();
        c.remove("B");

        let titles: Vec<&str> = c.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C", "D"]);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let c: Collection = vec![movie("Alien", 8.5)].into_iter().collect();
        assert!(c.contains("Alien"));
        assert!(!c.contains("alien"));
    }

    #[test]
    fn parses_year_ranges_and_plain_years() {
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year("2010–2014"), Some(2010));
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn rating_placeholders_are_rejected() {
        assert_eq!(parse_rating("8.7"), Some(8.7));
        assert_eq!(parse_rating(" 7 "), Some(7.0));
        assert_eq!(parse_rating("N/A"), None);
        assert_eq!(parse_rating("NaN"), None);
    }
}

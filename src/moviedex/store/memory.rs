use super::MovieStore;
use crate::error::{MovieError, Result};
use crate::fetch::{MetadataSource, StaticSource};
use crate::model::{Collection, Movie, MovieInfo};
use std::path::{Path, PathBuf};

/// In-memory storage for testing and development.
/// Does NOT persist data.
pub struct InMemoryStore {
    movies: Collection,
    path: PathBuf,
    source: Box<dyn MetadataSource>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            movies: Collection::new(),
            path: PathBuf::from("memory://movies"),
            source: Box::new(StaticSource::new()),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl MetadataSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Pretend the collection lives at `path`, for commands that write
    /// files next to the data file.
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_movies(mut self, movies: impl IntoIterator<Item = Movie>) -> Self {
        for movie in movies {
            self.movies.insert(movie);
        }
        self
    }
}

impl MovieStore for InMemoryStore {
    fn list_movies(&self) -> Result<Collection> {
        Ok(self.movies.clone())
    }

    fn add_movie(&mut self, info: &MovieInfo) -> Result<()> {
        if self.movies.contains(&info.title) {
            return Err(MovieError::DuplicateTitle(info.title.clone()));
        }
        self.movies.insert(Movie::new(info.clone()));
        Ok(())
    }

    fn delete_movie(&mut self, title: &str) -> Result<()> {
        self.movies
            .remove(title)
            .map(|_| ())
            .ok_or_else(|| MovieError::RecordNotFound(title.to_string()))
    }

    fn update_movie(&mut self, title: &str, notes: &str) -> Result<()> {
        let movie = self
            .movies
            .get_mut(title)
            .ok_or_else(|| MovieError::RecordNotFound(title.to_string()))?;
        movie.notes = notes.to_string();
        Ok(())
    }

    fn file_path(&self) -> &Path {
        &self.path
    }

    fn source(&self) -> &dyn MetadataSource {
        self.source.as_ref()
    }
}

// --- Test Fixtures ---

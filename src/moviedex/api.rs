//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all moviedex operations, whatever UI drives them.
//!
//! The facade dispatches to the matching `commands::*::run` and returns its
//! `Result<CmdResult>` untouched. It holds no business logic and performs no
//! terminal I/O.
//!
//! `MovieApi<S: MovieStore>` is generic over the storage backend:
//! - Production: `MovieApi<JsonStore>` or `MovieApi<CsvStore>`
//! - Testing: `MovieApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::store::MovieStore;
use std::path::{Path, PathBuf};

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, RatingStats};

/// The main API facade for moviedex operations.
pub struct MovieApi<S: MovieStore> {
    store: S,
    template: Option<PathBuf>,
}

impl<S: MovieStore> MovieApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            template: None,
        }
    }

    /// Use this website template instead of the default lookup.
    pub fn with_template(mut self, template: Option<PathBuf>) -> Self {
        self.template = template;
        self
    }

    pub fn data_file(&self) -> &Path {
        self.store.file_path()
    }

    /// Load the collection once, creating the data file if needed.
    pub fn open(&self) -> Result<usize> {
        Ok(self.store.list_movies()?.len())
    }

    pub fn list_movies(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn add_movie(&mut self, title: &str) -> Result<CmdResult> {
        commands::add::run(&mut self.store, title)
    }

    pub fn delete_movie(&mut self, title: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, title)
    }

    pub fn update_movie(&mut self, title: &str, notes: &str) -> Result<CmdResult> {
        commands::update::run(&mut self.store, title, notes)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn random_movie(&self) -> Result<CmdResult> {
        commands::random::run(&self.store, &mut rand::thread_rng())
    }

    pub fn search_movies(&self, term: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn movies_by_rating(&self) -> Result<CmdResult> {
        commands::sort::run(&self.store)
    }

    /// `name` gets a `.png` extension when it lacks one.
    pub fn rating_histogram(&self, name: &str) -> Result<CmdResult> {
        let target = commands::histogram::output_path(name);
        commands::histogram::run(&self.store, &target)
    }

    pub fn generate_website(&self) -> Result<CmdResult> {
        commands::website::run(&self.store, self.template.as_deref())
    }
}

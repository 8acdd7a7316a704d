use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MovieError, Result};
use crate::model::Collection;
use crate::store::{write_data_file, MovieStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Replaced with the generated list items.
pub const GRID_MARKER: &str = "__TEMPLATE_MOVIE_GRID__";

/// Looked up next to the data file when no template is configured.
pub const TEMPLATE_FILENAME: &str = "index_template.html";

pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/index_template.html");

const EMPTY_GRID: &str = "<h2>No movies in database</h2>";

/// Template text for a data file: the explicit path if given, else
/// `index_template.html` beside the data file, else the built-in one.
pub fn load_template(explicit: Option<&Path>, data_file: &Path) -> Result<String> {
    if let Some(path) = explicit {
        return fs::read_to_string(path).map_err(MovieError::Io);
    }

    let beside = data_file
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(TEMPLATE_FILENAME);
    if beside.is_file() {
        tracing::debug!("using template {}", beside.display());
        return fs::read_to_string(beside).map_err(MovieError::Io);
    }

    Ok(DEFAULT_TEMPLATE.to_string())
}

/// `<li>` entries with poster, title and year for every movie.
pub fn render_grid(movies: &Collection) -> String {
    if movies.is_empty() {
        return EMPTY_GRID.to_string();
    }

    let mut out = String::new();
    for movie in movies.iter() {
        out.push_str("<li><div class=\"movie\">");
        out.push_str(&format!(
            "<img class=\"movie-poster\" src=\"{}\"/>",
            escape_html(&movie.poster)
        ));
        out.push_str(&format!(
            "<div class=\"movie-title\">{}</div>",
            escape_html(&movie.title)
        ));
        out.push_str(&format!(
            "<div class=\"movie-year\">{}</div>",
            movie.release_year
        ));
        out.push_str("</div></li>");
    }
    out
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `movies.json` -> `movies.html`, in the same directory.
pub fn output_path(data_file: &Path) -> PathBuf {
    data_file.with_extension("html")
}

pub fn run<S: MovieStore>(store: &S, template: Option<&Path>) -> Result<CmdResult> {
    let movies = store.list_movies()?;
    let template = load_template(template, store.file_path())?;
    if !template.contains(GRID_MARKER) {
        tracing::warn!("template has no {} marker, movies will not appear", GRID_MARKER);
    }

    let page = template.replace(GRID_MARKER, &render_grid(&movies));
    let target = output_path(store.file_path());
    write_data_file(&target, page.as_bytes())?;

    Ok(CmdResult::default()
        .with_message(CmdMessage::success("Website was generated successfully."))
        .with_output_paths(vec![target]))
}

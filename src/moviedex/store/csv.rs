use super::{read_data_file, write_data_file, MovieStore};
use crate::error::{MovieError, Result};
use crate::fetch::MetadataSource;
use crate::model::{parse_rating, Collection, Movie, MovieInfo};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 5] = ["title", "release_year", "rating", "poster", "notes"];

/// Column positions resolved from the header row, so files written with a
/// different column order still read correctly.
struct Columns {
    title: usize,
    release_year: usize,
    rating: usize,
    poster: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn resolve(path: &Path, headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| MovieError::StorageUnavailable {
                path: path.to_path_buf(),
                reason: format!("missing column {:?}", name),
            })
        };
        Ok(Self {
            title: require("title")?,
            release_year: require("release_year")?,
            rating: require("rating")?,
            poster: find("poster"),
            notes: find("notes"),
        })
    }
}

/// Stores the collection as a CSV table with a header row.
///
/// Numbers are stored as text and parsed on every read; a single bad
/// numeric field fails the whole read.
pub struct CsvStore {
    path: PathBuf,
    source: Box<dyn MetadataSource>,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>, source: Box<dyn MetadataSource>) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    fn ensure_file(&self) -> Result<()> {
        if !self.path.exists() {
            tracing::debug!("creating empty collection at {}", self.path.display());
            self.save_rows(&Collection::new())?;
        }
        Ok(())
    }

    fn load_rows(&self) -> Result<Collection> {
        self.read_table().map(|(movies, _)| movies)
    }

    /// Reads the table and reports whether a row can be appended as-is:
    /// the header is exactly [`HEADER`] and the file ends with a newline.
    fn read_table(&self) -> Result<(Collection, bool)> {
        self.ensure_file()?;
        let content = read_data_file(&self.path)?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers = reader
            .headers()
            .map_err(|e| MovieError::StorageUnavailable {
                path: self.path.clone(),
                reason: e.to_string(),
            })?
            .clone();
        let cols = Columns::resolve(&self.path, &headers)?;
        let appendable = headers.iter().eq(HEADER) && content.ends_with('\n');

        let mut movies = Collection::new();
        for record in reader.records() {
            let record = record.map_err(|e| MovieError::StorageUnavailable {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let field = |idx: usize| record.get(idx).unwrap_or("");
            let optional = |idx: Option<usize>| idx.map(field).unwrap_or("").to_string();

            let title = field(cols.title);
            if title.is_empty() {
                tracing::warn!("skipping row without title on line {}", line);
                continue;
            }

            let rating =
                parse_rating(field(cols.rating)).ok_or_else(|| MovieError::MalformedRecord {
                    line,
                    reason: format!("rating {:?} is not a finite number", field(cols.rating)),
                })?;
            let release_year = field(cols.release_year)
                .trim()
                .parse::<i32>()
                .map_err(|e| MovieError::MalformedRecord {
                    line,
                    reason: format!("release_year {:?}: {}", field(cols.release_year), e),
                })?;

            movies.insert(Movie {
                title: title.to_string(),
                release_year,
                rating,
                poster: optional(cols.poster),
                notes: optional(cols.notes),
            });
        }
        Ok((movies, appendable))
    }

    fn save_rows(&self, movies: &Collection) -> Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADER)?;
        for movie in movies.iter() {
            writer.write_record(to_record(movie))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| MovieError::Io(e.into_error()))?;
        write_data_file(&self.path, &bytes)
    }
}

fn to_record(movie: &Movie) -> [String; 5] {
    [
        movie.title.clone(),
        movie.release_year.to_string(),
        movie.rating.to_string(),
        movie.poster.clone(),
        movie.notes.clone(),
    ]
}

impl MovieStore for CsvStore {
    fn list_movies(&self) -> Result<Collection> {
        self.load_rows()
    }

    fn add_movie(&mut self, info: &MovieInfo) -> Result<()> {
        let (mut movies, appendable) = self.read_table()?;
        if movies.contains(&info.title) {
            return Err(MovieError::DuplicateTitle(info.title.clone()));
        }

        if !appendable {
            tracing::debug!("rewriting {} in canonical layout", self.path.display());
            movies.insert(Movie::new(info.clone()));
            return self.save_rows(&movies);
        }

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(MovieError::Io)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(to_record(&Movie::new(info.clone())))?;
        writer.flush().map_err(MovieError::Io)?;
        tracing::debug!("appended {:?} to {}", info.title, self.path.display());
        Ok(())
    }

    fn delete_movie(&mut self, title: &str) -> Result<()> {
        let mut movies = self.load_rows()?;
        if movies.remove(title).is_none() {
            return Err(MovieError::RecordNotFound(title.to_string()));
        }
        self.save_rows(&movies)
    }

    fn update_movie(&mut self, title: &str, notes: &str) -> Result<()> {
        let mut movies = self.load_rows()?;
        let movie = movies
            .get_mut(title)
            .ok_or_else(|| MovieError::RecordNotFound(title.to_string()))?;
        movie.notes = notes.to_string();
        self.save_rows(&movies)
    }

    fn file_path(&self) -> &Path {
        &self.path
    }

    fn source(&self) -> &dyn MetadataSource {
        self.source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticSource;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, CsvStore) {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("movies.csv"), Box::new(StaticSource::new()));
        (dir, store)
    }

    #[test]
    fn list_creates_headered_file() {
        let (dir, store) = setup();
        assert!(store.list_movies().unwrap().is_empty());

        let on_disk = fs::read_to_string(dir.path().join("movies.csv")).unwrap();
        assert_eq!(on_disk, "title,release_year,rating,poster,notes\n");
    }

    #[test]
    fn add_appends_rows_in_order() {
        let (dir, mut store) = setup();
        store.add_movie(&MovieInfo::new("Heat", 1995, 8.3, "")).unwrap();
        store
            .add_movie(&MovieInfo::new("Up, Up and Away", 2000, 5.5, "http://p/up.jpg"))
            .unwrap();

        let on_disk = fs::read_to_string(dir.path().join("movies.csv")).unwrap();
        assert_eq!(
            on_disk,
            "title,release_year,rating,poster,notes\n\
             Heat,1995,8.3,,\n\
             \"Up, Up and Away\",2000,5.5,http://p/up.jpg,\n"
        );

        let movies = store.list_movies().unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies.get("Up, Up and Away").unwrap().poster, "http://p/up.jpg");
    }

    #[test]
    fn duplicate_add_is_rejected_without_new_row() {
        let (dir, mut store) = setup();
        store.add_movie(&MovieInfo::new("Heat", 1995, 8.3, "")).unwrap();
        let err = store.add_movie(&MovieInfo::new("Heat", 1995, 8.3, "")).unwrap_err();
        assert!(matches!(err, MovieError::DuplicateTitle(_)));

        let on_disk = fs::read_to_string(dir.path().join("movies.csv")).unwrap();
        assert_eq!(on_disk.lines().count(), 2);
    }

    #[test]
    fn update_and_delete_preserve_header() {
        let (dir, mut store) = setup();
        store.add_movie(&MovieInfo::new("Heat", 1995, 8.3, "")).unwrap();
        store.add_movie(&MovieInfo::new("Alien", 1979, 8.5, "")).unwrap();

        store.update_movie("Alien", "in space, no one can hear").unwrap();
        store.delete_movie("Heat").unwrap();

        let on_disk = fs::read_to_string(dir.path().join("movies.csv")).unwrap();
        assert!(on_disk.starts_with("title,release_year,rating,poster,notes\n"));

        let movies = store.list_movies().unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies.get("Alien").unwrap().notes, "in space, no one can hear");
    }

    #[test]
    fn delete_missing_title_leaves_file_untouched() {
        let (dir, mut store) = setup();
        store.add_movie(&MovieInfo::new("Heat", 1995, 8.3, "")).unwrap();
        let path = dir.path().join("movies.csv");
        let before = fs::read(&path).unwrap();

        assert!(matches!(
            store.delete_movie("Ronin").unwrap_err(),
            MovieError::RecordNotFound(_)
        ));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn malformed_rating_fails_whole_read() {
        let (dir, store) = setup();
        fs::write(
            dir.path().join("movies.csv"),
            "title,release_year,rating,poster,notes\nHeat,1995,8.3,,\nAlien,1979,great,,\n",
        )
        .unwrap();

        let err = store.list_movies().unwrap_err();
        assert!(matches!(err, MovieError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn reads_reordered_columns_and_skips_blank_titles() {
        let (dir, store) = setup();
        fs::write(
            dir.path().join("movies.csv"),
            "rating,title,release_year\n7.5,Ronin,1998\n1.0,,2001\n",
        )
        .unwrap();

        let movies = store.list_movies().unwrap();
        assert_eq!(movies.len(), 1);
        let ronin = movies.get("Ronin").unwrap();
        assert_eq!(ronin.rating, 7.5);
        assert_eq!(ronin.notes, "");
    }

    #[test]
    fn add_to_reordered_file_rewrites_in_canonical_layout() {
        let (dir, mut store) = setup();
        let path = dir.path().join("movies.csv");
        fs::write(&path, "rating,title,release_year\n7.5,Ronin,1998\n").unwrap();

        store.add_movie(&MovieInfo::new("Heat", 1995, 8.3, "")).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "title,release_year,rating,poster,notes\n\
             Ronin,1998,7.5,,\n\
             Heat,1995,8.3,,\n"
        );
        let movies = store.list_movies().unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Ronin", "Heat"]);
        assert_eq!(movies.get("Heat").unwrap().rating, 8.3);
    }

    #[test]
    fn add_to_file_without_trailing_newline_keeps_rows_apart() {
        let (dir, mut store) = setup();
        let path = dir.path().join("movies.csv");
        fs::write(&path, "title,release_year,rating,poster,notes\nRonin,1998,7.5,,").unwrap();

        store.add_movie(&MovieInfo::new("Heat", 1995, 8.3, "")).unwrap();

        let movies = store.list_movies().unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies.get("Ronin").unwrap().notes, "");
        assert!(movies.contains("Heat"));
    }

    #[test]
    fn non_finite_rating_is_malformed() {
        let (dir, store) = setup();
        for bad in ["NaN", "inf"] {
            fs::write(
                dir.path().join("movies.csv"),
                format!("title,release_year,rating,poster,notes\nHeat,1995,{},,\n", bad),
            )
            .unwrap();
            assert!(matches!(
                store.list_movies().unwrap_err(),
                MovieError::MalformedRecord { line: 2, .. }
            ));
        }
    }

    #[test]
    fn missing_required_column_is_unavailable() {
        let (dir, store) = setup();
        fs::write(dir.path().join("movies.csv"), "title,poster\nHeat,\n").unwrap();
        assert!(matches!(
            store.list_movies().unwrap_err(),
            MovieError::StorageUnavailable { .. }
        ));
    }
}

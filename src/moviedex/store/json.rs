use super::{read_data_file, write_data_file, MovieStore};
use crate::error::{MovieError, Result};
use crate::fetch::MetadataSource;
use crate::model::{parse_rating, parse_year, Collection, Movie, MovieInfo};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// One value of the JSON document. The title is the object key.
#[derive(Debug, Serialize, Deserialize)]
struct JsonEntry {
    #[serde(deserialize_with = "lenient_rating")]
    rating: f64,
    #[serde(deserialize_with = "lenient_year")]
    release_year: i32,
    #[serde(default, deserialize_with = "text_or_null")]
    poster: String,
    #[serde(default, deserialize_with = "notes_text")]
    notes: String,
}

type Document = IndexMap<String, JsonEntry>;

impl JsonEntry {
    fn into_movie(self, title: String) -> Movie {
        Movie {
            title,
            release_year: self.release_year,
            rating: self.rating,
            poster: self.poster,
            notes: self.notes,
        }
    }
}

/// Stores the collection as a single pretty-printed JSON object keyed by title.
pub struct JsonStore {
    path: PathBuf,
    source: Box<dyn MetadataSource>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>, source: Box<dyn MetadataSource>) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    fn load_document(&self) -> Result<Document> {
        if !self.path.exists() {
            tracing::debug!("creating empty collection at {}", self.path.display());
            let empty = Document::new();
            self.save_document(&empty)?;
            return Ok(empty);
        }

        let content = read_data_file(&self.path)?;
        serde_json::from_str(&content).map_err(|e| MovieError::StorageUnavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn save_document(&self, doc: &Document) -> Result<()> {
        let content = serde_json::to_string_pretty(doc).map_err(MovieError::Serialization)?;
        write_data_file(&self.path, content.as_bytes())
    }
}

impl MovieStore for JsonStore {
    fn list_movies(&self) -> Result<Collection> {
        let doc = self.load_document()?;
        Ok(doc
            .into_iter()
            .map(|(title, entry)| entry.into_movie(title))
            .collect())
    }

    fn add_movie(&mut self, info: &MovieInfo) -> Result<()> {
        let mut doc = self.load_document()?;
        if doc.contains_key(&info.title) {
            return Err(MovieError::DuplicateTitle(info.title.clone()));
        }
        doc.insert(
            info.title.clone(),
            JsonEntry {
                rating: info.rating,
                release_year: info.release_year,
                poster: info.poster.clone(),
                notes: String::new(),
            },
        );
        self.save_document(&doc)
    }

    fn delete_movie(&mut self, title: &str) -> Result<()> {
        let mut doc = self.load_document()?;
        if doc.shift_remove(title).is_none() {
            return Err(MovieError::RecordNotFound(title.to_string()));
        }
        self.save_document(&doc)
    }

    fn update_movie(&mut self, title: &str, notes: &str) -> Result<()> {
        let mut doc = self.load_document()?;
        let entry = doc
            .get_mut(title)
            .ok_or_else(|| MovieError::RecordNotFound(title.to_string()))?;
        entry.notes = notes.to_string();
        self.save_document(&doc)
    }

    fn file_path(&self) -> &Path {
        &self.path
    }

    fn source(&self) -> &dyn MetadataSource {
        self.source.as_ref()
    }
}

// Older documents hold the lookup's raw strings ("8.7", "2010–2014") and
// list-valued notes; accept those on read, always write the typed form.

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Notes {
    Text(String),
    List(Vec<String>),
}

fn lenient_rating<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    match Numeric::deserialize(d)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => parse_rating(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid rating {:?}", s))),
    }
}

fn lenient_year<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<i32, D::Error> {
    match Numeric::deserialize(d)? {
        Numeric::Number(n)
            if n.fract() == 0.0 && n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX) =>
        {
            Ok(n as i32)
        }
        Numeric::Number(n) => Err(serde::de::Error::custom(format!("invalid year {}", n))),
        Numeric::Text(s) => {
            parse_year(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid year {:?}", s)))
        }
    }
}

fn text_or_null<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn notes_text<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(match Option::<Notes>::deserialize(d)? {
        Some(Notes::Text(s)) => s,
        Some(Notes::List(items)) => items.join("; "),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticSource;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("movies.json"), Box::new(StaticSource::new()));
        (dir, store)
    }

    #[test]
    fn list_creates_empty_document() {
        let (dir, store) = setup();
        let movies = store.list_movies().unwrap();
        assert!(movies.is_empty());

        let on_disk = fs::read_to_string(dir.path().join("movies.json")).unwrap();
        assert_eq!(on_disk.trim(), "{}");
    }

    #[test]
    fn add_then_list_round_trips() {
        let (_dir, mut store) = setup();
        store
            .add_movie(&MovieInfo::new("Heat", 1995, 8.3, "http://img/heat.jpg"))
            .unwrap();
        store.add_movie(&MovieInfo::new("Alien", 1979, 8.5, "")).unwrap();
        store.update_movie("Heat", "rewatch in 4k").unwrap();

        let movies = store.list_movies().unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Heat", "Alien"]);

        let heat = movies.get("Heat").unwrap();
        assert_eq!(heat.release_year, 1995);
        assert_eq!(heat.rating, 8.3);
        assert_eq!(heat.poster, "http://img/heat.jpg");
        assert_eq!(heat.notes, "rewatch in 4k");
        assert_eq!(movies.get("Alien").unwrap().notes, "");
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let (_dir, mut store) = setup();
        store.add_movie(&MovieInfo::new("Heat", 1995, 8.3, "")).unwrap();
        let err = store
            .add_movie(&MovieInfo::new("Heat", 1995, 1.0, ""))
            .unwrap_err();
        assert!(matches!(err, MovieError::DuplicateTitle(t) if t == "Heat"));
        assert_eq!(store.list_movies().unwrap().get("Heat").unwrap().rating, 8.3);
    }

    #[test]
    fn delete_missing_title_leaves_file_untouched() {
        let (dir, mut store) = setup();
        store.add_movie(&MovieInfo::new("Heat", 1995, 8.3, "")).unwrap();
        let path = dir.path().join("movies.json");
        let before = fs::read(&path).unwrap();

        let err = store.delete_movie("heat").unwrap_err();
        assert!(matches!(err, MovieError::RecordNotFound(_)));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn update_missing_title_reports_not_found() {
        let (_dir, mut store) = setup();
        let err = store.update_movie("Nope", "notes").unwrap_err();
        assert!(matches!(err, MovieError::RecordNotFound(t) if t == "Nope"));
    }

    #[test]
    fn corrupt_document_is_unavailable() {
        let (dir, store) = setup();
        fs::write(dir.path().join("movies.json"), "{ not json").unwrap();
        let err = store.list_movies().unwrap_err();
        assert!(matches!(err, MovieError::StorageUnavailable { .. }));
    }

    #[test]
    fn out_of_range_year_is_unavailable() {
        let (dir, store) = setup();
        fs::write(
            dir.path().join("movies.json"),
            r#"{"Heat": {"rating": 8.3, "release_year": 1e12}}"#,
        )
        .unwrap();
        let err = store.list_movies().unwrap_err();
        assert!(matches!(err, MovieError::StorageUnavailable { .. }));
    }

    #[test]
    fn reads_legacy_string_fields() {
        let (dir, store) = setup();
        fs::write(
            dir.path().join("movies.json"),
            r#"{
                "Sherlock": {
                    "name": "Sherlock",
                    "rating": "9.1",
                    "release_year": "2010–2017",
                    "poster": null,
                    "notes": []
                },
                "Titanic": {"rating": 7.9, "release_year": 1997, "notes": ["long", "sad"]}
            }"#,
        )
        .unwrap();

        let movies = store.list_movies().unwrap();
        let sherlock = movies.get("Sherlock").unwrap();
        assert_eq!(sherlock.rating, 9.1);
        assert_eq!(sherlock.release_year, 2010);
        assert_eq!(sherlock.poster, "");
        assert_eq!(sherlock.notes, "");
        assert_eq!(movies.get("Titanic").unwrap().notes, "long; sad");
    }
}

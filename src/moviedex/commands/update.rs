use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MovieError, Result};
use crate::store::MovieStore;

pub fn run<S: MovieStore>(store: &mut S, title: &str, notes: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match store.update_movie(title, notes) {
        Ok(()) => {
            result.add_message(CmdMessage::success(format!(
                "Movie {} successfully updated",
                title
            )));
        }
        Err(e @ MovieError::RecordNotFound(_)) => {
            result.add_message(CmdMessage::warning(e.to_string()));
        }
        Err(e) => return Err(e),
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::store_with;

    #[test]
    fn replaces_notes() {
        let mut store = store_with(&[("Heat", 8.3)]);
        run(&mut store, "Heat", "first").unwrap();
        run(&mut store, "Heat", "De Niro vs Pacino").unwrap();

        let movies = store.list_movies().unwrap();
        assert_eq!(movies.get("Heat").unwrap().notes, "De Niro vs Pacino");
    }

    #[test]
    fn missing_title_leaves_collection_unchanged() {
        let mut store = store_with(&[("Heat", 8.3)]);
        let result = run(&mut store, "Ronin", "notes").unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(store.list_movies().unwrap().get("Heat").unwrap().notes, "");
    }
}

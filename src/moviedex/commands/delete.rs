use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MovieError, Result};
use crate::store::MovieStore;

pub fn run<S: MovieStore>(store: &mut S, title: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match store.delete_movie(title) {
        Ok(()) => {
            result.add_message(CmdMessage::success(format!(
                "Movie {} successfully deleted",
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

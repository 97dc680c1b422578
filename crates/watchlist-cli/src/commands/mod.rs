pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod form;
pub mod import;
pub mod list;
pub mod prompts;
pub mod toggle;

use crate::app;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::warn;
use watchlist_core::{ActionError, ListStatus, MovieList, Notice};
use watchlist_models::Movie;

/// Look up a movie in the loaded list.
///
/// A list that never loaded reports the load failure rather than a missing id.
pub(crate) fn find_movie(list: &MovieList, id: i64) -> Result<Movie> {
    if let ListStatus::FailedFirstLoad(msg) = list.status() {
        return Err(eyre!(msg));
    }
    list.find(id)
        .cloned()
        .ok_or_else(|| eyre!("No movie with id {}", id))
}

/// Print a failed action as an error notice and hand it back as a report
pub(crate) fn action_failed(output: &Output, err: ActionError) -> color_eyre::Report {
    warn!(action = %err.action(), "{}", err);
    output.notice(&Notice::from(&err));
    if err.is_not_found() {
        output.info("The movie may have been removed; run 'watchlist list' to refresh.");
    }
    err.into()
}

/// Shared by `toggle` and `delete`: look up the movie, register the pending
/// action, then confirm or cancel it.
pub(crate) fn confirm_pending<F>(
    mut list: MovieList,
    id: i64,
    yes: bool,
    output: &Output,
    request: F,
) -> Result<()>
where
    F: FnOnce(&mut MovieList, &Movie) -> String,
{
    let movie = match find_movie(&list, id) {
        Ok(movie) => movie,
        Err(e) => {
            app::shutdown(list);
            output.error(e.to_string());
            return Err(e);
        }
    };

    let question = request(&mut list, &movie);
    let proceed = if yes {
        true
    } else if prompts::is_interactive() && output.is_human() {
        match prompts::prompt_yes_no(&question, false) {
            Ok(answer) => answer,
            Err(e) => {
                list.cancel();
                app::shutdown(list);
                return Err(e);
            }
        }
    } else {
        list.cancel();
        app::shutdown(list);
        output.error(format!("{} (pass --yes to confirm)", question));
        return Err(eyre!("Confirmation required"));
    };

    if !proceed {
        if let Some(pending) = list.cancel() {
            output.info(format!("Cancelled, \"{}\" left unchanged", pending.movie().title));
        }
        app::shutdown(list);
        return Ok(());
    }

    let result = match list.confirm() {
        Some(Ok(notice)) => {
            output.notice(&notice);
            Ok(())
        }
        Some(Err(e)) => Err(action_failed(output, e)),
        None => Ok(()),
    };

    app::shutdown(list);
    result
}

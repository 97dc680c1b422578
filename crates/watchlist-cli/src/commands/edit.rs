use crate::app::{self, Context};
use crate::commands::{action_failed, find_movie};
use crate::commands::form::{invalid_fields, prompt_fields, FormArgs};
use crate::commands::prompts::is_interactive;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use watchlist_core::{MovieForm, SubmitError};

pub fn run_edit(
    ctx: &Context,
    id: i64,
    title: Option<String>,
    year: Option<String>,
    rating: Option<String>,
    output: &Output,
) -> Result<()> {
    let interactive = is_interactive() && output.is_human();
    let mut list = ctx.open_list()?;

    let movie = match find_movie(&list, id) {
        Ok(movie) => movie,
        Err(e) => {
            app::shutdown(list);
            output.error(e.to_string());
            return Err(e);
        }
    };
    list.select_for_edit(&movie);

    let mut form = MovieForm::for_edit(&movie);
    let missing = FormArgs::new(title, year, rating).apply(&mut form);
    // With no flags at all, walk through every field
    if interactive && missing.len() == 3 {
        prompt_fields(&mut form, &missing)?;
    }

    let result = loop {
        match list.submit_edit(&movie, &form) {
            Ok(notice) => {
                output.notice(&notice);
                break Ok(());
            }
            Err(SubmitError::Invalid(errors)) => {
                output.field_errors(&errors);
                if !interactive {
                    break Err(eyre!("Movie was not updated"));
                }
                if let Err(e) = prompt_fields(&mut form, &invalid_fields(&errors)) {
                    break Err(e);
                }
            }
            Err(SubmitError::Action(e)) => break Err(action_failed(output, e)),
        }
    };

    list.clear_selection();
    app::shutdown(list);
    result
}

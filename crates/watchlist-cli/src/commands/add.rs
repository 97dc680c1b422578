use crate::app::{self, Context};
use crate::commands::action_failed;
use crate::commands::form::{invalid_fields, prompt_fields, FormArgs};
use crate::commands::prompts::is_interactive;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use watchlist_core::{MovieForm, SubmitError};

pub fn run_add(
    ctx: &Context,
    title: Option<String>,
    year: Option<String>,
    rating: Option<String>,
    output: &Output,
) -> Result<()> {
    let interactive = is_interactive() && output.is_human();

    let mut form = MovieForm::default();
    let missing = FormArgs::new(title, year, rating).apply(&mut form);
    if interactive && !missing.is_empty() {
        prompt_fields(&mut form, &missing)?;
    }

    let mut list = ctx.open_list()?;
    let result = loop {
        match list.submit_add(&mut form) {
            Ok(notice) => {
                output.notice(&notice);
                break Ok(());
            }
            Err(SubmitError::Invalid(errors)) => {
                output.field_errors(&errors);
                if !interactive {
                    break Err(eyre!("Movie was not added"));
                }
                if let Err(e) = prompt_fields(&mut form, &invalid_fields(&errors)) {
                    break Err(e);
                }
            }
            Err(SubmitError::Action(e)) => break Err(action_failed(output, e)),
        }
    };

    app::shutdown(list);
    result
}

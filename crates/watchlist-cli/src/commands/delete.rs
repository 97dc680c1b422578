use crate::app::Context;
use crate::commands::confirm_pending;
use crate::output::Output;
use color_eyre::Result;

pub fn run_delete(ctx: &Context, id: i64, yes: bool, output: &Output) -> Result<()> {
    let list = ctx.open_list()?;
    confirm_pending(list, id, yes, output, |list, movie| list.request_delete(movie))
}

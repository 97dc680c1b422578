use crate::app::{self, Context};
use crate::commands::action_failed;
use crate::commands::prompts::is_interactive;
use crate::output::Output;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;
use watchlist_core::{HttpCatalog, MovieCatalog, SuggestedCatalog};

pub async fn run_import(
    ctx: &Context,
    url: Option<String>,
    suggested: bool,
    output: &Output,
) -> Result<()> {
    let catalog: Box<dyn MovieCatalog> = if suggested {
        Box::new(SuggestedCatalog)
    } else {
        let catalog = HttpCatalog::new(url.unwrap_or_else(|| ctx.config.import.url.clone()));
        debug!("Importing from {}", catalog.url());
        Box::new(catalog)
    };

    let mut list = ctx.open_list()?;

    let spinner = import_spinner(catalog.name(), output);
    let result = list.import_from(catalog.as_ref()).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let result = match result {
        Ok(report) => {
            output.notice(&report.notice());
            if !output.is_human() {
                output.json(&serde_json::json!({ "report": report }));
            }
            Ok(())
        }
        Err(e) => Err(action_failed(output, e)),
    };

    app::shutdown(list);
    result
}

fn import_spinner(catalog: &str, output: &Output) -> Option<ProgressBar> {
    if !is_interactive() || !output.is_human() {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
    {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    spinner.set_message(format!("Importing from {}...", catalog));
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

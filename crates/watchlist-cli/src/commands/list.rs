use crate::app::{self, Context};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchlist_core::ListStatus;
use watchlist_models::{Movie, SortOption, WatchedFilter};

pub const EMPTY_MESSAGE: &str = "No movies in your list yet";

pub fn run_list(
    ctx: &Context,
    search: Option<String>,
    filter: Option<WatchedFilter>,
    sort: Option<SortOption>,
    output: &Output,
) -> Result<()> {
    let mut list = ctx.open_list()?;
    if let Some(search) = search {
        list.set_search(search);
    }
    if let Some(filter) = filter {
        list.set_filter(filter);
    }
    if let Some(sort) = sort {
        list.set_sort(sort);
    }

    let result = match list.status() {
        ListStatus::Loading => Ok(()),
        ListStatus::FailedFirstLoad(msg) => {
            output.error(&msg);
            Err(eyre!(msg))
        }
        ListStatus::Empty => {
            if output.is_human() {
                output.info(EMPTY_MESSAGE);
            } else {
                output.json(&json!({ "total": 0, "movies": [] }));
            }
            Ok(())
        }
        ListStatus::Ready { stale_error } => {
            if let Some(msg) = stale_error {
                output.warn(msg);
            }
            let visible = list.visible();
            if output.is_human() {
                print_table(&visible, list.movies().len());
            } else {
                output.json(&json!({
                    "total": list.movies().len(),
                    "query": {
                        "search": list.query().search,
                        "filter": list.query().filter,
                        "sort": list.query().sort,
                    },
                    "movies": visible,
                }));
            }
            Ok(())
        }
    };

    app::shutdown(list);
    result
}

fn print_table(movies: &[&Movie], total: usize) {
    if movies.is_empty() {
        println!("No movies match the current search and filter ({} in list)", total);
        return;
    }

    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Watched").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Added").add_attribute(comfy_table::Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    for movie in movies {
        let watched = if movie.watched {
            Cell::new("✓").fg(comfy_table::Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title).fg(comfy_table::Color::Cyan),
            Cell::new(movie.year.map(|y| y.to_string()).unwrap_or_default()),
            Cell::new(movie.stars()).fg(comfy_table::Color::Yellow),
            watched,
            Cell::new(added_label(movie)),
        ]);
    }

    println!("{table}");
    println!("{}", format!("{} of {} movies", movies.len(), total).dimmed());
}

/// `YYYY-MM-DD` of insertion, blank for rows without a usable timestamp
fn added_label(movie: &Movie) -> String {
    match movie.added_at() {
        Some(added) if movie.created_at > 0 => added.format("%Y-%m-%d").to_string(),
        _ => String::new(),
    }
}

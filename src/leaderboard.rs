//! Leaderboard table (`#leaderboard`). Rank is the position in the server's
//! list; the server is trusted to have sorted it.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::api::{self, ScoreEntry};
use crate::config::ClientConfig;
use crate::dom;
use crate::error::Result;

pub const HEADER: [&str; 5] = ["Rank", "Player", "Difficulty", "Score", "Duration"];

/// Cell texts for each entry: rank, username, difficulty, score, duration.
pub fn table_rows(entries: &[ScoreEntry]) -> Vec<[String; 5]> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            [
                (i + 1).to_string(),
                e.username.clone(),
                e.difficulty.clone(),
                e.score.to_string(),
                e.duration.to_string(),
            ]
        })
        .collect()
}

fn append_row<S: AsRef<str>>(doc: &Document, table: &Element, tag: &str, cells: &[S]) -> Result<()> {
    let row = doc.create_element("tr")?;
    for text in cells {
        let cell = doc.create_element(tag)?;
        cell.set_text_content(Some(text.as_ref()));
        row.append_child(&cell)?;
    }
    table.append_child(&row)?;
    Ok(())
}

/// Build the table and swap it in as the container's only child.
pub fn render_table(container: &Element, entries: &[ScoreEntry]) -> Result<()> {
    let doc = dom::document()?;
    let table = doc.create_element("table")?;
    append_row(&doc, &table, "th", &HEADER)?;
    for row in table_rows(entries) {
        append_row(&doc, &table, "td", &row)?;
    }
    container.set_inner_html("");
    container.append_child(&table)?;
    Ok(())
}

pub async fn update_leaderboard(cfg: &ClientConfig) -> Result<()> {
    let entries = api::fetch_scores(cfg).await?;
    let container = dom::element_by_id(&cfg.leaderboard_id)?;
    render_table(&container, &entries)?;
    log::debug!("leaderboard rendered with {} entries", entries.len());
    Ok(())
}

pub fn spawn_update_leaderboard(cfg: Rc<ClientConfig>) {
    spawn_local(async move {
        if let Err(err) = update_leaderboard(&cfg).await {
            log::error!("Error fetching scores: {err}");
        }
    });
}

//! Word count label (`#wordCount`).

use std::rc::Rc;

use serde_json::Number;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::api::{self, number_text};
use crate::config::ClientConfig;
use crate::dom::{self, UPDATE_CLASS};
use crate::error::Result;

/// Write `count` into the label and pulse `update-animation` for `flash_ms`.
pub fn show_count(label: &Element, count: &Number, flash_ms: u32) {
    label.set_text_content(Some(&number_text(count)));
    dom::flash_class(label, UPDATE_CLASS, flash_ms);
}

pub async fn update_counts(cfg: &ClientConfig) -> Result<()> {
    let count = api::fetch_count(cfg).await?;
    let label = dom::element_by_id(&cfg.word_count_id)?;
    show_count(&label, &count, cfg.count_flash_ms);
    log::debug!("count refreshed: {count}");
    Ok(())
}

/// Fire-and-forget refresh; failures end up in the console only.
pub fn spawn_update_counts(cfg: Rc<ClientConfig>) {
    spawn_local(async move {
        if let Err(err) = update_counts(&cfg).await {
            log::error!("Error fetching counts: {err}");
        }
    });
}

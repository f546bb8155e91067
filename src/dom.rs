// Small DOM helpers shared by the page components.

use gloo_timers::callback::Timeout;
use web_sys::{Document, Element, Window, window};

use crate::error::{ClientError, Result};

pub const WORD_CLASS: &str = "word";
pub const FADE_IN_CLASS: &str = "fade-in";
pub const CORRECT_CLASS: &str = "correct-answer";
pub const UPDATE_CLASS: &str = "update-animation";

pub fn win() -> Result<Window> {
    window().ok_or_else(|| ClientError::dom("no window"))
}

pub fn document() -> Result<Document> {
    win()?.document().ok_or_else(|| ClientError::dom("no document"))
}

pub fn element_by_id(id: &str) -> Result<Element> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| ClientError::dom(format!("no element #{id}")))
}

/// Add `class` to `el` and remove it again after `ms`.
pub fn flash_class(el: &Element, class: &'static str, ms: u32) {
    if el.class_list().add_1(class).is_err() {
        return;
    }
    let el = el.clone();
    Timeout::new(ms, move || {
        let _ = el.class_list().remove_1(class);
    })
    .forget();
}

pub fn reload() -> Result<()> {
    win()?.location().reload()?;
    Ok(())
}

pub fn navigate(href: &str) -> Result<()> {
    win()?.location().set_href(href)?;
    Ok(())
}

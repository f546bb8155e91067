//! Word board (`#wordContainer`).
//!
//! Renders the current word set as `.word` buttons and submits the clicked
//! word. A single delegated `click` listener lives on the container, so each
//! render only swaps buttons and never touches listeners.
//!
//! Overlapping submissions are not sequenced: every answer is applied as it
//! arrives, so the last answer to land decides what the board shows.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent, Node};

use crate::api::{self, GAMEOVER_PATH};
use crate::config::ClientConfig;
use crate::counter;
use crate::dom::{self, CORRECT_CLASS, FADE_IN_CLASS, WORD_CLASS};
use crate::error::{ClientError, Result};

mod outcome;

pub use outcome::Outcome;

/// Replace every child of `container` with one button per word.
pub fn render_words(container: &Element, words: &[String]) -> Result<()> {
    let doc = dom::document()?;
    container.set_inner_html("");
    for word in words {
        let button = doc.create_element("button")?;
        button.set_text_content(Some(word));
        button.set_class_name(&format!("{WORD_CLASS} {FADE_IN_CLASS}"));
        container.append_child(&button)?;
    }
    Ok(())
}

/// Apply a server answer to the page. `clicked` is the button that caused it,
/// if any.
pub fn apply_outcome(cfg: &ClientConfig, clicked: Option<&Element>, outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Reload { reason } => {
            log::warn!("server reported an error, reloading: {reason}");
            dom::reload()
        }
        Outcome::GameOver => {
            log::info!("game over");
            dom::navigate(&cfg.url(GAMEOVER_PATH))
        }
        Outcome::Advance { count, correct, next } => {
            match count {
                Some(count) => {
                    let label = dom::element_by_id(&cfg.word_count_id)?;
                    counter::show_count(&label, &count, cfg.count_flash_ms);
                }
                None if clicked.is_some() => log::warn!("submission answer carried no count"),
                None => {}
            }
            if correct {
                if let Some(button) = clicked {
                    dom::flash_class(button, CORRECT_CLASS, cfg.correct_flash_ms);
                }
            }
            let words = next.ok_or(ClientError::MissingField("shuffle_words"))?;
            let container = dom::element_by_id(&cfg.word_container_id)?;
            render_words(&container, &words)?;
            log::debug!("rendered {} words", words.len());
            Ok(())
        }
    }
}

pub async fn fetch_new_words(cfg: &ClientConfig) -> Result<()> {
    let body = api::fetch_shuffle_words(cfg).await?;
    apply_outcome(cfg, None, Outcome::try_from(body)?)
}

pub async fn submit(cfg: &ClientConfig, button: &Element) -> Result<()> {
    let word = button.text_content().unwrap_or_default();
    let result = api::submit_word(cfg, &word).await?;
    apply_outcome(cfg, Some(button), result.into())
}

pub fn spawn_fetch_new_words(cfg: Rc<ClientConfig>) {
    spawn_local(async move {
        if let Err(err) = fetch_new_words(&cfg).await {
            log::error!("Error fetching new words: {err}");
        }
    });
}

/// Live board: owns the delegated click listener and detaches it on drop.
pub struct WordBoard {
    container: Element,
    on_click: Closure<dyn FnMut(MouseEvent)>,
}

impl WordBoard {
    /// Wire the container to submit clicked words and load the first word set.
    pub fn start(cfg: Rc<ClientConfig>) -> Result<Self> {
        let container = dom::element_by_id(&cfg.word_container_id)?;
        let listener_cfg = cfg.clone();
        let board = Self::listen(container, move |button| {
            let cfg = listener_cfg.clone();
            spawn_local(async move {
                if let Err(err) = submit(&cfg, &button).await {
                    log::error!("Error submitting word: {err}");
                }
            });
        })?;
        spawn_fetch_new_words(cfg);
        Ok(board)
    }

    /// Attach one delegated listener to `container`; `on_word` gets the `.word`
    /// button under each click, whichever render created it.
    pub fn listen(container: Element, mut on_word: impl FnMut(Element) + 'static) -> Result<Self> {
        let scope = container.clone();
        let on_click = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if let Some(button) = clicked_word(&scope, &evt) {
                on_word(button);
            }
        }) as Box<dyn FnMut(_)>);
        container.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        Ok(Self { container, on_click })
    }
}

impl Drop for WordBoard {
    fn drop(&mut self) {
        let _ = self
            .container
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
    }
}

/// The `.word` button inside `scope` that `evt` landed on, if any.
fn clicked_word(scope: &Element, evt: &MouseEvent) -> Option<Element> {
    let target: Element = evt.target()?.dyn_into().ok()?;
    let button = target.closest(&format!(".{WORD_CLASS}")).ok()??;
    let node: &Node = &button;
    scope.contains(Some(node)).then_some(button)
}

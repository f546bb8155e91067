//! Word Rush browser client.
//!
//! Drives the game and leaderboard pages of the fake-word guessing game: the
//! word board, the found-words counter, the elapsed-time clock and the
//! leaderboard table. All game rules live on the server; this crate only
//! fetches, renders and submits.
//!
//! `start_game()` wires every component whose element is present on the
//! current page. The `start_*` exports start a single component.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod api;
pub mod board;
pub mod config;
pub mod counter;
mod dom;
pub mod error;
pub mod leaderboard;
pub mod timer;

pub use config::{ClientConfig, LogLevel};
pub use error::{ClientError, Result};
pub use timer::{TimerHandle, format_time};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    init_logging(LogLevel::default());
}

fn init_logging(level: LogLevel) {
    let level: log::Level = level.into();
    // A second init only adjusts the level.
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}

/// Components that must stay alive for the page's lifetime.
#[derive(Default)]
struct Page {
    board: Option<board::WordBoard>,
    timer: Option<timer::FrameLoop>,
}

thread_local! {
    static PAGE: RefCell<Page> = RefCell::new(Page::default());
}

fn parse_config(json: Option<String>) -> Result<Rc<ClientConfig>> {
    let cfg = match json.as_deref() {
        Some(json) => ClientConfig::from_json(json)?,
        None => ClientConfig::default(),
    };
    init_logging(cfg.log_level);
    Ok(Rc::new(cfg))
}

fn has_element(id: &str) -> bool {
    dom::element_by_id(id).is_ok()
}

fn start_page(cfg: Rc<ClientConfig>) -> Result<()> {
    if has_element(&cfg.timer_id) {
        let frame_loop = timer::start_timer(cfg.clone())?;
        PAGE.with(|p| p.borrow_mut().timer = Some(frame_loop));
    }
    if has_element(&cfg.word_count_id) {
        counter::spawn_update_counts(cfg.clone());
    }
    if has_element(&cfg.word_container_id) {
        let board = board::WordBoard::start(cfg.clone())?;
        PAGE.with(|p| p.borrow_mut().board = Some(board));
    }
    if has_element(&cfg.leaderboard_id) {
        leaderboard::spawn_update_leaderboard(cfg.clone());
    }
    log::info!("word rush client started");
    Ok(())
}

/// Start every component found on the page with the default configuration.
#[wasm_bindgen]
pub fn start_game() -> std::result::Result<(), JsValue> {
    start_page(parse_config(None)?)?;
    Ok(())
}

/// Same as `start_game`, configured from a JSON object (see `ClientConfig`).
#[wasm_bindgen]
pub fn start_game_with_config(config: &str) -> std::result::Result<(), JsValue> {
    start_page(parse_config(Some(config.to_owned()))?)?;
    Ok(())
}

#[wasm_bindgen]
pub fn start_word_board(config: Option<String>) -> std::result::Result<(), JsValue> {
    let board = board::WordBoard::start(parse_config(config)?)?;
    PAGE.with(|p| p.borrow_mut().board = Some(board));
    Ok(())
}

#[wasm_bindgen]
pub fn start_counter(config: Option<String>) -> std::result::Result<(), JsValue> {
    counter::spawn_update_counts(parse_config(config)?);
    Ok(())
}

/// Start the clock; the returned handle stops it.
#[wasm_bindgen]
pub fn start_timer(config: Option<String>) -> std::result::Result<TimerHandle, JsValue> {
    let frame_loop = timer::start_timer(parse_config(config)?)?;
    Ok(frame_loop.into())
}

#[wasm_bindgen]
pub fn start_leaderboard(config: Option<String>) -> std::result::Result<(), JsValue> {
    leaderboard::spawn_update_leaderboard(parse_config(config)?);
    Ok(())
}

/// Stop the page clock and detach the board listener.
#[wasm_bindgen]
pub fn stop_game() {
    PAGE.with(|p| p.replace(Page::default()));
}

#[wasm_bindgen(js_name = formatTime)]
pub fn format_time_js(elapsed_ms: f64) -> String {
    format_time(elapsed_ms)
}

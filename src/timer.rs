//! Elapsed-time clock (`#timer`).
//!
//! The start time is fetched once; a `requestAnimationFrame` loop then redraws
//! the label every frame until the owning [`FrameLoop`] is stopped or dropped.
//! Frames that run before the start time arrives leave the label untouched.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, Window};

use crate::api;
use crate::config::ClientConfig;
use crate::dom;
use crate::error::{ClientError, Result};

const MS_PER_DAY: i64 = 86_400_000;

/// Format elapsed milliseconds as `HH:MM:SS`, reading the value as an epoch
/// timestamp and taking its UTC clock time. Hours therefore wrap at 24 and a
/// negative value shows the clock time of the day before the epoch.
pub fn format_time(elapsed_ms: f64) -> String {
    if !elapsed_ms.is_finite() {
        return "--:--:--".to_string();
    }
    let of_day = (elapsed_ms.floor() as i64).rem_euclid(MS_PER_DAY) / 1000;
    let (h, m, s) = (of_day / 3600, of_day / 60 % 60, of_day % 60);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Start time shared between the fetch task and the frame loop.
#[derive(Debug, Default)]
pub struct TimerState {
    start_ms: Cell<Option<f64>>,
}

impl TimerState {
    pub fn set_start(&self, start_ms: f64) {
        self.start_ms.set(Some(start_ms));
    }

    pub fn start(&self) -> Option<f64> {
        self.start_ms.get()
    }

    /// Label text for a frame drawn at `now_ms`, or `None` while the start
    /// time is still unknown.
    pub fn display(&self, now_ms: f64) -> Option<String> {
        self.start().map(|start| format_time(now_ms - start))
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running `requestAnimationFrame` chain. Stops on [`FrameLoop::stop`] or drop.
pub struct FrameLoop {
    win: Window,
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(mut tick: impl FnMut() + 'static) -> Result<Self> {
        let win = dom::win()?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let f = callback.clone();
        let p = pending.clone();
        let w = win.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            p.set(None);
            tick();
            // After stop() the slot is empty and the chain ends here.
            let next = f
                .borrow()
                .as_ref()
                .and_then(|cb| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            p.set(next);
        }) as Box<dyn FnMut(f64)>));

        let first = callback
            .borrow()
            .as_ref()
            .map(|cb| win.request_animation_frame(cb.as_ref().unchecked_ref()))
            .transpose()?;
        pending.set(first);
        Ok(Self { win, callback, pending })
    }

    pub fn is_running(&self) -> bool {
        self.callback.borrow().is_some()
    }

    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            let _ = self.win.cancel_animation_frame(id);
        }
        // Dropping the closure breaks the Rc cycle it holds on itself.
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handle returned to JS by `start_timer`; call `stop()` on page teardown.
#[wasm_bindgen]
pub struct TimerHandle {
    frame_loop: FrameLoop,
}

#[wasm_bindgen]
impl TimerHandle {
    pub fn stop(&self) {
        self.frame_loop.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.frame_loop.is_running()
    }
}

impl From<FrameLoop> for TimerHandle {
    fn from(frame_loop: FrameLoop) -> Self {
        Self { frame_loop }
    }
}

pub fn start_timer(cfg: Rc<ClientConfig>) -> Result<FrameLoop> {
    let label = dom::element_by_id(&cfg.timer_id)?;
    let html: &HtmlElement = label
        .dyn_ref()
        .ok_or_else(|| ClientError::dom(format!("#{} is not an html element", cfg.timer_id)))?;
    let style = html.style();
    style.set_property("position", "relative")?;
    style.set_property("left", "10px")?;
    style.set_property("top", "0px")?;

    let state = Rc::new(TimerState::default());
    {
        let state = state.clone();
        let cfg = cfg.clone();
        spawn_local(async move {
            match api::fetch_start_time(&cfg).await {
                Ok(start) => {
                    log::debug!("game started at {start}");
                    state.set_start(start);
                }
                Err(err) => log::error!("Error fetching start time: {err}"),
            }
        });
    }

    FrameLoop::start(move || {
        if let Some(text) = state.display(js_sys::Date::now()) {
            label.set_text_content(Some(&text));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hour_one_minute_one_second() {
        assert_eq!(format_time(3_661_000.0), "01:01:01");
    }

    #[test]
    fn zero_and_sub_second() {
        assert_eq!(format_time(0.0), "00:00:00");
        assert_eq!(format_time(999.0), "00:00:00");
        assert_eq!(format_time(59_999.0), "00:00:59");
    }

    #[test]
    fn hours_wrap_at_a_day() {
        assert_eq!(format_time(86_400_000.0 + 5_000.0), "00:00:05");
        assert_eq!(format_time(23.0 * 3_600_000.0 + 59.0 * 60_000.0 + 59_000.0), "23:59:59");
    }

    #[test]
    fn negative_elapsed_reads_previous_day() {
        assert_eq!(format_time(-1_000.0), "23:59:59");
        assert_eq!(format_time(-1_500.0), "23:59:58");
    }

    #[test]
    fn non_finite_is_placeholder() {
        assert_eq!(format_time(f64::NAN), "--:--:--");
    }

    #[test]
    fn state_displays_nothing_until_start_known() {
        let state = TimerState::default();
        assert_eq!(state.display(10_000.0), None);
        state.set_start(0.0);
        assert_eq!(state.display(3_661_000.0).as_deref(), Some("01:01:01"));
    }
}

//! Browser shell: web-sys implementations of the controller's collaborators
//! plus DOM bootstrap and event wiring.
//!
//! The mounted game lives in a `thread_local!` cell; timer and click
//! callbacks dispatch back into it through [`with_game`]. Elements are reused
//! by id when the host page already provides them and created with inline
//! styles otherwise.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, window};

use crate::game::{
    Game, GameConfig, Position, RecordStore, Sampler, Scheduler, Size, Surface, TimerSlot,
};

/// The fully wired browser game.
pub type BrowserGame = Game<DomSurface, IntervalScheduler, LocalStorageRecords, SystemSampler>;

thread_local! {
    static GAME: RefCell<Option<BrowserGame>> = RefCell::new(None);
}

fn with_game(f: impl FnOnce(&mut BrowserGame)) {
    GAME.with(|cell| {
        if let Some(game) = cell.borrow_mut().as_mut() {
            f(game);
        }
    });
}

fn dispatch_timer(slot: TimerSlot) {
    with_game(|game| match slot {
        TimerSlot::Countdown => game.on_tick(),
        TimerSlot::Relocation => game.on_relocation_due(),
    });
}

// --- DOM bootstrap -------------------------------------------------------------

const AREA_STYLE: &str = "position:relative; width:640px; height:480px; margin:24px auto; \
     border:2px solid #222; border-radius:12px; background:#181818; overflow:hidden;";
const TARGET_HIDDEN_STYLE: &str =
    "position:absolute; display:none; width:60px; height:60px; cursor:pointer;";
const SCORE_STYLE: &str = "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; \
     font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; \
     border-radius:6px; color:#ffd166; z-index:45;";
const TIMER_STYLE: &str = "position:fixed; top:10px; left:140px; font-family:'Fira Code', monospace; \
     font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; \
     border-radius:6px; color:#ffd166; z-index:45;";
const MESSAGE_BASE_STYLE: &str = "position:fixed; top:16%; left:50%; transform:translateX(-50%); \
     font-family:'Fira Code', monospace; font-size:22px; padding:6px 14px; \
     background:rgba(0,0,0,0.45); border:1px solid #333; border-radius:8px; color:#ffd166; z-index:30;";
const START_BASE_STYLE: &str = "position:fixed; top:24%; left:50%; transform:translateX(-50%); \
     font-family:'Fira Code', monospace; font-size:18px; padding:8px 18px; cursor:pointer; \
     background:#2a2a2a; border:1px solid #555; border-radius:8px; color:#fff; z-index:30;";

/// Target size fixed by [`TARGET_HIDDEN_STYLE`]; reading layout metrics of a
/// hidden element would report 0 and collapse the placement bounds.
const TARGET_SIZE_PX: u32 = 60;

/// Marks elements that already carry a click listener. Listeners survive a
/// re-mount (the elements are reused), so wiring again would dispatch every
/// click twice.
const WIRED_ATTR: &str = "data-cc-wired";

fn ensure_element(
    doc: &Document,
    parent: &Element,
    tag: &str,
    id: &str,
    style: &str,
) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let el = doc.create_element(tag)?;
    el.set_id(id);
    el.set_attribute("style", style)?;
    parent.append_child(&el)?;
    Ok(el)
}

/// Bootstraps the DOM, wires the click listeners and installs an idle game.
/// Nothing moves until the player presses the start control.
pub fn mount(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body: Element = doc
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .into();

    let area = ensure_element(&doc, &body, "div", "cc-area", AREA_STYLE)?;
    let target: HtmlElement =
        ensure_element(&doc, &area, "div", "cc-target", TARGET_HIDDEN_STYLE)?.dyn_into()?;
    let score = ensure_element(&doc, &body, "div", "cc-score", SCORE_STYLE)?;
    let timer = ensure_element(&doc, &body, "div", "cc-timer", TIMER_STYLE)?;
    let message: HtmlElement = ensure_element(
        &doc,
        &body,
        "div",
        "cc-message",
        &format!("{MESSAGE_BASE_STYLE} display:none;"),
    )?
    .dyn_into()?;
    let start: HtmlElement = ensure_element(
        &doc,
        &body,
        "button",
        "cc-start",
        &format!("{START_BASE_STYLE} display:block;"),
    )?
    .dyn_into()?;
    start.set_text_content(Some("Start"));
    score.set_text_content(Some("Score: 0"));
    timer.set_text_content(Some(&format!(
        "Time left: {} sec",
        config.duration_seconds
    )));

    // Target click -> score attempt.
    if !target.has_attribute(WIRED_ATTR) {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_game(|game| game.on_target_clicked());
        }) as Box<dyn FnMut(_)>);
        target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        target.set_attribute(WIRED_ATTR, "")?;
    }
    // Start control -> new session.
    if !start.has_attribute(WIRED_ATTR) {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_game(|game| game.start());
        }) as Box<dyn FnMut(_)>);
        start.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        start.set_attribute(WIRED_ATTR, "")?;
    }

    let surface = DomSurface {
        area,
        target,
        score,
        timer,
        message,
        start,
    };
    let game = Game::new(
        config,
        surface,
        IntervalScheduler::new(),
        LocalStorageRecords,
        SystemSampler,
    );
    GAME.with(|cell| cell.replace(Some(game)));
    Ok(())
}

// --- Surface ---------------------------------------------------------------------

/// Visual surface backed by the bootstrapped DOM elements. Visibility and
/// placement go through the style attribute; status regions through text
/// content.
pub struct DomSurface {
    area: Element,
    target: HtmlElement,
    score: Element,
    timer: Element,
    message: HtmlElement,
    start: HtmlElement,
}

impl Surface for DomSurface {
    fn play_area(&self) -> Size {
        Size {
            width: self.area.client_width().max(0) as u32,
            height: self.area.client_height().max(0) as u32,
        }
    }

    fn target_size(&self) -> Size {
        Size {
            width: TARGET_SIZE_PX,
            height: TARGET_SIZE_PX,
        }
    }

    fn show_target(&mut self, at: Position, image: &str) {
        let style = format!(
            "position:absolute; display:block; left:{x}px; top:{y}px; \
             width:{s}px; height:{s}px; cursor:pointer; \
             background:url('{image}') center / contain no-repeat;",
            x = at.x,
            y = at.y,
            s = TARGET_SIZE_PX,
        );
        self.target.set_attribute("style", &style).ok();
    }

    fn hide_target(&mut self) {
        self.target.set_attribute("style", TARGET_HIDDEN_STYLE).ok();
    }

    fn set_score_text(&mut self, score: u32) {
        self.score
            .set_text_content(Some(&format!("Score: {score}")));
    }

    fn set_countdown_text(&mut self, seconds: u32) {
        self.timer
            .set_text_content(Some(&format!("Time left: {seconds} sec")));
    }

    fn show_message(&mut self, text: &str) {
        self.message.set_text_content(Some(text));
        self.message
            .set_attribute("style", &format!("{MESSAGE_BASE_STYLE} display:block;"))
            .ok();
    }

    fn hide_message(&mut self) {
        self.message
            .set_attribute("style", &format!("{MESSAGE_BASE_STYLE} display:none;"))
            .ok();
    }

    fn show_start_control(&mut self, label: &str) {
        self.start.set_text_content(Some(label));
        self.start
            .set_attribute("style", &format!("{START_BASE_STYLE} display:block;"))
            .ok();
    }

    fn hide_start_control(&mut self) {
        self.start
            .set_attribute("style", &format!("{START_BASE_STYLE} display:none;"))
            .ok();
    }
}

// --- Scheduler -------------------------------------------------------------------

struct ActiveTimer {
    handle: i32,
    // Keeps the callback alive for the lifetime of the interval.
    _closure: Closure<dyn FnMut()>,
}

/// `setInterval`/`clearInterval` backed scheduler, one handle per slot.
pub struct IntervalScheduler {
    countdown: Option<ActiveTimer>,
    relocation: Option<ActiveTimer>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self {
            countdown: None,
            relocation: None,
        }
    }

    fn slot_mut(&mut self, slot: TimerSlot) -> &mut Option<ActiveTimer> {
        match slot {
            TimerSlot::Countdown => &mut self.countdown,
            TimerSlot::Relocation => &mut self.relocation,
        }
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, slot: TimerSlot, interval_ms: u32) {
        self.cancel(slot);
        let Some(win) = window() else { return };
        let closure = Closure::wrap(Box::new(move || dispatch_timer(slot)) as Box<dyn FnMut()>);
        if let Ok(handle) = win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            *self.slot_mut(slot) = Some(ActiveTimer {
                handle,
                _closure: closure,
            });
        }
    }

    fn cancel(&mut self, slot: TimerSlot) {
        if let Some(active) = self.slot_mut(slot).take() {
            if let Some(win) = window() {
                win.clear_interval_with_handle(active.handle);
            }
        }
    }
}

// --- Record store ------------------------------------------------------------------

const RECORD_KEY: &str = "critter-clicker.record";

/// Best score persisted in `localStorage`. Absent or non-numeric values load
/// as 0; write failures (storage disabled, quota) are ignored.
pub struct LocalStorageRecords;

impl RecordStore for LocalStorageRecords {
    fn load(&self) -> u32 {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(RECORD_KEY).ok().flatten())
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    fn store(&mut self, record: u32) {
        if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
            storage.set_item(RECORD_KEY, &record.to_string()).ok();
        }
    }
}

// --- Sampler ------------------------------------------------------------------------

/// Uniform sampling over the browser RNG.
pub struct SystemSampler;

impl Sampler for SystemSampler {
    fn pick(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_err() {
            return 0;
        }
        (u64::from_le_bytes(buf) % u64::from(bound)) as u32
    }
}

//! Platform-independent game controller.
//!
//! The controller owns the session state (score, countdown, running flag) and
//! drives everything through four injected collaborators: a [`Surface`] for
//! the visible play area, a [`Scheduler`] for the two periodic timers, a
//! [`RecordStore`] for the persisted best score, and a [`Sampler`] for the
//! random target placement. The browser wiring lives in [`crate::browser`];
//! nothing in this module touches the DOM, so the whole game can be exercised
//! natively with fakes.

// --- Configuration -----------------------------------------------------------

/// Immutable per-game configuration, supplied once at construction.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub duration_seconds: u32,
    pub relocation_interval_seconds: u32,
    /// Image URLs the target cycles through; picked uniformly with
    /// replacement, so the same critter may appear twice in a row.
    pub image_variants: Vec<String>,
}

impl GameConfig {
    pub fn new(
        duration_seconds: u32,
        relocation_interval_seconds: u32,
        image_variants: Vec<String>,
    ) -> Self {
        Self {
            duration_seconds,
            relocation_interval_seconds,
            image_variants,
        }
    }

    pub fn relocation_interval_ms(&self) -> u32 {
        self.relocation_interval_seconds * 1_000
    }
}

// --- Geometry ------------------------------------------------------------------

/// Pixel offset of the target within the play area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

/// Pixel dimensions of a rectangular region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

// --- Collaborator contracts ---------------------------------------------------

/// The two periodic timers the game runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerSlot {
    /// Fires once per second while a game is running.
    Countdown,
    /// Fires once per configured interval and moves the target.
    Relocation,
}

/// Narrow contract over the visual surface: a bounded play area, one target
/// element, two status text regions, an end-of-game message region and the
/// start control. The controller holds no other reference to presentation
/// internals.
pub trait Surface {
    fn play_area(&self) -> Size;
    fn target_size(&self) -> Size;
    fn show_target(&mut self, at: Position, image: &str);
    fn hide_target(&mut self);
    fn set_score_text(&mut self, score: u32);
    fn set_countdown_text(&mut self, seconds: u32);
    fn show_message(&mut self, text: &str);
    fn hide_message(&mut self);
    fn show_start_control(&mut self, label: &str);
    fn hide_start_control(&mut self);
}

/// Periodic timer source. `start` on a slot that is already running cancels
/// the old timer first; `cancel` on an idle slot is a no-op. Both must be
/// safe to call any number of times.
pub trait Scheduler {
    fn start(&mut self, slot: TimerSlot, interval_ms: u32);
    fn cancel(&mut self, slot: TimerSlot);
}

/// Persisted best score. An absent or unparseable value loads as 0.
pub trait RecordStore {
    fn load(&self) -> u32;
    fn store(&mut self, record: u32);
}

/// Uniform random sampling: `pick(bound)` returns a value in `[0, bound)`,
/// or 0 when `bound` is 0.
pub trait Sampler {
    fn pick(&mut self, bound: u32) -> u32;
}

// --- Session state -------------------------------------------------------------

/// Mutable per-session state. Reset by `start()`, frozen once the countdown
/// hits zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub time_remaining: u32,
    pub running: bool,
    pub target_visible: bool,
}

/// Shown when the session score beats the stored record.
pub const MSG_NEW_RECORD: &str = "You set a new record!";
/// Shown when it does not.
pub const MSG_NO_NEW_RECORD: &str = "Previous record stands";
/// Start-control label offered after a finished game.
pub const LABEL_TRY_AGAIN: &str = "Try again";

// --- Controller ------------------------------------------------------------------

/// The game controller. One instance per mounted game; all event handlers
/// (ticks, relocations, clicks) are serialized onto it by the single-threaded
/// event loop of the host.
pub struct Game<S, T, R, N>
where
    S: Surface,
    T: Scheduler,
    R: RecordStore,
    N: Sampler,
{
    config: GameConfig,
    state: GameState,
    record: u32,
    surface: S,
    scheduler: T,
    records: R,
    sampler: N,
}

impl<S, T, R, N> Game<S, T, R, N>
where
    S: Surface,
    T: Scheduler,
    R: RecordStore,
    N: Sampler,
{
    /// Builds an idle game. The stored record is read once, here; a corrupt
    /// or missing value has already degraded to 0 inside the store.
    pub fn new(config: GameConfig, surface: S, scheduler: T, records: R, sampler: N) -> Self {
        let record = records.load();
        Self {
            config,
            state: GameState::default(),
            record,
            surface,
            scheduler,
            records,
            sampler,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn record(&self) -> u32 {
        self.record
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Idle -> Running. Resets score and countdown, starts both timers and
    /// immediately places the target once.
    pub fn start(&mut self) {
        self.surface.hide_message();
        self.surface.hide_start_control();
        self.state = GameState {
            score: 0,
            time_remaining: self.config.duration_seconds,
            running: true,
            target_visible: false,
        };
        self.surface.set_score_text(0);
        self.surface.set_countdown_text(self.state.time_remaining);
        self.scheduler.start(TimerSlot::Countdown, 1_000);
        self.restart_relocation();
    }

    /// Click on the target. Ignored while idle or while the target is hidden
    /// (a late click after a hit but before the next relocation).
    pub fn on_target_clicked(&mut self) {
        if !self.state.running || !self.state.target_visible {
            return;
        }
        self.state.score += 1;
        self.state.target_visible = false;
        self.surface.hide_target();
        self.surface.set_score_text(self.state.score);
        // A hit restores the full interval before the next auto-move instead
        // of letting the old schedule keep its remaining fraction.
        self.restart_relocation();
    }

    /// One-second countdown tick.
    pub fn on_tick(&mut self) {
        if !self.state.running {
            return;
        }
        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        // Refresh the display before a possible end, so the final tick shows 0
        // rather than freezing on the last nonzero second.
        self.surface.set_countdown_text(self.state.time_remaining);
        if self.state.time_remaining == 0 {
            self.end();
        }
    }

    /// Periodic relocation tick: the player did not hit the target in time,
    /// so it moves on its own.
    pub fn on_relocation_due(&mut self) {
        self.relocate_target();
    }

    /// Cancel + immediate relocation + fresh full interval.
    fn restart_relocation(&mut self) {
        self.scheduler.cancel(TimerSlot::Relocation);
        self.relocate_target();
        self.scheduler
            .start(TimerSlot::Relocation, self.config.relocation_interval_ms());
    }

    /// Running -> Idle. Cancels both timers, settles the record and hands the
    /// start control back to the player.
    fn end(&mut self) {
        self.scheduler.cancel(TimerSlot::Countdown);
        self.scheduler.cancel(TimerSlot::Relocation);
        self.state.running = false;
        self.state.target_visible = false;
        self.surface.hide_target();
        if self.state.score > self.record {
            self.record = self.state.score;
            self.records.store(self.record);
            self.surface.show_message(MSG_NEW_RECORD);
        } else {
            self.surface.show_message(MSG_NO_NEW_RECORD);
        }
        self.surface.show_start_control(LABEL_TRY_AGAIN);
    }

    /// Places the target at a uniformly random position inside the play area
    /// with a uniformly random image variant. The bounds keep the target
    /// fully inside the area and saturate to 0 when the area is smaller than
    /// the target itself.
    fn relocate_target(&mut self) {
        if !self.state.running {
            return;
        }
        let area = self.surface.play_area();
        let target = self.surface.target_size();
        let max_x = area.width.saturating_sub(target.width);
        let max_y = area.height.saturating_sub(target.height);
        let at = Position {
            x: self.sampler.pick(max_x.saturating_add(1)),
            y: self.sampler.pick(max_y.saturating_add(1)),
        };
        let idx = self.sampler.pick(self.config.image_variants.len() as u32) as usize;
        let image = self
            .config
            .image_variants
            .get(idx)
            .map(String::as_str)
            .unwrap_or("");
        self.state.target_visible = true;
        self.surface.show_target(at, image);
    }
}

// --- Unit tests ------------------------------------------------------------------

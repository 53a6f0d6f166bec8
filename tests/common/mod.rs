//! Shared fakes for driving the game controller in native tests.
//!
//! Every fake hands out `Rc` handles to its logs so a test can keep
//! inspecting what the controller did after moving the fake into the game.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use critter_clicker::game::{
    Game, GameConfig, Position, RecordStore, Sampler, Scheduler, Size, Surface, TimerSlot,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    TargetShown { at: Position, image: String },
    TargetHidden,
    Score(u32),
    Countdown(u32),
    Message(String),
    MessageHidden,
    StartShown(String),
    StartHidden,
}

pub struct FakeSurface {
    pub area: Size,
    pub target: Size,
    pub events: Rc<RefCell<Vec<SurfaceEvent>>>,
}

impl Surface for FakeSurface {
    fn play_area(&self) -> Size {
        self.area
    }
    fn target_size(&self) -> Size {
        self.target
    }
    fn show_target(&mut self, at: Position, image: &str) {
        self.events.borrow_mut().push(SurfaceEvent::TargetShown {
            at,
            image: image.to_string(),
        });
    }
    fn hide_target(&mut self) {
        self.events.borrow_mut().push(SurfaceEvent::TargetHidden);
    }
    fn set_score_text(&mut self, score: u32) {
        self.events.borrow_mut().push(SurfaceEvent::Score(score));
    }
    fn set_countdown_text(&mut self, seconds: u32) {
        self.events
            .borrow_mut()
            .push(SurfaceEvent::Countdown(seconds));
    }
    fn show_message(&mut self, text: &str) {
        self.events
            .borrow_mut()
            .push(SurfaceEvent::Message(text.to_string()));
    }
    fn hide_message(&mut self) {
        self.events.borrow_mut().push(SurfaceEvent::MessageHidden);
    }
    fn show_start_control(&mut self, label: &str) {
        self.events
            .borrow_mut()
            .push(SurfaceEvent::StartShown(label.to_string()));
    }
    fn hide_start_control(&mut self) {
        self.events.borrow_mut().push(SurfaceEvent::StartHidden);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Started(TimerSlot, u32),
    Cancelled(TimerSlot),
}

pub struct FakeScheduler {
    pub events: Rc<RefCell<Vec<TimerEvent>>>,
}

impl Scheduler for FakeScheduler {
    fn start(&mut self, slot: TimerSlot, interval_ms: u32) {
        self.events
            .borrow_mut()
            .push(TimerEvent::Started(slot, interval_ms));
    }
    fn cancel(&mut self, slot: TimerSlot) {
        self.events.borrow_mut().push(TimerEvent::Cancelled(slot));
    }
}

/// Record store with a shared cell, so "sessions" created from the same cell
/// see each other's writes like two page loads sharing `localStorage`.
pub struct FakeRecords {
    pub cell: Rc<RefCell<Option<u32>>>,
}

impl RecordStore for FakeRecords {
    fn load(&self) -> u32 {
        self.cell.borrow().unwrap_or(0)
    }
    fn store(&mut self, record: u32) {
        *self.cell.borrow_mut() = Some(record);
    }
}

/// Scripted sampler; returns 0 once the script runs dry.
pub struct FakeSampler {
    pub script: Rc<RefCell<VecDeque<u32>>>,
}

impl Sampler for FakeSampler {
    fn pick(&mut self, _bound: u32) -> u32 {
        self.script.borrow_mut().pop_front().unwrap_or(0)
    }
}

pub type TestGame = Game<FakeSurface, FakeScheduler, FakeRecords, FakeSampler>;

pub struct Harness {
    pub game: TestGame,
    pub surface: Rc<RefCell<Vec<SurfaceEvent>>>,
    pub timers: Rc<RefCell<Vec<TimerEvent>>>,
    pub record_cell: Rc<RefCell<Option<u32>>>,
    pub script: Rc<RefCell<VecDeque<u32>>>,
}

impl Harness {
    pub fn clear_logs(&mut self) {
        self.surface.borrow_mut().clear();
        self.timers.borrow_mut().clear();
    }
}

pub fn default_config() -> GameConfig {
    GameConfig::new(
        10,
        2,
        vec!["bird.png".to_string(), "mole.png".to_string()],
    )
}

pub fn harness(config: GameConfig) -> Harness {
    harness_with_record(config, Rc::new(RefCell::new(None)))
}

pub fn harness_with_record(config: GameConfig, record_cell: Rc<RefCell<Option<u32>>>) -> Harness {
    let surface = Rc::new(RefCell::new(Vec::new()));
    let timers = Rc::new(RefCell::new(Vec::new()));
    let script = Rc::new(RefCell::new(VecDeque::new()));
    let game = Game::new(
        config,
        FakeSurface {
            area: Size {
                width: 640,
                height: 480,
            },
            target: Size {
                width: 60,
                height: 60,
            },
            events: surface.clone(),
        },
        FakeScheduler {
            events: timers.clone(),
        },
        FakeRecords {
            cell: record_cell.clone(),
        },
        FakeSampler {
            script: script.clone(),
        },
    );
    Harness {
        game,
        surface,
        timers,
        record_cell,
        script,
    }
}

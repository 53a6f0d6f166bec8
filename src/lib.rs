//! Critter Clicker core crate.
//!
//! A whack-a-critter browser mini-game: a single target pops up at random
//! positions inside a bounded play area, the player clicks it for points
//! before the countdown runs out, and the best score survives across
//! sessions in `localStorage`. The game logic lives in [`game`] behind
//! injected collaborator traits so it runs natively under `cargo test`; the
//! wasm/DOM shell lives in [`browser`].

use wasm_bindgen::prelude::*;

pub mod browser;
pub mod game;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Default session configuration
// -----------------------------------------------------------------------------

pub const DEFAULT_DURATION_SECONDS: u32 = 10;
pub const DEFAULT_RELOCATION_INTERVAL_SECONDS: u32 = 2;
pub const DEFAULT_IMAGE_VARIANTS: &[&str] = &[
    "/img/bird.png",
    "/img/cockroach.png",
    "/img/mice.png",
    "/img/mole.png",
];

fn default_variants() -> Vec<String> {
    DEFAULT_IMAGE_VARIANTS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// -----------------------------------------------------------------------------
// Unified entrypoints
// -----------------------------------------------------------------------------

/// Mounts the game into the current document with the stock 10 second / 2
/// second session. The game starts when the player presses the start control.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    browser::mount(game::GameConfig::new(
        DEFAULT_DURATION_SECONDS,
        DEFAULT_RELOCATION_INTERVAL_SECONDS,
        default_variants(),
    ))
}

/// Mounts the game with a custom duration, relocation interval and image
/// list. An empty image list falls back to the stock critters.
#[wasm_bindgen]
pub fn mount_with(
    duration_seconds: u32,
    relocation_interval_seconds: u32,
    image_variants: Vec<String>,
) -> Result<(), JsValue> {
    let variants = if image_variants.is_empty() {
        default_variants()
    } else {
        image_variants
    };
    browser::mount(game::GameConfig::new(
        duration_seconds,
        relocation_interval_seconds,
        variants,
    ))
}

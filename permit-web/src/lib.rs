//! Permit Desk web adapter
//!
//! Thin wasm layer around the `permit-game` engine: localStorage-backed
//! high-score persistence and a `wasm_bindgen` handle for the host page.
//! Rendering, layout, and gesture mechanics stay in the page itself.

pub mod app;
pub mod game;

pub use app::PermitDeskApp;
pub use game::{HIGH_SCORE_KEY, WebScoreStore, WebStorageError, create_web_desk};

/// Route panics to the browser console during development builds.
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

//! JS-facing handle exposing the engine boundary to the host page.
//!
//! The host owns rendering, gesture translation, and the once-per-second
//! interval; this handle only forwards `start`/`pause`/`tick`/`decide` and
//! hands back the observable snapshot.

use wasm_bindgen::prelude::*;

use crate::game::{WebScoreStore, create_web_desk};
use permit_game::{Decision, DeskMode, PermitDesk};

#[wasm_bindgen]
pub struct PermitDeskApp {
    desk: PermitDesk<WebScoreStore>,
}

#[wasm_bindgen]
impl PermitDeskApp {
    /// Build a desk for the given mode (`"classic"` or `"frontline"`).
    /// Without an explicit seed the deal order derives from the wall clock.
    #[wasm_bindgen(constructor)]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(mode: &str, seed: Option<u32>) -> Self {
        let mode = mode.parse::<DeskMode>().unwrap_or_default();
        let seed = seed.map_or_else(|| js_sys::Date::now() as u64, u64::from);
        Self {
            desk: create_web_desk(mode, seed),
        }
    }

    pub fn start(&mut self) {
        self.desk.start();
    }

    pub fn pause(&mut self) {
        self.desk.pause();
    }

    pub fn tick(&mut self) {
        self.desk.tick();
    }

    /// Forward a ruling (`"approve"` or `"return"`). Returns `true` when the
    /// ruling was accepted by a running shift.
    pub fn decide(&mut self, decision: &str) -> bool {
        let Ok(decision) = decision.parse::<Decision>() else {
            log::warn!("ignoring unknown decision input: {decision}");
            return false;
        };
        self.desk.decide(decision).is_some()
    }

    /// Observable snapshot as a plain JS object.
    ///
    /// # Errors
    ///
    /// Returns a JS error value if the snapshot cannot be serialized.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.desk.view())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.desk.state().high_score
    }
}

//! Session lifecycle, shift clock, and invasion-pressure state machine
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    BANNER_TTL_MS, INVASION_MAX, INVASION_MIDPOINT, MSG_BREACH, MSG_PAUSED, MSG_TIMEOUT,
    SESSION_SECONDS, TICK_MS,
};
use crate::evaluator::{self, DecisionOutcome, clamp_invasion};
use crate::forms::{FormCatalog, Requirement};
use crate::generator::{GeneratedForm, Presence, bootstrap_form, generate_form};
use crate::store::ScoreStore;

/// Desk variants differ in where the invasion gauge starts and whether the
/// opening round is the pinned compliant tutorial card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeskMode {
    #[default]
    Classic,
    Frontline,
}

impl DeskMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Frontline => "frontline",
        }
    }
}

impl fmt::Display for DeskMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeskMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Self::Classic),
            "frontline" => Ok(Self::Frontline),
            _ => Err(()),
        }
    }
}

/// Tunable session parameters. Defaults match the classic desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_seconds")]
    pub session_seconds: u32,
    /// Gauge value at the opening bell, clamped to the 0..=100 meter.
    #[serde(default)]
    pub invasion_start: i32,
    /// Whether every shift opens on the compliant bootstrap card.
    #[serde(default = "default_pinned_first_form")]
    pub pinned_first_form: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::for_mode(DeskMode::Classic)
    }
}

impl SessionConfig {
    #[must_use]
    pub const fn for_mode(mode: DeskMode) -> Self {
        match mode {
            DeskMode::Classic => Self {
                session_seconds: SESSION_SECONDS,
                invasion_start: 0,
                pinned_first_form: true,
            },
            DeskMode::Frontline => Self {
                session_seconds: SESSION_SECONDS,
                invasion_start: INVASION_MIDPOINT,
                pinned_first_form: false,
            },
        }
    }
}

const fn default_session_seconds() -> u32 {
    SESSION_SECONDS
}

const fn default_pinned_first_form() -> bool {
    true
}

/// Player ruling on the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Return,
}

impl Decision {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Return => "return",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(Self::Approve),
            "return" => Ok(Self::Return),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Ended,
}

/// Which terminal condition closed the shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// The shift clock ran out with the gauge below 100.
    Timeout,
    /// The invasion gauge hit 100 before the clock ran out.
    Breach,
}

impl EndReason {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Timeout => MSG_TIMEOUT,
            Self::Breach => MSG_BREACH,
        }
    }
}

/// Short-lived desk-blotter message. Purely cosmetic; expired by the tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    pub ttl_ms: i32,
}

/// Live state for one desk shift. Mutated only by the session machine and
/// the decision evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub seconds_left: u32,
    pub score: u32,
    pub combo: u32,
    /// Pressure gauge, clamped to 0..=100. The shift ends at 100.
    pub invasion: i32,
    pub current: GeneratedForm,
    #[serde(default)]
    pub banner: Option<Banner>,
    pub high_score: u32,
    #[serde(default)]
    pub end_reason: Option<EndReason>,
    #[serde(default)]
    pub decisions: u32,
    #[serde(default)]
    pub correct_decisions: u32,
    #[serde(default)]
    pub best_combo: u32,
}

impl SessionState {
    pub(crate) fn set_banner(&mut self, text: &str) {
        self.banner = Some(Banner {
            text: text.to_string(),
            ttl_ms: BANNER_TTL_MS,
        });
    }
}

/// Render-facing shape of the current request. Ground truth stays behind the
/// desk: `should_approve` is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub id: u64,
    pub title: String,
    pub code: String,
    pub flavor: String,
    pub requirements: Vec<Requirement>,
    pub present: Presence,
    pub is_expedite: bool,
}

impl From<&GeneratedForm> for FormView {
    fn from(form: &GeneratedForm) -> Self {
        Self {
            id: form.id,
            title: form.title.clone(),
            code: form.code.clone(),
            flavor: form.flavor.clone(),
            requirements: form.requirements.clone(),
            present: form.present,
            is_expedite: form.is_expedite,
        }
    }
}

/// Observable snapshot for the host UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub running: bool,
    pub seconds_left: u32,
    pub score: u32,
    pub combo: u32,
    pub invasion_percent: i32,
    pub current_form: FormView,
    pub transient_message: Option<String>,
    pub high_score: u32,
    pub ended: bool,
    pub end_reason: Option<EndReason>,
}

/// The Permit Desk engine: one logical session driven by a host-owned
/// once-per-second tick source and discrete player rulings.
pub struct PermitDesk<S: ScoreStore> {
    state: SessionState,
    config: SessionConfig,
    catalog: FormCatalog,
    rng: ChaCha20Rng,
    store: S,
    next_form_id: u64,
}

impl<S: ScoreStore> PermitDesk<S> {
    /// Build a desk with an explicit catalog and configuration. The seed
    /// fixes the deal order for replayable sessions.
    pub fn new(catalog: FormCatalog, config: SessionConfig, store: S, seed: u64) -> Self {
        let mut desk = Self {
            state: SessionState {
                phase: SessionPhase::Idle,
                seconds_left: config.session_seconds,
                score: 0,
                combo: 0,
                invasion: clamp_invasion(config.invasion_start),
                current: bootstrap_form(&catalog, 0),
                banner: None,
                high_score: 0,
                end_reason: None,
                decisions: 0,
                correct_decisions: 0,
                best_combo: 0,
            },
            config,
            catalog,
            rng: ChaCha20Rng::seed_from_u64(seed),
            store,
            next_form_id: 1,
        };
        desk.state.high_score = desk.store.load_high_score().unwrap_or(0);
        desk
    }

    /// Desk with the embedded reference catalog and mode defaults.
    pub fn for_mode(mode: DeskMode, store: S, seed: u64) -> Self {
        Self::new(
            FormCatalog::load_from_static(),
            SessionConfig::for_mode(mode),
            store,
            seed,
        )
    }

    /// Open a shift. Valid from any phase; calling mid-shift restarts it.
    pub fn start(&mut self) {
        self.state.phase = SessionPhase::Running;
        self.state.seconds_left = self.config.session_seconds;
        self.state.score = 0;
        self.state.combo = 0;
        self.state.invasion = clamp_invasion(self.config.invasion_start);
        self.state.banner = None;
        self.state.end_reason = None;
        self.state.decisions = 0;
        self.state.correct_decisions = 0;
        self.state.best_combo = 0;
        let id = self.take_form_id();
        self.state.current = if self.config.pinned_first_form {
            bootstrap_form(&self.catalog, id)
        } else {
            generate_form(&self.catalog, &mut self.rng, id)
        };
    }

    /// Suspend the shift without declaring an outcome or reconciling the
    /// best score. Counters survive for a later restart.
    pub fn pause(&mut self) {
        if self.state.phase != SessionPhase::Running {
            return;
        }
        self.state.phase = SessionPhase::Idle;
        self.state.set_banner(MSG_PAUSED);
    }

    /// Advance the shift clock by one second. Host-owned scheduler calls
    /// this once per elapsed second while the shift runs.
    pub fn tick(&mut self) {
        if self.state.phase != SessionPhase::Running {
            return;
        }
        if let Some(banner) = self.state.banner.as_mut() {
            banner.ttl_ms -= TICK_MS;
            if banner.ttl_ms <= 0 {
                self.state.banner = None;
            }
        }
        self.state.seconds_left = self.state.seconds_left.saturating_sub(1);
        if self.state.seconds_left == 0 {
            self.finish(EndReason::Timeout);
        }
    }

    /// Rule on the current request. Silently ignored outside a running
    /// shift. A ruling that pushes the gauge to 100 is still scored before
    /// the shift closes.
    pub fn decide(&mut self, decision: Decision) -> Option<DecisionOutcome> {
        if self.state.phase != SessionPhase::Running {
            return None;
        }
        let outcome = evaluator::evaluate(&mut self.state, &self.config, decision);
        self.deal_next();
        if self.state.invasion >= INVASION_MAX {
            self.finish(EndReason::Breach);
        }
        Some(outcome)
    }

    fn deal_next(&mut self) {
        let id = self.take_form_id();
        self.state.current = generate_form(&self.catalog, &mut self.rng, id);
    }

    fn finish(&mut self, reason: EndReason) {
        self.state.phase = SessionPhase::Ended;
        self.state.end_reason = Some(reason);
        let best = self.state.high_score.max(self.state.score);
        self.state.high_score = best;
        // Fire-and-forget: storage unavailability degrades silently.
        let _ = self.store.save_high_score(best);
        self.state.set_banner(reason.message());
    }

    fn take_form_id(&mut self) -> u64 {
        let id = self.next_form_id;
        self.next_form_id += 1;
        id
    }

    /// Observable snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            running: self.state.phase == SessionPhase::Running,
            seconds_left: self.state.seconds_left,
            score: self.state.score,
            combo: self.state.combo,
            invasion_percent: self.state.invasion,
            current_form: FormView::from(&self.state.current),
            transient_message: self.state.banner.as_ref().map(|b| b.text.clone()),
            high_score: self.state.high_score,
            ended: self.state.phase == SessionPhase::Ended,
            end_reason: self.state.end_reason,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Mutable state access for hosts and tests.
    pub fn with_state_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        f(&mut self.state)
    }
}

//! Centralized balance and tuning constants for the Permit Desk engine.
//!
//! These values define the deterministic math for the desk simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Session clock ------------------------------------------------------------
pub(crate) const SESSION_SECONDS: u32 = 45;

// Generation weights -------------------------------------------------------
pub(crate) const COMPLIANT_CHANCE: f32 = 0.45;
pub(crate) const EXPEDITE_DOUBLE_MISS_CHANCE: f32 = 0.55;
pub(crate) const STANDARD_DOUBLE_MISS_CHANCE: f32 = 0.25;
pub(crate) const MAX_MISSING_REQUIREMENTS: usize = 2;

// Scoring ------------------------------------------------------------------
pub(crate) const BASE_POINTS: u32 = 100;
pub(crate) const SPEED_BONUS_MAX: u32 = 30;
pub(crate) const COMBO_MILESTONE: u32 = 5;
pub(crate) const COMBO_MILESTONE_BONUS: f64 = 0.25;

// Invasion meter -----------------------------------------------------------
pub(crate) const INVASION_MIN: i32 = 0;
pub(crate) const INVASION_MAX: i32 = 100;
pub(crate) const INVASION_MIDPOINT: i32 = 50;
pub(crate) const INVASION_CORRECT_RELIEF: i32 = 2;
pub(crate) const INVASION_BAD_APPROVE_PENALTY: i32 = 15;
pub(crate) const INVASION_BAD_RETURN_PENALTY: i32 = 6;

// Transient banner ---------------------------------------------------------
pub(crate) const BANNER_TTL_MS: i32 = 900;
pub(crate) const TICK_MS: i32 = 1_000;

// Desk blotter copy --------------------------------------------------------
pub(crate) const MSG_STAMPED: &str = "Stamped. Next.";
pub(crate) const MSG_RETURNED: &str = "Returned: Missing item(s).";
pub(crate) const MSG_BAD_APPROVE: &str = "Incorrect approval. Process violation.";
pub(crate) const MSG_BAD_RETURN: &str = "Wrong return. Resubmission required.";
pub(crate) const MSG_PAUSED: &str = "Shift paused.";
pub(crate) const MSG_TIMEOUT: &str = "Desk cleared. For now.";
pub(crate) const MSG_BREACH: &str = "Compliance breach. The hive mind advances.";

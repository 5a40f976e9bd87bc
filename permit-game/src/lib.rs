//! Permit Desk Game Engine
//!
//! Platform-agnostic core logic for the Permit Desk swipe-to-approve
//! minigame. This crate provides the catalog, generator, session state
//! machine, decision evaluator, and persistence seam without UI or
//! platform-specific dependencies. A host layer owns rendering, gesture
//! translation, and the once-per-second tick source.

pub mod constants;
pub mod evaluator;
pub mod forms;
pub mod generator;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use evaluator::{DecisionOutcome, combo_multiplier, speed_bonus};
pub use forms::{
    CatalogError, EXPEDITE_CODE, FormCatalog, FormTemplate, REQUIREMENT_COUNT, Requirement,
    RequirementKey,
};
pub use generator::{GeneratedForm, Presence, bootstrap_form, generate_form};
pub use session::{
    Banner, Decision, DeskMode, EndReason, FormView, PermitDesk, SessionConfig, SessionPhase,
    SessionState, SessionView,
};
pub use store::{MemoryScoreStore, ScoreStore};

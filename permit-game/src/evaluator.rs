//! Decision scoring, combo multipliers, and invasion pressure
use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_POINTS, COMBO_MILESTONE, COMBO_MILESTONE_BONUS, INVASION_BAD_APPROVE_PENALTY,
    INVASION_BAD_RETURN_PENALTY, INVASION_CORRECT_RELIEF, INVASION_MAX, INVASION_MIN, MSG_BAD_APPROVE,
    MSG_BAD_RETURN, MSG_RETURNED, MSG_STAMPED, SPEED_BONUS_MAX,
};
use crate::session::{Decision, SessionConfig, SessionState};

/// What a single ruling did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub decision: Decision,
    pub correct: bool,
    /// Points awarded; zero on an incorrect ruling.
    pub points: u32,
    pub speed_bonus: u32,
    pub multiplier: f64,
    /// Streak after this ruling.
    pub combo: u32,
}

/// Score one ruling against the current form's ground truth and apply the
/// reward or penalty path. The caller owns round advancement and terminal
/// checks.
pub(crate) fn evaluate(
    state: &mut SessionState,
    cfg: &SessionConfig,
    decision: Decision,
) -> DecisionOutcome {
    let correct = match decision {
        Decision::Approve => state.current.should_approve(),
        Decision::Return => !state.current.should_approve(),
    };
    let speed_bonus = speed_bonus(state.seconds_left, cfg.session_seconds);
    state.decisions += 1;

    if correct {
        state.combo += 1;
        state.correct_decisions += 1;
        state.best_combo = state.best_combo.max(state.combo);

        let multiplier = combo_multiplier(state.combo);
        let points = points_awarded(BASE_POINTS + speed_bonus, multiplier);
        state.score += points;
        state.invasion = clamp_invasion(state.invasion - INVASION_CORRECT_RELIEF);
        state.set_banner(match decision {
            Decision::Approve => MSG_STAMPED,
            Decision::Return => MSG_RETURNED,
        });

        DecisionOutcome {
            decision,
            correct,
            points,
            speed_bonus,
            multiplier,
            combo: state.combo,
        }
    } else {
        state.combo = 0;
        // Wrongly approving a bad request is more damaging than wrongly
        // returning a good one.
        let penalty = match decision {
            Decision::Approve => INVASION_BAD_APPROVE_PENALTY,
            Decision::Return => INVASION_BAD_RETURN_PENALTY,
        };
        state.invasion = clamp_invasion(state.invasion + penalty);
        state.set_banner(match decision {
            Decision::Approve => MSG_BAD_APPROVE,
            Decision::Return => MSG_BAD_RETURN,
        });

        DecisionOutcome {
            decision,
            correct,
            points: 0,
            speed_bonus,
            multiplier: 1.0,
            combo: 0,
        }
    }
}

pub(crate) const fn clamp_invasion(value: i32) -> i32 {
    if value < INVASION_MIN {
        INVASION_MIN
    } else if value > INVASION_MAX {
        INVASION_MAX
    } else {
        value
    }
}

/// Stacking streak multiplier: +25% for every five consecutive correct
/// rulings.
#[must_use]
pub fn combo_multiplier(combo: u32) -> f64 {
    1.0 + f64::from(combo / COMBO_MILESTONE) * COMBO_MILESTONE_BONUS
}

/// Bonus points for ruling early in the shift, scaled over the full clock.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn speed_bonus(seconds_left: u32, session_seconds: u32) -> u32 {
    if session_seconds == 0 {
        return 0;
    }
    let scaled =
        (f64::from(seconds_left) / f64::from(session_seconds) * f64::from(SPEED_BONUS_MAX)).round();
    (scaled as u32).min(SPEED_BONUS_MAX)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn points_awarded(base: u32, multiplier: f64) -> u32 {
    (f64::from(base) * multiplier).round() as u32
}

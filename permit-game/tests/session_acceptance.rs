//! End-to-end acceptance for session scoring, terminal conditions, and
//! high-score reconciliation.
use permit_game::{
    Decision, DeskMode, EndReason, FormCatalog, GeneratedForm, MemoryScoreStore, PermitDesk,
    Presence, RequirementKey, ScoreStore,
};

/// Forge a request with known ground truth onto the desk.
fn forged_form(compliant: bool, id: u64) -> GeneratedForm {
    let catalog = FormCatalog::load_from_static();
    let template = catalog.get(0).unwrap();
    let mut present = Presence::default();
    if !compliant {
        present.set(RequirementKey::Signature, false);
    }
    GeneratedForm::from_template(template, present, id)
}

fn running_desk() -> PermitDesk<MemoryScoreStore> {
    let mut desk = PermitDesk::for_mode(DeskMode::Classic, MemoryScoreStore::new(), 0xF00D);
    desk.start();
    desk
}

#[test]
fn wrong_approval_raises_the_gauge_and_resets_the_streak() {
    let mut desk = running_desk();
    // Build a streak of one first so the reset is observable.
    desk.decide(Decision::Approve);
    assert_eq!(desk.state().combo, 1);

    desk.with_state_mut(|s| s.current = forged_form(false, 100));
    let outcome = desk.decide(Decision::Approve).unwrap();
    assert!(!outcome.correct);
    assert_eq!(outcome.points, 0);
    assert_eq!(desk.state().combo, 0);
    assert_eq!(desk.state().invasion, 15);
}

#[test]
fn correct_return_rewards_base_plus_speed_bonus() {
    let mut desk = running_desk();
    desk.with_state_mut(|s| {
        s.invasion = 10;
        s.current = forged_form(false, 100);
    });
    let outcome = desk.decide(Decision::Return).unwrap();
    assert!(outcome.correct);
    // Full clock: speed bonus 30, multiplier x1 at combo 1.
    assert_eq!(outcome.speed_bonus, 30);
    assert_eq!(outcome.points, 130);
    assert_eq!(desk.state().score, 130);
    assert_eq!(desk.state().combo, 1);
    assert_eq!(desk.state().invasion, 8);
}

#[test]
fn gauge_relief_clamps_at_zero() {
    let mut desk = running_desk();
    desk.decide(Decision::Approve);
    assert_eq!(desk.state().invasion, 0);
}

#[test]
fn wrong_return_penalty_is_softer_than_wrong_approval() {
    let mut desk = running_desk();
    desk.with_state_mut(|s| s.current = forged_form(true, 100));
    desk.decide(Decision::Return);
    assert_eq!(desk.state().invasion, 6);
}

#[test]
fn combo_milestones_stack_quarter_multipliers() {
    let mut desk = running_desk();
    let mut awarded = Vec::new();
    for round in 0..10 {
        desk.with_state_mut(|s| s.current = forged_form(true, 100 + round));
        let outcome = desk.decide(Decision::Approve).unwrap();
        awarded.push(outcome.points);
    }
    // No ticks elapsed: base stays 100 + 30 throughout.
    assert_eq!(awarded[0], 130); // combo 1, x1
    assert_eq!(awarded[3], 130); // combo 4, x1
    assert_eq!(awarded[4], 163); // combo 5, x1.25 milestone
    assert_eq!(awarded[5], 163); // combo 6, still x1.25
    assert_eq!(awarded[9], 195); // combo 10, x1.5
    assert_eq!(desk.state().best_combo, 10);
}

#[test]
fn penalty_from_ninety_five_clamps_and_breaches() {
    let mut desk = running_desk();
    desk.with_state_mut(|s| {
        s.invasion = 95;
        s.current = forged_form(false, 100);
    });
    let outcome = desk.decide(Decision::Approve).unwrap();
    // The breaching ruling is still scored (as an incorrect one).
    assert!(!outcome.correct);
    assert_eq!(desk.state().invasion, 100);
    let view = desk.view();
    assert!(view.ended);
    assert_eq!(view.end_reason, Some(EndReason::Breach));
    assert!(view.seconds_left > 0);
}

#[test]
fn clock_expiry_with_gauge_below_hundred_is_a_timeout() {
    let mut desk = running_desk();
    for _ in 0..45 {
        desk.tick();
    }
    let view = desk.view();
    assert!(view.ended);
    assert!(!view.running);
    assert_eq!(view.end_reason, Some(EndReason::Timeout));
    assert!(view.invasion_percent < 100);
}

#[test]
fn last_second_ruling_is_scored_before_expiry() {
    let mut desk = running_desk();
    for _ in 0..44 {
        desk.tick();
    }
    assert_eq!(desk.state().seconds_left, 1);
    desk.with_state_mut(|s| s.current = forged_form(true, 100));
    let outcome = desk.decide(Decision::Approve).unwrap();
    // round(1/45 * 30) = 1
    assert_eq!(outcome.speed_bonus, 1);
    assert_eq!(outcome.points, 101);
    desk.tick();
    assert_eq!(desk.view().end_reason, Some(EndReason::Timeout));
    assert_eq!(desk.state().score, 101);
}

#[test]
fn high_score_survives_the_session_boundary() {
    let store = MemoryScoreStore::new();

    let mut first = PermitDesk::for_mode(DeskMode::Classic, store.clone(), 1);
    first.start();
    for round in 0..4 {
        first.with_state_mut(|s| s.current = forged_form(true, 200 + round));
        first.decide(Decision::Approve);
    }
    assert_eq!(first.state().score, 520);
    for _ in 0..45 {
        first.tick();
    }
    assert_eq!(store.best(), 520);

    // A fresh session against the same device store sees the earlier best.
    let second = PermitDesk::for_mode(DeskMode::Classic, store.clone(), 2);
    assert!(second.view().high_score >= 500);
}

#[test]
fn lower_scoring_rerun_does_not_regress_the_best() {
    let store = MemoryScoreStore::new();
    store.save_high_score(1_000).unwrap();

    let mut desk = PermitDesk::for_mode(DeskMode::Classic, store.clone(), 5);
    desk.start();
    desk.decide(Decision::Approve);
    for _ in 0..45 {
        desk.tick();
    }
    assert_eq!(store.best(), 1_000);
    assert_eq!(desk.view().high_score, 1_000);
}

#[test]
fn restart_after_ending_opens_a_clean_shift() {
    let mut desk = running_desk();
    desk.with_state_mut(|s| {
        s.invasion = 95;
        s.current = forged_form(false, 100);
    });
    desk.decide(Decision::Approve);
    assert!(desk.view().ended);

    desk.start();
    let view = desk.view();
    assert!(view.running);
    assert!(!view.ended);
    assert_eq!(view.score, 0);
    assert_eq!(view.combo, 0);
    assert_eq!(view.invasion_percent, 0);
    assert_eq!(view.seconds_left, 45);
    assert_eq!(view.end_reason, None);
    assert!(view.transient_message.is_none());
}

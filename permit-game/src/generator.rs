//! Randomized permit generation with weighted compliance outcomes
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    COMPLIANT_CHANCE, EXPEDITE_DOUBLE_MISS_CHANCE, MAX_MISSING_REQUIREMENTS,
    STANDARD_DOUBLE_MISS_CHANCE,
};
use crate::forms::{FormCatalog, FormTemplate, Requirement, RequirementKey};

/// Per-requirement satisfaction flags for one generated request. Defaults to
/// fully satisfied; generation knocks individual flags out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presence {
    pub signature: bool,
    pub fee: bool,
    pub supporting_doc: bool,
    pub correct_form: bool,
    pub notarized: bool,
}

impl Default for Presence {
    fn default() -> Self {
        Self {
            signature: true,
            fee: true,
            supporting_doc: true,
            correct_form: true,
            notarized: true,
        }
    }
}

impl Presence {
    #[must_use]
    pub const fn get(self, key: RequirementKey) -> bool {
        match key {
            RequirementKey::Signature => self.signature,
            RequirementKey::Fee => self.fee,
            RequirementKey::SupportingDoc => self.supporting_doc,
            RequirementKey::CorrectForm => self.correct_form,
            RequirementKey::Notarized => self.notarized,
        }
    }

    pub const fn set(&mut self, key: RequirementKey, value: bool) {
        match key {
            RequirementKey::Signature => self.signature = value,
            RequirementKey::Fee => self.fee = value,
            RequirementKey::SupportingDoc => self.supporting_doc = value,
            RequirementKey::CorrectForm => self.correct_form = value,
            RequirementKey::Notarized => self.notarized = value,
        }
    }

    #[must_use]
    pub const fn all_present(self) -> bool {
        self.signature && self.fee && self.supporting_doc && self.correct_form && self.notarized
    }

    #[must_use]
    pub fn missing_count(self) -> usize {
        RequirementKey::ALL
            .into_iter()
            .filter(|k| !self.get(*k))
            .count()
    }
}

/// One request instance dealt onto the desk. Owned by the session while
/// active and discarded when the next round is dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedForm {
    pub id: u64,
    pub title: String,
    pub code: String,
    pub flavor: String,
    pub requirements: Vec<Requirement>,
    pub present: Presence,
    /// Ground truth consulted only by the evaluator; the render-facing view
    /// omits it so the puzzle is not spoiled.
    should_approve: bool,
    pub is_expedite: bool,
}

impl GeneratedForm {
    /// Build an instance from a template. `should_approve` is derived from
    /// the presence flags here and nowhere else.
    #[must_use]
    pub fn from_template(template: &FormTemplate, present: Presence, id: u64) -> Self {
        Self {
            id,
            title: template.title.clone(),
            code: template.code.clone(),
            flavor: template.flavor.clone(),
            requirements: template.requirements.clone(),
            present,
            should_approve: present.all_present(),
            is_expedite: template.is_expedite(),
        }
    }

    #[must_use]
    pub const fn should_approve(&self) -> bool {
        self.should_approve
    }
}

/// Deal a randomized request: uniform template pick, ~45% fully compliant,
/// otherwise one or two requirements withheld (the expedite archetype leans
/// toward two).
pub fn generate_form<R: Rng>(catalog: &FormCatalog, rng: &mut R, id: u64) -> GeneratedForm {
    let idx = rng.random_range(0..catalog.len());
    let template = catalog.get(idx).expect("catalog index in range");

    let mut present = Presence::default();
    if rng.random::<f32>() >= COMPLIANT_CHANCE {
        let double_miss_chance = if template.is_expedite() {
            EXPEDITE_DOUBLE_MISS_CHANCE
        } else {
            STANDARD_DOUBLE_MISS_CHANCE
        };
        let misses = if rng.random::<f32>() < double_miss_chance {
            MAX_MISSING_REQUIREMENTS
        } else {
            1
        };
        let mut keys = RequirementKey::ALL.to_vec();
        for _ in 0..misses {
            let victim = keys.swap_remove(rng.random_range(0..keys.len()));
            present.set(victim, false);
        }
    }

    GeneratedForm::from_template(template, present, id)
}

/// Deterministic first impression: the catalog's lead template, fully
/// compliant. Used before any player interaction and for pinned first rounds.
#[must_use]
pub fn bootstrap_form(catalog: &FormCatalog, id: u64) -> GeneratedForm {
    let template = catalog.get(0).expect("catalog is never empty");
    GeneratedForm::from_template(template, Presence::default(), id)
}

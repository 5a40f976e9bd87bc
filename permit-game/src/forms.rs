//! Permit form catalog and requirement checklist data
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DEFAULT_FORMS_DATA: &str = include_str!("../../permit-web/static/assets/data/forms.json");

/// Code of the designated emergency archetype; biases generation toward
/// missing two requirements instead of one.
pub const EXPEDITE_CODE: &str = "X-1";

/// Number of checklist items on every permit form.
pub const REQUIREMENT_COUNT: usize = 5;

/// One of the five fixed document-compliance checks evaluated per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequirementKey {
    Signature,
    Fee,
    SupportingDoc,
    CorrectForm,
    Notarized,
}

impl RequirementKey {
    pub const ALL: [Self; REQUIREMENT_COUNT] = [
        Self::Signature,
        Self::Fee,
        Self::SupportingDoc,
        Self::CorrectForm,
        Self::Notarized,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Signature => "signature",
            Self::Fee => "fee",
            Self::SupportingDoc => "supportingDoc",
            Self::CorrectForm => "correctForm",
            Self::Notarized => "notarized",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Signature => 0,
            Self::Fee => 1,
            Self::SupportingDoc => 2,
            Self::CorrectForm => 3,
            Self::Notarized => 4,
        }
    }

    /// Short label for compact checklist rendering.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Signature => "SIG",
            Self::Fee => "FEE",
            Self::SupportingDoc => "DOC",
            Self::CorrectForm => "FORM",
            Self::Notarized => "NOTARY",
        }
    }
}

impl fmt::Display for RequirementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signature" => Ok(Self::Signature),
            "fee" => Ok(Self::Fee),
            "supportingDoc" => Ok(Self::SupportingDoc),
            "correctForm" => Ok(Self::CorrectForm),
            "notarized" => Ok(Self::Notarized),
            _ => Err(()),
        }
    }
}

/// A single checklist slot on a form template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub key: RequirementKey,
    pub label: String,
}

/// A request archetype from the catalog. Every template enumerates all five
/// requirement keys exactly once; slot order varies per template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTemplate {
    pub title: String,
    pub code: String,
    pub flavor: String,
    pub requirements: Vec<Requirement>,
}

impl FormTemplate {
    #[must_use]
    pub fn is_expedite(&self) -> bool {
        self.code == EXPEDITE_CODE
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = [false; REQUIREMENT_COUNT];
        for req in &self.requirements {
            let idx = req.key.index();
            if seen[idx] {
                return Err(CatalogError::DuplicateRequirement {
                    code: self.code.clone(),
                    key: req.key,
                });
            }
            seen[idx] = true;
        }
        for (idx, key) in RequirementKey::ALL.into_iter().enumerate() {
            if !seen[idx] {
                return Err(CatalogError::MissingRequirement {
                    code: self.code.clone(),
                    key,
                });
            }
        }
        Ok(())
    }
}

/// Catalog validation failures. These are programming-time invariant
/// violations surfaced when content is loaded, not runtime conditions.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog contains no form templates")]
    Empty,
    #[error("template {code} is missing requirement key {key}")]
    MissingRequirement { code: String, key: RequirementKey },
    #[error("template {code} lists requirement key {key} more than once")]
    DuplicateRequirement { code: String, key: RequirementKey },
}

/// Fixed, ordered collection of request archetypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FormCatalog(Vec<FormTemplate>);

impl FormCatalog {
    /// Load templates from a JSON array, enforcing the checklist invariant
    /// on every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed, the catalog is empty,
    /// or any template does not list all five requirement keys exactly once.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let templates: Vec<FormTemplate> = serde_json::from_str(json)?;
        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }
        for template in &templates {
            template.validate()?;
        }
        Ok(Self(templates))
    }

    /// Load the reference catalog from the embedded static asset.
    ///
    /// # Panics
    ///
    /// Panics if the embedded asset is malformed. The asset ships with the
    /// crate and is covered by tests, so this is a startup assertion rather
    /// than a runtime condition.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_FORMS_DATA).expect("embedded forms.json is valid")
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&FormTemplate> {
        self.0.get(idx)
    }

    #[must_use]
    pub fn get_by_code(&self, code: &str) -> Option<&FormTemplate> {
        self.0.iter().find(|t| t.code == code)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormTemplate> {
        self.0.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a FormCatalog {
    type Item = &'a FormTemplate;
    type IntoIter = std::slice::Iter<'a, FormTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_catalog_loads_and_validates() {
        let catalog = FormCatalog::load_from_static();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.get_by_code(EXPEDITE_CODE).is_some());
        assert_eq!(
            catalog.iter().filter(|t| t.is_expedite()).count(),
            1,
            "exactly one designated expedite archetype"
        );
    }

    #[test]
    fn every_template_lists_each_key_once() {
        let catalog = FormCatalog::load_from_static();
        for template in &catalog {
            for key in RequirementKey::ALL {
                assert_eq!(
                    template
                        .requirements
                        .iter()
                        .filter(|r| r.key == key)
                        .count(),
                    1,
                    "template {} should list {key} exactly once",
                    template.code
                );
            }
        }
    }

    #[test]
    fn missing_requirement_is_rejected() {
        let json = r#"[{
            "title": "Short Form",
            "code": "SF-1",
            "flavor": "Too short.",
            "requirements": [
                { "key": "signature", "label": "Sign" },
                { "key": "fee", "label": "Fee" }
            ]
        }]"#;
        let err = FormCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::MissingRequirement { .. }));
    }

    #[test]
    fn duplicate_requirement_is_rejected() {
        let json = r#"[{
            "title": "Double Form",
            "code": "DF-1",
            "flavor": "Twice the signatures.",
            "requirements": [
                { "key": "signature", "label": "Sign" },
                { "key": "signature", "label": "Sign Again" },
                { "key": "fee", "label": "Fee" },
                { "key": "supportingDoc", "label": "Doc" },
                { "key": "correctForm", "label": "Form" }
            ]
        }]"#;
        let err = FormCatalog::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateRequirement {
                key: RequirementKey::Signature,
                ..
            }
        ));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(
            FormCatalog::from_json("[]"),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn requirement_key_round_trips_strings() {
        for key in RequirementKey::ALL {
            assert_eq!(key.as_str().parse::<RequirementKey>(), Ok(key));
        }
        assert!("stapler".parse::<RequirementKey>().is_err());
    }
}

//! Form validation for superhero submissions.
//!
//! Input arrives as raw text straight from the form fields. [`validate`] either
//! produces a typed [`Superhero`] or reports every failing field at once.

use std::collections::BTreeMap;

use shared::domain::{
    HumilityScore, HumilityScoreError, Superhero, MAX_HUMILITY_SCORE, MIN_HUMILITY_SCORE,
};

pub const NAME_REQUIRED: &str = "Name is required";
pub const SUPERPOWER_REQUIRED: &str = "Superpower is required";
pub const HUMILITY_SCORE_REQUIRED: &str = "Humility Score is required";
pub const MUST_BE_A_NUMBER: &str = "Must be a number";
pub const MUST_BE_WHOLE_NUMBER: &str = "Must be a whole number";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Superpower,
    HumilityScore,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Superpower => "Superpower",
            Self::HumilityScore => "Humility Score",
        }
    }
}

/// Raw, unvalidated form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuperheroForm {
    pub name: String,
    pub superpower: String,
    pub humility_score: String,
}

impl SuperheroForm {
    pub fn new(
        name: impl Into<String>,
        superpower: impl Into<String>,
        humility_score: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            superpower: superpower.into(),
            humility_score: humility_score.into(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<FormField, String>,
}

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear_field(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

pub fn validate(form: &SuperheroForm) -> Result<Superhero, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = required_text(&form.name);
    if name.is_none() {
        errors.insert(FormField::Name, NAME_REQUIRED);
    }
    let superpower = required_text(&form.superpower);
    if superpower.is_none() {
        errors.insert(FormField::Superpower, SUPERPOWER_REQUIRED);
    }
    let humility_score = match parse_humility_score(&form.humility_score) {
        Ok(score) => Some(score),
        Err(message) => {
            errors.insert(FormField::HumilityScore, message);
            None
        }
    };

    match (name, superpower, humility_score) {
        (Some(name), Some(superpower), Some(humility_score)) if errors.is_empty() => {
            Ok(Superhero {
                name: name.to_string(),
                superpower: superpower.to_string(),
                humility_score,
            })
        }
        _ => Err(errors),
    }
}

/// Re-checks a single field; `None` means the field is currently valid.
pub fn validate_field(form: &SuperheroForm, field: FormField) -> Option<String> {
    match field {
        FormField::Name => required_text(&form.name)
            .is_none()
            .then(|| NAME_REQUIRED.to_string()),
        FormField::Superpower => required_text(&form.superpower)
            .is_none()
            .then(|| SUPERPOWER_REQUIRED.to_string()),
        FormField::HumilityScore => parse_humility_score(&form.humility_score).err(),
    }
}

fn required_text(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_humility_score(raw: &str) -> Result<HumilityScore, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HUMILITY_SCORE_REQUIRED.to_string());
    }

    let value: f64 = match trimmed.parse() {
        Ok(value) if f64::is_finite(value) => value,
        _ => return Err(MUST_BE_A_NUMBER.to_string()),
    };

    if value < MIN_HUMILITY_SCORE as f64 {
        return Err(HumilityScoreError::TooLow.to_string());
    }
    if value > MAX_HUMILITY_SCORE as f64 {
        return Err(HumilityScoreError::TooHigh.to_string());
    }
    if value.fract() != 0.0 {
        return Err(MUST_BE_WHOLE_NUMBER.to_string());
    }

    HumilityScore::new(value as i64).map_err(|err| err.to_string())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;

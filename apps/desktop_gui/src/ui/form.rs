//! Form input plus the inline error state shown under each field.

use client_core::{validate, validate_field, FieldErrors, FormField, SuperheroForm};
use shared::domain::Superhero;

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub input: SuperheroForm,
    pub errors: FieldErrors,
    /// Set after the first submit attempt; edits revalidate their field from then on.
    submitted: bool,
}

impl FormState {
    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.input.name,
            FormField::Superpower => &mut self.input.superpower,
            FormField::HumilityScore => &mut self.input.humility_score,
        }
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn after_edit(&mut self, field: FormField) {
        if !self.submitted {
            return;
        }
        match validate_field(&self.input, field) {
            Some(message) => self.errors.insert(field, message),
            None => self.errors.clear_field(field),
        }
    }

    /// Validated record, or `None` with the per-field errors populated.
    pub fn try_submit(&mut self) -> Option<Superhero> {
        self.submitted = true;
        match validate(&self.input) {
            Ok(hero) => {
                self.errors.clear();
                Some(hero)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.errors.clear();
        self.submitted = false;
    }
}

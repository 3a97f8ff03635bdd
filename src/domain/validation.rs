use super::error::Error;
use super::outcome::Outcome;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Field-level validation failures, grouped by property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, property: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(property.into())
            .or_default()
            .push(message.into());
    }

    /// Records a validation error under its property. Errors of any other kind
    /// are filed under their full code.
    pub fn push(&mut self, error: &Error) {
        let property = error.property().unwrap_or_else(|| error.code());
        self.add(property, error.message());
    }

    /// Adds `message` under `property` when `condition` does not hold.
    pub fn ensure(&mut self, condition: bool, property: &str, message: &str) {
        if !condition {
            self.add(property, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failing properties.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, property: &str) -> Option<&[String]> {
        self.fields.get(property).map(Vec::as_slice)
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    pub fn first(&self) -> Option<Error> {
        self.fields.iter().next().and_then(|(property, messages)| {
            messages
                .first()
                .map(|message| Error::validation(property, message.clone()))
        })
    }

    /// Success with `value` when nothing failed, otherwise a failure carrying
    /// the first validation error.
    pub fn into_outcome<T>(self, value: T) -> Outcome<T> {
        match self.first() {
            Some(error) => Outcome::failure(error),
            None => Outcome::success(value),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let properties: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        write!(f, "validation failed for: {}", properties.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl FromIterator<Error> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = Error>>(iter: I) -> Self {
        let mut errors = Self::new();
        for error in iter {
            errors.push(&error);
        }
        errors
    }
}

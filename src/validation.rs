//! Declarative per-field form validation.
//!
//! A [`Validator`] is a list of [`FieldRules`], one chain per form field. Running it never
//! fails: every broken rule becomes a [`FieldError`] in the returned [`ValidationResult`],
//! alongside the sanitized (trimmed) values so a rejected form can be shown again.

use std::{collections::HashMap, sync::OnceLock};

use regex::Regex;

use crate::util::parse_iso_date;

/// Lets a deserialized form expose its raw values by field name.
pub trait FormFields {
    fn field(&self, name: &str) -> Option<&str>;
}

impl FormFields for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Copy)]
enum Check {
    MinLength(usize),
    Alphanumeric,
    IsoDate,
}

impl Check {
    fn passes(&self, value: &str) -> bool {
        match self {
            Check::MinLength(min) => value.chars().count() >= *min,
            Check::Alphanumeric => alphanumeric().is_match(value),
            Check::IsoDate => parse_iso_date(value).is_some(),
        }
    }
}

fn alphanumeric() -> &'static Regex {
    static ALPHANUMERIC: OnceLock<Regex> = OnceLock::new();
    ALPHANUMERIC.get_or_init(|| Regex::new(r"^[0-9A-Za-z]+$").expect("alphanumeric pattern"))
}

#[derive(Debug, Clone)]
pub struct FieldRules {
    field: &'static str,
    trim: bool,
    optional: bool,
    checks: Vec<(Check, String)>,
}

/// Starts a rule chain for a body field.
pub fn body(field: &'static str) -> FieldRules {
    FieldRules {
        field,
        trim: false,
        optional: false,
        checks: Vec::new(),
    }
}

impl FieldRules {
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Missing or empty values skip the remaining checks.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn min_length(mut self, min: usize, message: &str) -> Self {
        self.checks.push((Check::MinLength(min), message.to_string()));
        self
    }

    pub fn alphanumeric(mut self, message: &str) -> Self {
        self.checks.push((Check::Alphanumeric, message.to_string()));
        self
    }

    pub fn iso_date(mut self, message: &str) -> Self {
        self.checks.push((Check::IsoDate, message.to_string()));
        self
    }

    fn sanitize(&self, raw: &str) -> String {
        if self.trim {
            raw.trim().to_string()
        } else {
            raw.to_string()
        }
    }

    fn run(&self, value: &str, errors: &mut Vec<FieldError>) {
        if self.optional && value.is_empty() {
            return;
        }
        for (check, message) in &self.checks {
            if !check.passes(value) {
                errors.push(FieldError {
                    field: self.field,
                    message: message.clone(),
                });
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Validator {
    fields: Vec<FieldRules>,
}

impl Validator {
    pub fn new(fields: Vec<FieldRules>) -> Self {
        Validator { fields }
    }

    pub fn validate(&self, form: &impl FormFields) -> ValidationResult {
        let mut errors = Vec::new();
        let mut values = HashMap::new();
        for rules in &self.fields {
            let value = rules.sanitize(form.field(rules.field).unwrap_or_default());
            rules.run(&value, &mut errors);
            values.insert(rules.field, value);
        }
        ValidationResult { errors, values }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
    values: HashMap<&'static str, String>,
}

impl ValidationResult {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Sanitized value of a validated field, empty for fields without rules.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn name_rules() -> Validator {
        Validator::new(vec![
            body("name")
                .trim()
                .min_length(2, "Name must be specified.")
                .alphanumeric("Name has non-alphanumeric character."),
            body("born").optional().iso_date("Invalid date"),
        ])
    }

    #[test]
    fn clean_form_has_no_errors_and_trimmed_values() {
        let result = name_rules().validate(&form(&[("name", "  Ada1 "), ("born", "")]));
        assert!(result.is_empty());
        assert_eq!(result.value("name"), "Ada1");
        assert_eq!(result.value("born"), "");
        assert_eq!(result.value("unknown"), "");
    }

    #[test]
    fn missing_required_field_reports_every_broken_rule() {
        let result = name_rules().validate(&form(&[]));
        let messages: Vec<&str> = result.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Name must be specified.", "Name has non-alphanumeric character."]
        );
        assert!(result.errors().iter().all(|e| e.field == "name"));
    }

    #[test]
    fn punctuation_and_non_ascii_letters_are_rejected() {
        for name in ["O'Brien", "Anne Marie", "Zoë"] {
            let result = name_rules().validate(&form(&[("name", name)]));
            assert_eq!(
                result.into_errors(),
                vec![FieldError {
                    field: "name",
                    message: "Name has non-alphanumeric character.".to_string(),
                }],
                "{name}"
            );
        }
    }

    #[test]
    fn optional_date_is_checked_only_when_present() {
        let result = name_rules().validate(&form(&[("name", "Ada"), ("born", "1815-12-10")]));
        assert!(result.is_empty());

        let result = name_rules().validate(&form(&[("name", "Ada"), ("born", "tomorrow")]));
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].field, "born");
        assert_eq!(result.errors()[0].message, "Invalid date");
    }
}

//! Presence validation for form submissions.
//!
//! Rules are data: a list of required fields plus conditional requirements that
//! only apply when another field holds one of a set of trigger values.

use serde_json::Value;

/// A field that becomes required when another field takes a trigger value.
#[derive(Debug, Clone)]
pub struct ConditionalRule {
    /// Field whose value is inspected
    pub field: &'static str,
    /// Values (compared trimmed, case-insensitively) that activate the rule
    pub when_any_of: &'static [&'static str],
    /// Field required while the rule is active
    pub requires: &'static str,
}

impl ConditionalRule {
    fn is_triggered(&self, body: &Value) -> bool {
        field_text(body, self.field)
            .map(|value| {
                self.when_any_of
                    .iter()
                    .any(|trigger| value.eq_ignore_ascii_case(trigger))
            })
            .unwrap_or(false)
    }
}

/// How a field is judged present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Non-blank text after trimming, see [`field_text`]
    Trimmed,
    /// Any truthy value, see [`field_flag`]; whitespace-only strings count
    Truthy,
}

impl Presence {
    fn is_present(self, body: &Value, field: &str) -> bool {
        match self {
            Presence::Trimmed => field_text(body, field).is_some(),
            Presence::Truthy => field_flag(body, field),
        }
    }
}

/// Required-field set and conditional rules for one kind of submission.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub required: &'static [&'static str],
    pub conditional: &'static [ConditionalRule],
    pub presence: Presence,
}

/// Outcome of validating a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Missing fields in rule order: required fields first, then conditional ones
    pub missing: Vec<String>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Business park values that need a free-text location alongside them.
pub const CUSTOM_LOCATION_SENTINELS: &[&str] = &["other", "private"];

/// Rules for the booking form.
pub const BOOKING_RULES: FieldRules = FieldRules {
    required: &[
        "service",
        "businessPark",
        "firstName",
        "lastName",
        "email",
        "phone",
        "vehicleMake",
        "vehicleModel",
        "vehicleYear",
        "vehicleColor",
        "preferredDate",
        "preferredTime",
    ],
    conditional: &[ConditionalRule {
        field: "businessPark",
        when_any_of: CUSTOM_LOCATION_SENTINELS,
        requires: "customBusinessPark",
    }],
    presence: Presence::Trimmed,
};

/// Rules for an availability query.
pub const AVAILABILITY_RULES: FieldRules = FieldRules {
    required: &["date", "time", "location"],
    conditional: &[],
    presence: Presence::Truthy,
};

impl FieldRules {
    /// Check a JSON body against these rules.
    ///
    /// A body that is not an object is treated as having no fields.
    pub fn validate(&self, body: &Value) -> Validation {
        let mut missing: Vec<String> = self
            .required
            .iter()
            .filter(|field| !self.presence.is_present(body, field))
            .map(|field| field.to_string())
            .collect();

        for rule in self.conditional {
            if rule.is_triggered(body)
                && !self.presence.is_present(body, rule.requires)
                && !missing.iter().any(|m| m == rule.requires)
            {
                missing.push(rule.requires.to_string());
            }
        }

        Validation { missing }
    }
}

/// Text of a form field, trimmed, or `None` when it is absent or blank.
///
/// Numbers count as present (a year may arrive as `2019`); `false` and `null`
/// count as absent.
pub fn field_text(body: &Value, field: &str) -> Option<String> {
    let text = match body.get(field)? {
        Value::Null | Value::Bool(false) => return None,
        Value::Bool(true) => "true".to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.is_empty() => return None,
        other => other.to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Whether a form field is truthy, e.g. a terms checkbox.
///
/// `null`, `false`, `0` and `""` are falsy; any other value, including a
/// whitespace-only string, is truthy.
pub fn field_flag(body: &Value, field: &str) -> bool {
    match body.get(field) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

//! Field predicates applied to listed documents.
//!
//! Every condition is skipped when its input is absent, so a query without
//! filter parameters keeps every document.

use super::models::Document;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    /// Case-insensitive substring match on a string field.
    Contains { field: String, needle: String },
    Equals { field: String, value: String },
    /// Inclusive bounds on a number, or a string holding one.
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(mut self, field: &str, needle: Option<&str>) -> Self {
        if let Some(needle) = non_empty(needle) {
            self.conditions.push(Condition::Contains {
                field: field.to_string(),
                needle: needle.to_lowercase(),
            });
        }
        self
    }

    /// Exact match. Numbers and booleans compare by value, so `"2021"`
    /// matches both `2021` and `"2021"`.
    pub fn equals(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = non_empty(value) {
            self.conditions.push(Condition::Equals {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
        self
    }

    pub fn range(mut self, field: &str, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.conditions.push(Condition::Range {
                field: field.to_string(),
                min,
                max,
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|condition| condition.matches(document))
    }

    /// Keep matching documents in their original order.
    pub fn apply(&self, documents: Vec<Document>) -> Vec<Document> {
        if self.is_empty() {
            return documents;
        }
        documents.into_iter().filter(|d| self.matches(d)).collect()
    }
}

impl Condition {
    fn matches(&self, document: &Document) -> bool {
        match self {
            Condition::Contains { field, needle } => document
                .field_str(field)
                .is_some_and(|value| value.to_lowercase().contains(needle)),
            Condition::Equals { field, value } => document
                .fields
                .get(field)
                .is_some_and(|actual| equals(actual, value)),
            Condition::Range { field, min, max } => document
                .fields
                .get(field)
                .and_then(as_number)
                .is_some_and(|n| min.is_none_or(|min| n >= min) && max.is_none_or(|max| n <= max)),
        }
    }
}

fn equals(actual: &Value, expected: &str) -> bool {
    match actual {
        Value::String(s) => s == expected,
        Value::Bool(b) => expected.parse::<bool>().is_ok_and(|e| e == *b),
        Value::Number(n) => match (n.as_f64(), expected.parse::<f64>()) {
            (Some(a), Ok(e)) => a == e,
            _ => false,
        },
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

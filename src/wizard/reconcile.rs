//! Field reconciliation — normalizes a loosely-keyed step payload into the
//! canonical persistence shape.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::model::{FieldKind, StepPayload, StepSchema};

/// A fully populated, canonically-keyed step payload.
///
/// Every field of the step's schema is present with a type-correct value;
/// keys use the persistence-facing (snake_case) names only. Produced by
/// [`StepSchema::reconcile`], which is a pure function of its input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledPayload {
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl ReconciledPayload {
    pub fn get(&self, canonical: &str) -> Option<&Value> {
        self.fields.get(canonical)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Stable serialized form: keys are emitted in sorted order, so equal
    /// payloads always produce equal strings. Used by the change emitter.
    pub fn canonical_string(&self) -> String {
        serde_json::to_string(&self.fields).unwrap_or_default()
    }

    /// The payload as a JSON object, ready for the persistence collaborator.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone().into_iter().collect())
    }

    /// Copy this payload's fields into an aggregate object.
    pub fn merge_into(&self, target: &mut serde_json::Map<String, Value>) {
        for (key, value) in &self.fields {
            target.insert(key.clone(), value.clone());
        }
    }
}

impl StepSchema {
    /// Reconcile a raw step payload into the canonical shape.
    ///
    /// Lookup order per field: canonical key, then alias key, then the
    /// kind's default. A present-but-null key counts as absent. Wrong-typed
    /// values degrade to the default; this never fails.
    pub fn reconcile(&self, raw: &StepPayload) -> ReconciledPayload {
        let mut fields = BTreeMap::new();
        for spec in &self.fields {
            let canonical = non_null(raw.get(spec.canonical.as_str()));
            let alias = spec
                .alias
                .as_deref()
                .and_then(|a| non_null(raw.get(a)));

            if let (Some(c), Some(a)) = (canonical, alias) {
                if c != a {
                    tracing::debug!(
                        field = %spec.canonical,
                        "canonical and alias keys disagree; canonical wins"
                    );
                }
            }

            // Canonical takes precedence over alias even when wrong-typed.
            let candidate = canonical.or(alias);
            fields.insert(spec.canonical.clone(), coerce(spec.kind, candidate));
        }
        ReconciledPayload { fields }
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn coerce(kind: FieldKind, value: Option<&Value>) -> Value {
    match kind {
        FieldKind::Text => value
            .and_then(Value::as_str)
            .map(|s| Value::String(s.to_string()))
            .unwrap_or_else(|| Value::String(String::new())),
        FieldKind::List => value
            .and_then(Value::as_array)
            .map(|items| {
                Value::Array(
                    items
                        .iter()
                        .filter(|item| item.is_string())
                        .cloned()
                        .collect(),
                )
            })
            .unwrap_or_else(|| Value::Array(Vec::new())),
        FieldKind::Flag => Value::Bool(value.and_then(Value::as_bool).unwrap_or(false)),
    }
}

//! Project progress: build steps, the manual test checklist, proof-of-work links and
//! the ship gate derived from all three.

pub mod handlers;
pub mod ship_gate;
pub mod steps;
pub mod submission;
pub mod test_checklist;

use std::collections::BTreeMap;

use serde_json::Value;

/// Item id → done. Always holds exactly the known ids.
pub type FlagState = BTreeMap<String, bool>;

/// Loose truthiness for stored flag values: `null`, `false`, `0`, `""` are false.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Projects an arbitrary stored value onto `ids`. Unknown keys are dropped and
/// anything that is not an object yields all-false.
pub(crate) fn normalize_flags<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    raw: Option<&Value>,
) -> FlagState {
    let obj = raw.and_then(Value::as_object);
    ids.into_iter()
        .map(|id| {
            let done = obj.and_then(|o| o.get(id)).is_some_and(truthy);
            (id.to_string(), done)
        })
        .collect()
}

pub(crate) fn count_done(state: &FlagState) -> usize {
    state.values().filter(|done| **done).count()
}

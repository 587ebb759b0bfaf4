//! Structural selection of dotted field paths out of a JSON object.
//!
//! Paths use plain property access only (`names.alias`). Paths missing from
//! the source are skipped; nothing else is copied.

use serde_json::{Map, Value};

/// Build a new object containing only `paths` from `source`.
pub fn select_paths<'a>(source: &Value, paths: impl IntoIterator<Item = &'a str>) -> Value {
    let mut selected = Map::new();
    for path in paths {
        let segments: Vec<&str> = path.split('.').collect();
        if let Some(found) = lookup(source, &segments) {
            insert(&mut selected, &segments, found.clone());
        }
    }
    Value::Object(selected)
}

fn lookup<'v>(value: &'v Value, segments: &[&str]) -> Option<&'v Value> {
    segments
        .iter()
        .try_fold(value, |current, segment| current.as_object()?.get(*segment))
}

fn insert(target: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut current = target;
    for segment in parents {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(next) = entry else {
            // a whole parent was already selected
            return;
        };
        current = next;
    }
    current.insert(last.to_string(), value);
}

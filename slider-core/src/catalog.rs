use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

/// Decorative images a tile may carry. The identifier of a background is
/// its file name.
const BACKGROUND_FILES: [&str; 7] = [
    "cars.png",
    "cup.png",
    "ferris wheel.jpg",
    "gear.png",
    "queue.png",
    "roller.jpg",
    "roller_right.png",
];

/// One selectable tile background.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Background {
    pub id: String,
    pub label: String,
}

static CATALOG: LazyLock<Vec<Background>> = LazyLock::new(|| {
    BACKGROUND_FILES
        .iter()
        .map(|file| Background {
            id: file.to_string(),
            label: format_label(file),
        })
        .collect()
});

/// The fixed catalog in declaration order.
pub fn list_backgrounds() -> &'static [Background] {
    &CATALOG
}

pub fn is_known_background(id: &str) -> bool {
    BACKGROUND_FILES.contains(&id)
}

/// Human label for a file name: `"roller_right.png"` becomes `"Roller Right"`.
pub fn format_label(filename: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(dot) if dot + 1 < filename.len() => &filename[..dot],
        _ => filename,
    };
    stem.split(|c: char| c == ' ' || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Returns `value` when it names a catalog entry, otherwise the empty string.
pub fn normalize_background(value: &Value) -> String {
    match value {
        Value::String(s) => normalize_background_name(s),
        _ => String::new(),
    }
}

pub fn normalize_background_name(name: &str) -> String {
    if is_known_background(name) {
        name.to_string()
    } else {
        String::new()
    }
}

/// Coerce loosely typed input into exactly `expected_len` catalog entries.
///
/// Anything that is not a list of the right length becomes all-empty;
/// otherwise each entry is normalized on its own.
pub fn sanitize_backgrounds(values: &Value, expected_len: usize) -> Vec<String> {
    match values {
        Value::Array(items) if items.len() == expected_len => {
            items.iter().map(normalize_background).collect()
        }
        _ => vec![String::new(); expected_len],
    }
}

/// Typed counterpart of [`sanitize_backgrounds`] for callers that already hold
/// strings.
pub fn sanitize_background_names<S: AsRef<str>>(values: &[S], expected_len: usize) -> Vec<String> {
    if values.len() != expected_len {
        return vec![String::new(); expected_len];
    }
    values
        .iter()
        .map(|v| normalize_background_name(v.as_ref()))
        .collect()
}

/// True when any tile carries a background.
pub fn has_any<S: AsRef<str>>(values: &[S]) -> bool {
    values.iter().any(|v| !v.as_ref().is_empty())
}

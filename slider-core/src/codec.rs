use std::collections::HashSet;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Serialize;
use serde_json::{Value, json};

use crate::catalog::{has_any, normalize_background, sanitize_background_names};
use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::engine::{check_tiles, sequence_layout};
use crate::error::DecodeError;

/// A board as it travels between the generator and the player.
///
/// `backgrounds` is `None` whenever no tile is decorated; an all-empty list is
/// never produced by this module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PuzzleConfig {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backgrounds: Option<Vec<String>>,
}

impl PuzzleConfig {
    pub fn new(width: usize, height: usize, tiles: Vec<u32>) -> Self {
        Self {
            width,
            height,
            tiles,
            backgrounds: None,
        }
    }

    pub fn with_backgrounds(mut self, backgrounds: Vec<String>) -> Self {
        self.backgrounds = Some(backgrounds);
        self
    }

    pub fn tile_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for PuzzleConfig {
    /// The solved 4x4 board the player shows when no link is given.
    fn default() -> Self {
        Self::new(
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            sequence_layout(DEFAULT_WIDTH, DEFAULT_HEIGHT),
        )
    }
}

// Standard alphabet, accepting missing padding and non-zero trailing bits,
// for payloads after the URL-safe substitution is undone.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Serialize `config` to the `{w,h,t,b?}` record and wrap it in unpadded
/// URL-safe base64. Tiles are written as given.
pub fn encode(config: &PuzzleConfig) -> String {
    let mut record = json!({
        "w": config.width,
        "h": config.height,
        "t": config.tiles,
    });
    if let Some(backgrounds) = &config.backgrounds {
        let backgrounds = sanitize_background_names(backgrounds, config.tile_count());
        if has_any(&backgrounds) {
            record["b"] = json!(backgrounds);
        }
    }
    URL_SAFE_NO_PAD.encode(record.to_string())
}

/// Parse a link payload, rejecting anything that is not a consistent board.
///
/// Tiles only need to be distinct and include the blank; use
/// [`decode_strict`] to also require the exact range `1..N-1`.
pub fn decode(payload: &str) -> Result<PuzzleConfig, DecodeError> {
    let bytes = restore_base64(payload)?;
    let record: Value = serde_json::from_slice(&bytes)
        .map_err(|e| DecodeError::MalformedPayload(e.to_string()))?;
    if record.is_null() {
        return Err(DecodeError::MalformedPayload("payload is null".into()));
    }

    let width = record.get("w").and_then(dimension).ok_or(DecodeError::InvalidDimensions)?;
    let height = record.get("h").and_then(dimension).ok_or(DecodeError::InvalidDimensions)?;
    let expected = width
        .checked_mul(height)
        .ok_or(DecodeError::InvalidDimensions)?;

    let tiles = match record.get("t") {
        Some(Value::Array(items)) if items.len() == expected => items,
        _ => return Err(DecodeError::TileCountMismatch),
    };
    let tiles: Vec<u32> = tiles
        .iter()
        .map(coerce_tile)
        .collect::<Option<_>>()
        .ok_or(DecodeError::InvalidPermutation)?;
    let distinct: HashSet<u32> = tiles.iter().copied().collect();
    if distinct.len() != expected || !distinct.contains(&0) {
        return Err(DecodeError::InvalidPermutation);
    }

    let backgrounds = match record.get("b") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) if items.len() == expected => {
            let normalized: Vec<String> = items.iter().map(normalize_background).collect();
            has_any(&normalized).then_some(normalized)
        }
        Some(_) => return Err(DecodeError::BackgroundCountMismatch),
    };

    Ok(PuzzleConfig {
        width,
        height,
        tiles,
        backgrounds,
    })
}

/// [`decode`], additionally rejecting tile sets with gaps such as `[0, 1, 5]`.
pub fn decode_strict(payload: &str) -> Result<PuzzleConfig, DecodeError> {
    let config = decode(payload)?;
    check_tiles(&config.tiles, config.width, config.height)
        .map_err(|_| DecodeError::InvalidPermutation)?;
    Ok(config)
}

fn restore_base64(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let mut standard: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    while standard.len() % 4 != 0 {
        standard.push('=');
    }
    LENIENT_STANDARD
        .decode(standard)
        .map_err(|e| DecodeError::MalformedPayload(e.to_string()))
}

/// Integral JSON numbers, including ones written as `4.0`.
fn integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    integral(value.as_f64()?)
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

fn dimension(value: &Value) -> Option<usize> {
    integer(value)
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
}

/// Numeric coercion of a tile entry: numbers, numeric strings (blank text is
/// the blank tile), booleans and null. Anything else, or a value that is not
/// a non-negative integer, is rejected.
fn coerce_tile(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(_) => integer(value)?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0
            } else {
                integral(s.parse().ok()?)?
            }
        }
        Value::Bool(b) => i64::from(*b),
        Value::Null => 0,
        Value::Array(_) | Value::Object(_) => return None,
    };
    u32::try_from(n).ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn wrap(record: &str) -> String {
        URL_SAFE_NO_PAD.encode(record)
    }

    #[test]
    fn encodes_compact_record() {
        let config = PuzzleConfig::new(2, 2, vec![1, 2, 3, 0]);
        let payload = encode(&config);
        assert_eq!(payload, wrap(r#"{"w":2,"h":2,"t":[1,2,3,0]}"#));
        assert!(!payload.contains(&['+', '/', '='][..]));
    }

    #[test]
    fn all_empty_backgrounds_are_dropped() {
        let config = PuzzleConfig::new(2, 2, vec![1, 2, 3, 0])
            .with_backgrounds(vec!["".into(), "bogus.png".into(), "".into(), "".into()]);
        let payload = encode(&config);
        assert_eq!(payload, wrap(r#"{"w":2,"h":2,"t":[1,2,3,0]}"#));
        assert_eq!(decode(&payload).unwrap().backgrounds, None);
    }

    #[test]
    fn backgrounds_round_trip() {
        let backgrounds: Vec<String> = ["cup.png", "", "gear.png", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let config = PuzzleConfig::new(2, 2, vec![3, 1, 2, 0]).with_backgrounds(backgrounds);
        assert_eq!(decode(&encode(&config)), Ok(config));
    }

    #[test]
    fn wrong_length_backgrounds_are_not_encoded() {
        let config =
            PuzzleConfig::new(2, 2, vec![1, 2, 3, 0]).with_backgrounds(vec!["cup.png".into()]);
        assert_eq!(decode(&encode(&config)).unwrap().backgrounds, None);
    }

    #[test]
    fn accepts_padded_and_standard_alphabet() {
        let text = r#"{"w":2,"h":2,"t":[1,2,3,0]}"#;
        let padded = base64::engine::general_purpose::STANDARD.encode(text);
        assert_eq!(decode(&padded).unwrap().tiles, [1, 2, 3, 0]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(decode("!!!"), Err(DecodeError::MalformedPayload(_))));
        assert!(matches!(decode("A"), Err(DecodeError::MalformedPayload(_))));
        assert!(matches!(
            decode(&wrap("not json")),
            Err(DecodeError::MalformedPayload(_))
        ));
        assert!(matches!(
            decode(&wrap("null")),
            Err(DecodeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn rejects_bad_dimensions() {
        for record in [
            r#"{"h":2,"t":[1,2,3,0]}"#,
            r#"{"w":"2","h":2,"t":[1,2,3,0]}"#,
            r#"{"w":2.5,"h":2,"t":[1,2,3,0]}"#,
            r#"{"w":0,"h":2,"t":[]}"#,
            r#"{"w":-2,"h":-2,"t":[1,2,3,0]}"#,
            "[2,2]",
        ] {
            assert_eq!(decode(&wrap(record)), Err(DecodeError::InvalidDimensions), "{record}");
        }
        assert_eq!(decode(&wrap(r#"{"w":2.0,"h":2,"t":[1,2,3,0]}"#)).unwrap().width, 2);
    }

    #[test]
    fn rejects_tile_count_mismatch() {
        for record in [
            r#"{"w":2,"h":2,"t":[1,2,0]}"#,
            r#"{"w":2,"h":2,"t":[1,2,3,0,4]}"#,
            r#"{"w":2,"h":2,"t":"1230"}"#,
            r#"{"w":2,"h":2}"#,
        ] {
            assert_eq!(decode(&wrap(record)), Err(DecodeError::TileCountMismatch), "{record}");
        }
    }

    #[test]
    fn rejects_duplicates_and_missing_blank() {
        for record in [
            r#"{"w":2,"h":2,"t":[1,2,3,1]}"#,
            r#"{"w":2,"h":2,"t":[1,2,3,4]}"#,
            r#"{"w":2,"h":2,"t":[0,0,1,2]}"#,
            r#"{"w":2,"h":2,"t":[1,2,3,-1]}"#,
            r#"{"w":2,"h":2,"t":[1,2,[3],0]}"#,
        ] {
            assert_eq!(decode(&wrap(record)), Err(DecodeError::InvalidPermutation), "{record}");
        }
    }

    #[test]
    fn coerces_numeric_strings() {
        let config = decode(&wrap(r#"{"w":2,"h":2,"t":["1"," 2",3,""]}"#)).unwrap();
        assert_eq!(config.tiles, [1, 2, 3, 0]);
    }

    #[test]
    fn lax_decode_allows_gaps_but_strict_does_not() {
        let payload = wrap(r#"{"w":2,"h":2,"t":[1,2,7,0]}"#);
        assert_eq!(decode(&payload).unwrap().tiles, [1, 2, 7, 0]);
        assert_eq!(decode_strict(&payload), Err(DecodeError::InvalidPermutation));
        assert!(decode_strict(&encode(&PuzzleConfig::default())).is_ok());
    }

    #[test]
    fn rejects_bad_backgrounds() {
        for record in [
            r#"{"w":2,"h":2,"t":[1,2,3,0],"b":["cup.png"]}"#,
            r#"{"w":2,"h":2,"t":[1,2,3,0],"b":"cup.png"}"#,
        ] {
            assert_eq!(
                decode(&wrap(record)),
                Err(DecodeError::BackgroundCountMismatch),
                "{record}"
            );
        }
        let config = decode(&wrap(r#"{"w":2,"h":2,"t":[1,2,3,0],"b":null}"#)).unwrap();
        assert_eq!(config.backgrounds, None);
    }

    #[test]
    fn unknown_backgrounds_decode_to_empty() {
        let config =
            decode(&wrap(r#"{"w":2,"h":2,"t":[1,2,3,0],"b":["x",3,"cup.png",""]}"#)).unwrap();
        assert_eq!(
            config.backgrounds,
            Some(vec!["".into(), "".into(), "cup.png".into(), "".into()])
        );
    }
}

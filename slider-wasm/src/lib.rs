use serde_json::Value;
use slider_core::generator::{Autofill, autofill_cells, build_share, clamp_dimension};
use slider_core::link::{parent_href, puzzle_from_search};
use slider_core::{PuzzleConfig, catalog};
use wasm_bindgen::prelude::*;

mod game;
mod models;
mod utils;

pub use game::Game;

use crate::models::{EncodeRequest, MoveResult, ShareResult};
use crate::utils::{
    asset_url, browser_rng, from_json, init_logging, location_href, location_search, log, to_json,
};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_logging();
    log("slider puzzle ready");
    Ok(())
}

// Generator page

#[wasm_bindgen(js_name = sequenceLayout)]
pub fn sequence_layout(width: usize, height: usize) -> Vec<u32> {
    slider_core::sequence_layout(width, height)
}

#[wasm_bindgen(js_name = randomSolvableLayout)]
pub fn random_solvable_layout(width: usize, height: usize) -> Result<Vec<u32>, JsError> {
    Ok(slider_core::random_solvable_layout(
        width,
        height,
        &mut browser_rng(),
    )?)
}

/// Parse the editor cells; the error message is meant for the author.
#[wasm_bindgen(js_name = validatePermutation)]
pub fn validate_permutation(
    cells: Vec<String>,
    width: usize,
    height: usize,
) -> Result<Vec<u32>, JsError> {
    Ok(slider_core::validate_permutation(&cells[..], width, height)?)
}

/// Takes `{ width, height, tiles, backgrounds? }`.
#[wasm_bindgen(js_name = encodePuzzle)]
pub fn encode_puzzle(puzzle: JsValue) -> Result<String, JsError> {
    let request: EncodeRequest = serde_json::from_value(to_json(&puzzle))?;
    Ok(slider_core::encode(&PuzzleConfig::from(request)))
}

#[wasm_bindgen(js_name = listBackgrounds)]
pub fn list_backgrounds() -> Result<JsValue, JsError> {
    from_json(catalog::list_backgrounds())
}

#[wasm_bindgen(js_name = normalizeBackground)]
pub fn normalize_background(value: JsValue) -> String {
    catalog::normalize_background(&to_json(&value))
}

#[wasm_bindgen(js_name = sanitizeBackgrounds)]
pub fn sanitize_backgrounds(values: JsValue, expected_length: usize) -> Vec<String> {
    catalog::sanitize_backgrounds(&to_json(&values), expected_length)
}

#[wasm_bindgen(js_name = clampDimension)]
pub fn clamp_dimension_js(input: &str) -> usize {
    clamp_dimension(input)
}

/// Cells for the editor grid; `mode` is `"sequence"`, `"random"` or `"clear"`.
#[wasm_bindgen(js_name = autofillCells)]
pub fn autofill_cells_js(mode: &str, width: usize, height: usize) -> Result<Vec<String>, JsError> {
    Ok(autofill_cells(
        Autofill::from_name(mode),
        width,
        height,
        &mut browser_rng(),
    )?)
}

/// Player link for an already encoded payload.
#[wasm_bindgen(js_name = shareLink)]
pub fn share_link(payload: &str) -> String {
    slider_core::link::share_link(&player_base(), payload)
}

/// Validate the editor grid and return `{ payload, url }`.
#[wasm_bindgen(js_name = buildShare)]
pub fn build_share_js(
    cells: Vec<String>,
    width: usize,
    height: usize,
    backgrounds: JsValue,
) -> Result<JsValue, JsError> {
    let backgrounds: Option<Vec<String>> = match to_json(&backgrounds) {
        Value::Null => None,
        other => Some(catalog::sanitize_backgrounds(&other, width * height)),
    };
    let share = build_share(
        &cells[..],
        width,
        height,
        backgrounds.as_deref(),
        &player_base(),
    )?;
    from_json(&ShareResult {
        payload: share.payload,
        url: share.url,
    })
}

/// The board in the page's own `?p=`, or `null`.
#[wasm_bindgen(js_name = readPuzzleFromLocation)]
pub fn read_puzzle_from_location() -> Result<JsValue, JsError> {
    match location_search().and_then(|search| puzzle_from_search(&search)) {
        Some(config) => from_json(&config),
        None => Ok(JsValue::NULL),
    }
}

fn player_base() -> String {
    parent_href(&location_href().unwrap_or_default())
}

// Player page

/// Decode a payload into `{ width, height, tiles, backgrounds? }`.
#[wasm_bindgen(js_name = decodePuzzle)]
pub fn decode_puzzle(payload: &str) -> Result<JsValue, JsError> {
    let config = slider_core::decode(payload)?;
    from_json(&config)
}

#[wasm_bindgen(js_name = isAdjacent)]
pub fn is_adjacent(index_a: usize, index_b: usize, width: usize) -> bool {
    slider_core::is_adjacent(index_a, index_b, width)
}

/// Returns `{ tiles, moved }`; the input array is left untouched.
#[wasm_bindgen(js_name = applyMove)]
pub fn apply_move(tiles: Vec<u32>, target_index: usize, width: usize) -> Result<JsValue, JsError> {
    let step = slider_core::apply_move(&tiles, target_index, width);
    from_json(&MoveResult {
        tiles: step.tiles,
        moved: step.moved,
    })
}

#[wasm_bindgen(js_name = isSolved)]
pub fn is_solved(tiles: Vec<u32>) -> bool {
    slider_core::is_solved(&tiles)
}

/// URL of a catalog background image, or `undefined` for unknown ids.
#[wasm_bindgen(js_name = backgroundUrl)]
pub fn background_url(id: &str) -> Option<String> {
    catalog::is_known_background(id).then(|| asset_url(&format!("tiles/{id}")))
}

#[wasm_bindgen(js_name = formatTime)]
pub fn format_time(seconds: u32) -> String {
    slider_core::session::format_time(seconds)
}

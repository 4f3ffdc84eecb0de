//! Helpers behind the puzzle author's editor grid.

use rand::Rng;

use crate::catalog::sanitize_background_names;
use crate::codec::{PuzzleConfig, encode};
use crate::config::{MAX_DIMENSION, MIN_DIMENSION};
use crate::engine::{random_solvable_layout, sequence_layout, validate_permutation};
use crate::error::{GenerationError, ValidationError};
use crate::link::share_link;

/// Clamp a typed board dimension into the supported range.
pub fn clamp_dimension(input: &str) -> usize {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.clamp(MIN_DIMENSION as f64, MAX_DIMENSION as f64) as usize,
        Ok(v) if v == f64::INFINITY => MAX_DIMENSION,
        _ => MIN_DIMENSION,
    }
}

/// How "apply" fills the editor grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Autofill {
    #[default]
    Sequence,
    Random,
    Clear,
}

impl Autofill {
    pub fn from_name(name: &str) -> Self {
        match name {
            "random" => Self::Random,
            "clear" => Self::Clear,
            _ => Self::Sequence,
        }
    }
}

/// Editor text for a layout; the blank shows as an empty cell.
pub fn tiles_to_cells(tiles: &[u32]) -> Vec<String> {
    tiles
        .iter()
        .map(|&t| if t == 0 { String::new() } else { t.to_string() })
        .collect()
}

pub fn autofill_cells<R: Rng + ?Sized>(
    mode: Autofill,
    width: usize,
    height: usize,
    rng: &mut R,
) -> Result<Vec<String>, GenerationError> {
    Ok(match mode {
        Autofill::Sequence => tiles_to_cells(&sequence_layout(width, height)),
        Autofill::Random => tiles_to_cells(&random_solvable_layout(width, height, rng)?),
        Autofill::Clear => vec![String::new(); width * height],
    })
}

/// A link ready to hand out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share {
    pub payload: String,
    pub url: String,
}

/// Validate the editor grid and produce its link.
pub fn build_share<S: AsRef<str>>(
    cells: &[S],
    width: usize,
    height: usize,
    backgrounds: Option<&[String]>,
    base_href: &str,
) -> Result<Share, ValidationError> {
    let tiles = validate_permutation(cells, width, height)?;
    let mut config = PuzzleConfig::new(width, height, tiles);
    if let Some(backgrounds) = backgrounds {
        config = config.with_backgrounds(sanitize_background_names(backgrounds, width * height));
    }
    let payload = encode(&config);
    let url = share_link(base_href, &payload);
    Ok(Share { payload, url })
}

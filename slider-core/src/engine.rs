use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::MAX_SHUFFLE_ATTEMPTS;
use crate::error::{GenerationError, ValidationError};

/// Solved arrangement: `1..N-1` in row-major order with the blank last.
pub fn sequence_layout(width: usize, height: usize) -> Vec<u32> {
    let total = width * height;
    if total == 0 {
        return Vec::new();
    }
    (1..total as u32).chain(std::iter::once(0)).collect()
}

/// Parse editor cells. A cell that is empty after trimming is the blank.
///
/// The whole cell must be an integer, so `"3a"` and `"3.0"` are rejected
/// rather than read as 3 the way a prefix parse would.
pub fn parse_cells<S: AsRef<str>>(cells: &[S]) -> Result<Vec<i64>, ValidationError> {
    cells
        .iter()
        .map(|cell| {
            let trimmed = cell.as_ref().trim();
            if trimmed.is_empty() {
                Ok(0)
            } else {
                trimmed
                    .parse::<i64>()
                    .map_err(|_| ValidationError::NonNumeric)
            }
        })
        .collect()
}

/// Check user-entered cells and return the tiles they describe.
pub fn validate_permutation<S: AsRef<str>>(
    cells: &[S],
    width: usize,
    height: usize,
) -> Result<Vec<u32>, ValidationError> {
    if cells.len() != width * height {
        return Err(ValidationError::NotReady);
    }
    let values = parse_cells(cells)?;
    check_values(&values)?;
    // Every value is now within 0..N, so the narrowing is lossless.
    Ok(values.into_iter().map(|v| v as u32).collect())
}

/// The same rules as [`validate_permutation`] over already numeric tiles.
pub fn check_tiles(tiles: &[u32], width: usize, height: usize) -> Result<(), ValidationError> {
    if tiles.len() != width * height {
        return Err(ValidationError::NotReady);
    }
    let values: Vec<i64> = tiles.iter().map(|&t| i64::from(t)).collect();
    check_values(&values)
}

fn check_values(values: &[i64]) -> Result<(), ValidationError> {
    let blanks = values.iter().filter(|&&v| v == 0).count();
    if blanks != 1 {
        return Err(ValidationError::BlankCountError);
    }
    let mut provided: Vec<i64> = values.iter().copied().filter(|&v| v != 0).collect();
    provided.sort_unstable();
    let complete = provided
        .iter()
        .enumerate()
        .all(|(i, &v)| v == i as i64 + 1);
    if complete {
        Ok(())
    } else {
        Err(ValidationError::IncompleteRange)
    }
}

pub fn blank_index(tiles: &[u32]) -> Option<usize> {
    tiles.iter().position(|&t| t == 0)
}

/// Out-of-order pairs among the non-blank tiles, read in row-major order.
pub fn inversions(tiles: &[u32]) -> usize {
    let values: Vec<u32> = tiles.iter().copied().filter(|&t| t != 0).collect();
    let mut count = 0;
    for (i, &a) in values.iter().enumerate() {
        count += values[i + 1..].iter().filter(|&&b| a > b).count();
    }
    count
}

/// 15-puzzle parity rule. For even widths the blank's row is counted from
/// the bottom, starting at 1.
pub fn is_solvable(tiles: &[u32], width: usize, height: usize) -> bool {
    if width == 0 {
        return false;
    }
    let inversions = inversions(tiles);
    if width % 2 != 0 {
        return inversions % 2 == 0;
    }
    let Some(blank) = blank_index(tiles) else {
        return false;
    };
    let empty_row_from_bottom = height as isize - (blank / width) as isize;
    if empty_row_from_bottom % 2 == 0 {
        inversions % 2 == 1
    } else {
        inversions % 2 == 0
    }
}

/// Shuffle `0..N` until the result is solvable.
///
/// Roughly half of all permutations qualify, so the attempt cap is only hit
/// by a broken random source.
pub fn random_solvable_layout<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    rng: &mut R,
) -> Result<Vec<u32>, GenerationError> {
    let total = (width * height) as u32;
    let mut candidate: Vec<u32> = (0..total).collect();
    for attempt in 1..=MAX_SHUFFLE_ATTEMPTS {
        candidate.shuffle(rng);
        if is_solvable(&candidate, width, height) {
            log::trace!("solvable {width}x{height} layout after {attempt} shuffle(s)");
            return Ok(candidate);
        }
    }
    log::debug!("gave up on a {width}x{height} layout after {MAX_SHUFFLE_ATTEMPTS} shuffles");
    Err(GenerationError::GenerationExhausted {
        attempts: MAX_SHUFFLE_ATTEMPTS,
    })
}

/// Manhattan distance of exactly one, so the last cell of a row is never a
/// neighbour of the first cell of the next.
pub fn is_adjacent(a: usize, b: usize, width: usize) -> bool {
    if width == 0 {
        return false;
    }
    let (row_a, col_a) = (a / width, a % width);
    let (row_b, col_b) = (b / width, b % width);
    row_a.abs_diff(row_b) + col_a.abs_diff(col_b) == 1
}

/// Outcome of [`apply_move`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub tiles: Vec<u32>,
    pub moved: bool,
}

/// Slide the tile at `target` into the blank if they touch.
pub fn apply_move(tiles: &[u32], target: usize, width: usize) -> Move {
    let unchanged = || Move {
        tiles: tiles.to_vec(),
        moved: false,
    };
    let Some(blank) = blank_index(tiles) else {
        return unchanged();
    };
    if target >= tiles.len() || !is_adjacent(target, blank, width) {
        return unchanged();
    }
    let mut next = tiles.to_vec();
    next.swap(target, blank);
    Move {
        tiles: next,
        moved: true,
    }
}

pub fn is_solved(tiles: &[u32]) -> bool {
    let Some((last, rest)) = tiles.split_last() else {
        return false;
    };
    *last == 0 && rest.iter().enumerate().all(|(i, &t)| t as usize == i + 1)
}

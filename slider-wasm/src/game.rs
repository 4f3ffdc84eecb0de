use slider_core::link::{puzzle_from_payload, puzzle_from_search};
use slider_core::{PuzzleConfig, Session};
use wasm_bindgen::prelude::*;

use crate::utils::location_search;

/// The player's board. JS owns the instance and drives the clock by calling
/// `tick` once a second while `running` is true.
#[wasm_bindgen]
pub struct Game {
    session: Session,
}

#[wasm_bindgen]
impl Game {
    /// Start from an encoded payload, or from the default board when the
    /// payload is missing or broken.
    #[wasm_bindgen(constructor)]
    pub fn new(payload: Option<String>) -> Game {
        let config = payload
            .as_deref()
            .and_then(puzzle_from_payload)
            .unwrap_or_default();
        Game {
            session: Session::new(config),
        }
    }

    /// Board described by the page's `?p=` parameter.
    #[wasm_bindgen(js_name = fromLocation)]
    pub fn from_location() -> Game {
        let config = location_search()
            .and_then(|search| puzzle_from_search(&search))
            .unwrap_or_else(PuzzleConfig::default);
        Game {
            session: Session::new(config),
        }
    }

    /// Slide the tile at `index`; false if it cannot move.
    pub fn play(&mut self, index: usize) -> bool {
        match self.session.play(index) {
            Some(next) => {
                self.session = next;
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self) {
        self.session = self.session.tick();
    }

    pub fn restart(&mut self) {
        self.session = self.session.restart();
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.session.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.session.height()
    }

    #[wasm_bindgen(getter)]
    pub fn tiles(&self) -> Vec<u32> {
        self.session.tiles().to_vec()
    }

    /// Per-cell backgrounds; empty when the board has none.
    #[wasm_bindgen(getter)]
    pub fn backgrounds(&self) -> Vec<String> {
        self.session.backgrounds().map(<[String]>::to_vec).unwrap_or_default()
    }

    #[wasm_bindgen(getter)]
    pub fn moves(&self) -> u32 {
        self.session.moves()
    }

    #[wasm_bindgen(getter)]
    pub fn seconds(&self) -> u32 {
        self.session.seconds()
    }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> String {
        self.session.elapsed()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.session.is_running()
    }

    #[wasm_bindgen(getter)]
    pub fn solved(&self) -> bool {
        self.session.is_solved()
    }

    #[wasm_bindgen(getter, js_name = sizeLabel)]
    pub fn size_label(&self) -> String {
        self.session.board_size_label()
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> Option<String> {
        self.session.win_message()
    }
}

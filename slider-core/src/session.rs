use crate::codec::PuzzleConfig;
use crate::engine::{apply_move, is_solved};

/// One player's run at a board.
///
/// Transitions return a new session; the value a caller holds never changes
/// underneath it. The seconds counter is advanced by the caller's own
/// one-second tick. Once solved, the board is frozen: further moves are
/// rejected until `restart`, instead of restarting the clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    width: usize,
    height: usize,
    initial: Vec<u32>,
    tiles: Vec<u32>,
    backgrounds: Option<Vec<String>>,
    moves: u32,
    seconds: u32,
    running: bool,
    solved: bool,
}

impl Session {
    pub fn new(config: PuzzleConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            initial: config.tiles.clone(),
            tiles: config.tiles,
            backgrounds: config.backgrounds,
            moves: 0,
            seconds: 0,
            running: false,
            solved: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Decorations carried by the link, one per starting cell.
    pub fn backgrounds(&self) -> Option<&[String]> {
        self.backgrounds.as_deref()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Slide the tile at `index`. `None` if the move is not allowed.
    pub fn play(&self, index: usize) -> Option<Self> {
        if self.solved {
            return None;
        }
        let step = apply_move(&self.tiles, index, self.width);
        if !step.moved {
            return None;
        }
        let solved = is_solved(&step.tiles);
        Some(Self {
            tiles: step.tiles,
            moves: self.moves + 1,
            running: !solved,
            solved,
            ..self.clone()
        })
    }

    pub fn tick(&self) -> Self {
        let mut next = self.clone();
        if next.running {
            next.seconds += 1;
        }
        next
    }

    /// Back to the starting arrangement with counters cleared.
    pub fn restart(&self) -> Self {
        Self {
            tiles: self.initial.clone(),
            moves: 0,
            seconds: 0,
            running: false,
            solved: false,
            ..self.clone()
        }
    }

    pub fn elapsed(&self) -> String {
        format_time(self.seconds)
    }

    pub fn board_size_label(&self) -> String {
        format!("{} × {}", self.width, self.height)
    }

    pub fn win_message(&self) -> Option<String> {
        self.solved.then(|| {
            format!(
                "Done! You solved the board in {} moves and {}.",
                self.moves,
                self.elapsed()
            )
        })
    }
}

/// `MM:SS`, minutes padded to two digits.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn nearly_solved() -> Session {
        Session::new(PuzzleConfig::new(2, 2, vec![1, 2, 0, 3]))
    }

    #[test]
    fn rejected_moves_leave_no_trace() {
        let session = nearly_solved();
        assert_eq!(session.play(1), None);
        assert_eq!(session.play(2), None);
        assert!(!session.tick().is_running());
        assert_eq!(session.tick().seconds(), 0);
    }

    #[test]
    fn first_move_starts_the_clock() {
        let session = nearly_solved().play(0).unwrap();
        assert_eq!(session.tiles(), [0, 2, 1, 3]);
        assert!(session.is_running());
        let session = session.tick().tick();
        assert_eq!(session.seconds(), 2);
        assert_eq!(session.moves(), 1);
    }

    #[test]
    fn solving_stops_the_clock() {
        let session = nearly_solved().tick().play(3).unwrap();
        assert!(session.is_solved());
        assert!(!session.is_running());
        assert_eq!(session.tick().seconds(), 0);
        assert_eq!(session.play(2), None);
        assert_eq!(
            session.win_message().as_deref(),
            Some("Done! You solved the board in 1 moves and 00:00.")
        );
    }

    #[test]
    fn restart_restores_the_start() {
        let start = nearly_solved();
        let played = start.play(0).unwrap().tick();
        let restarted = played.restart();
        assert_eq!(restarted, start);
        assert_eq!(played.moves(), 1);
    }

    #[test]
    fn formats_time_and_size() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(6000), "100:00");
        assert_eq!(nearly_solved().board_size_label(), "2 × 2");
        assert_eq!(nearly_solved().win_message(), None);
    }
}

use std::fmt;

use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    White,
    Draw,
    Black,
}

impl Outcome {
    /// Chart order: white wins, draws, black wins.
    pub const ALL: [Outcome; 3] = [Outcome::White, Outcome::Draw, Outcome::Black];

    /// Position in [`Outcome::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::White => "white",
            Outcome::Draw => "draw",
            Outcome::Black => "black",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::White => "White",
            Outcome::Draw => "Draw",
            Outcome::Black => "Black",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the games CSV. Columns other than these three are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    pub winner: Outcome,
    pub opening_name: String,
}

impl GameRecord {
    #[cfg(test)]
    pub fn new(game_id: impl Into<String>, winner: Outcome, opening_name: impl Into<String>) -> Self {
        Self { game_id: game_id.into(), winner, opening_name: opening_name.into() }
    }
}

/// All games of one run, in file order. Never mutated after loading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    games: Vec<GameRecord>,
}

impl Dataset {
    pub fn new(games: Vec<GameRecord>) -> Self {
        Self { games }
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub games: u64,
    pub white_wins: u64,
    pub black_wins: u64,
    pub draws: u64,
}

impl OutcomeTally {
    pub fn add(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::White => self.white_wins += 1,
            Outcome::Black => self.black_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn get(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::White => self.white_wins,
            Outcome::Black => self.black_wins,
            Outcome::Draw => self.draws,
        }
    }
}

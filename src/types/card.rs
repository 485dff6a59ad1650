//! 5Five cricket card deck
//!
//! Every delivery is decided by a drawn card with a fixed run value.

use serde::{Deserialize, Serialize};

/// Run value recorded for a wicket ball
pub const WICKET_RUNS: i32 = -1;

/// A card from the 5Five cricket deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    /// Ace - 1 run
    Ace,
    Two,
    Three,
    /// 4 - boundary
    Four,
    /// 6 - six
    Six,
    /// 10 - dot ball
    Ten,
    /// King - wicket
    King,
}

impl Card {
    /// Runs scored by this card (`-1` for the wicket card)
    pub fn runs(self) -> i32 {
        match self {
            Card::Ace => 1,
            Card::Two => 2,
            Card::Three => 3,
            Card::Four => 4,
            Card::Six => 6,
            Card::Ten => 0,
            Card::King => WICKET_RUNS,
        }
    }

    /// Card that produced the given run value, if any
    pub fn from_runs(runs: i32) -> Option<Self> {
        match runs {
            1 => Some(Card::Ace),
            2 => Some(Card::Two),
            3 => Some(Card::Three),
            4 => Some(Card::Four),
            6 => Some(Card::Six),
            0 => Some(Card::Ten),
            WICKET_RUNS => Some(Card::King),
            _ => None,
        }
    }

    /// Parse a card label (`A`, `2`, `3`, `4`, `6`, `10`, `K`)
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Card::Ace),
            "2" => Some(Card::Two),
            "3" => Some(Card::Three),
            "4" => Some(Card::Four),
            "6" => Some(Card::Six),
            "10" => Some(Card::Ten),
            "K" => Some(Card::King),
            _ => None,
        }
    }

    /// Label as printed on the card image
    pub fn label(self) -> &'static str {
        match self {
            Card::Ace => "A",
            Card::Two => "2",
            Card::Three => "3",
            Card::Four => "4",
            Card::Six => "6",
            Card::Ten => "10",
            Card::King => "K",
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse a scoreboard runs display into a numeric run value.
///
/// Wicket markers (`W`, `ww`, `K`) map to [`WICKET_RUNS`].
pub fn parse_runs_display(display: &str) -> Option<i32> {
    let trimmed = display.trim();
    if trimmed.eq_ignore_ascii_case("w")
        || trimmed.eq_ignore_ascii_case("ww")
        || trimmed.eq_ignore_ascii_case("k")
    {
        return Some(WICKET_RUNS);
    }
    trimmed.parse::<i32>().ok()
}

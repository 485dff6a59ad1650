//! Which detections a ball triggers

use crate::types::{MatchStatus, BALLS_PER_OVER};

/// Detections requested by a single ball. All three are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triggers {
    /// Over that this ball completed
    pub over: Option<u32>,
    pub innings: bool,
    pub full_match: bool,
}

impl Triggers {
    pub fn for_ball(ball_number: u32, status: &MatchStatus) -> Self {
        let over = if ball_number > 0 && ball_number % BALLS_PER_OVER == 0 {
            // ceil(n / 6) == n / 6 for multiples of six
            Some(ball_number.div_ceil(BALLS_PER_OVER))
        } else {
            None
        };

        Self {
            over,
            innings: status.is_innings_break(),
            full_match: status.is_completed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live() -> MatchStatus {
        MatchStatus::Live("LIVE".to_string())
    }

    #[test]
    fn test_only_multiples_of_six_complete_an_over() {
        for n in 1..=36u32 {
            let t = Triggers::for_ball(n, &live());
            if n % 6 == 0 {
                assert_eq!(t.over, Some(n / 6));
            } else {
                assert_eq!(t.over, None, "ball {}", n);
            }
        }
    }

    #[test]
    fn test_completed_always_triggers_match() {
        for n in [1, 5, 6, 17, 30] {
            assert!(Triggers::for_ball(n, &MatchStatus::Completed).full_match);
        }
    }

    #[test]
    fn test_ball_thirty_of_completed_match_triggers_both() {
        let t = Triggers::for_ball(30, &MatchStatus::Completed);
        assert_eq!(t.over, Some(5));
        assert!(t.full_match);
        assert!(!t.innings);
    }

    #[test]
    fn test_innings_break() {
        let t = Triggers::for_ball(31, &MatchStatus::InningsBreak);
        assert!(t.innings);
        assert_eq!(t.over, None);
        assert_eq!(Triggers::for_ball(31, &live()), Triggers::default());
    }
}

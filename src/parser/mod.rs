pub mod clock;
pub mod matchups;
pub mod substitution;

use crate::roster::RosterPair;
use matchups::Matchup;

/// One event per non-blank line, otherwise untouched.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.trim().lines().filter(|l| !l.trim().is_empty()).collect()
}

/// Two-step pipeline: raw play-by-play text → lines → matchups.
pub fn parse_play_by_play(text: &str, rosters: &RosterPair) -> Vec<Matchup> {
    matchups::segment(&split_lines(text), rosters)
}

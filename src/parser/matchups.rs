use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::clock::GameClock;
use super::substitution::{is_substitution, parse_substitution};
use crate::roster::RosterPair;

/// A stretch of play with the same ten players on the court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    #[serde(rename = "players")]
    pub rosters: RosterPair,
    pub events: Vec<String>,
    #[serde(rename = "matchup_duration")]
    pub duration_seconds: u32,
}

impl Matchup {
    fn open(rosters: RosterPair, seed: Option<&str>) -> Self {
        Matchup {
            rosters,
            events: seed.map(|l| vec![l.to_string()]).unwrap_or_default(),
            duration_seconds: 0,
        }
    }
}

/// Everything one segmentation pass mutates. Built fresh for every call.
struct SegmentState {
    current: Matchup,
    last_time: GameClock,
    finished: Vec<Matchup>,
}

impl SegmentState {
    fn new(rosters: RosterPair) -> Self {
        SegmentState {
            current: Matchup::open(rosters, None),
            last_time: GameClock::PERIOD_START,
            finished: Vec::new(),
        }
    }

    fn advance_clock(&mut self, now: GameClock) {
        let mut delta = self.last_time.elapsed_until(now);
        if delta < 0 {
            warn!(from = %self.last_time, to = %now, "clock moved backwards past a period, ignoring {}s", delta);
            delta = 0;
        }
        self.current.duration_seconds += delta as u32;
        self.last_time = now;
    }

    /// Close the open matchup and start the next one seeded with `line`.
    fn substitute(&mut self, line: &str) {
        let mut rosters = self.current.rosters.clone();

        match parse_substitution(line) {
            Some(sub) => {
                if rosters.side_of(&sub.entering).is_some() {
                    warn!(player = %sub.entering, "entering player already on the court: {}", line);
                }
                match rosters.substitute(&sub.entering, &sub.exiting) {
                    Some(side) => debug!(%side, "{} in for {}", sub.entering, sub.exiting),
                    None => warn!(player = %sub.exiting, "exiting player not on the court, lineups unchanged: {}", line),
                }
            }
            None => warn!("unparseable substitution, lineups unchanged: {}", line),
        }

        let next = Matchup::open(rosters, Some(line));
        let closed = std::mem::replace(&mut self.current, next);
        if !closed.events.is_empty() {
            self.finished.push(closed);
        }
    }

    fn finish(mut self) -> Vec<Matchup> {
        if !self.current.events.is_empty() {
            self.finished.push(self.current);
        }
        self.finished
    }
}

/// Split an ordered list of play lines into matchups.
///
/// Only substitution lines start a new matchup. Time run off between two
/// timestamped lines is credited to the matchup open when the later line
/// arrives, so a substitution's own timestamp closes out the previous lineup.
pub fn segment<S: AsRef<str>>(lines: &[S], rosters: &RosterPair) -> Vec<Matchup> {
    let mut state = SegmentState::new(rosters.clone());

    for line in lines {
        let line = line.as_ref();

        if let Some(now) = GameClock::find_in(line) {
            state.advance_clock(now);
        }

        if is_substitution(line) {
            state.substitute(line);
            continue;
        }

        state.current.events.push(line.to_string());
    }

    state.finish()
}

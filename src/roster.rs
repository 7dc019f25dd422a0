use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

pub const LINEUP_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Team1, Side::Team2];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Team1 => f.write_str("team1"),
            Side::Team2 => f.write_str("team2"),
        }
    }
}

/// The ten players on the court, five per side, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPair {
    team1: Vec<String>,
    team2: Vec<String>,
}

impl RosterPair {
    pub fn new(team1: Vec<String>, team2: Vec<String>) -> Result<Self, RosterError> {
        let pair = RosterPair { team1, team2 };
        pair.validate()?;
        Ok(pair)
    }

    /// Check the lineup shape: exactly five names per side, none repeated within a side.
    pub fn validate(&self) -> Result<(), RosterError> {
        for side in Side::ALL {
            let names = self.side(side);
            if names.len() != LINEUP_SIZE {
                return Err(RosterError::WrongSize { side, len: names.len() });
            }
            for (i, name) in names.iter().enumerate() {
                if names[..i].contains(name) {
                    return Err(RosterError::Duplicate { side, name: name.clone() });
                }
            }
        }
        Ok(())
    }

    pub fn side(&self, side: Side) -> &[String] {
        match side {
            Side::Team1 => &self.team1,
            Side::Team2 => &self.team2,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<String> {
        match side {
            Side::Team1 => &mut self.team1,
            Side::Team2 => &mut self.team2,
        }
    }

    pub fn team1(&self) -> &[String] {
        &self.team1
    }

    pub fn team2(&self) -> &[String] {
        &self.team2
    }

    /// Which side currently has `name` on the court.
    pub fn side_of(&self, name: &str) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| self.side(side).iter().any(|p| p == name))
    }

    /// Swap `exiting` for `entering` on whichever side `exiting` is found.
    /// The side is decided by membership, not by any team named in the play text.
    /// Only the first matching entry leaves, so a side always keeps five names.
    /// Returns `None` and leaves the lineups untouched when `exiting` is not on the court.
    pub fn substitute(&mut self, entering: &str, exiting: &str) -> Option<Side> {
        let side = self.side_of(exiting)?;
        let names = self.side_mut(side);
        let pos = names.iter().position(|p| p == exiting)?;
        names.remove(pos);
        names.push(entering.to_string());
        Some(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn mavs_celtics() -> RosterPair {
        RosterPair::new(
            names(&["Luka Doncic", "Kyrie Irving", "Daniel Gafford", "P.J. Washington", "Derrick Jones Jr."]),
            names(&["Jayson Tatum", "Jaylen Brown", "Jrue Holiday", "Derrick White", "Al Horford"]),
        )
        .unwrap()
    }

    #[test]
    fn rejects_short_lineup() {
        let err = RosterPair::new(names(&["A", "B", "C", "D"]), names(&["E", "F", "G", "H", "I"]));
        assert!(matches!(err, Err(RosterError::WrongSize { side: Side::Team1, len: 4 })));
    }

    #[test]
    fn rejects_duplicate_name() {
        let err = RosterPair::new(names(&["A", "B", "C", "D", "E"]), names(&["F", "G", "F", "H", "I"]));
        assert!(matches!(err, Err(RosterError::Duplicate { side: Side::Team2, name }) if name == "F"));
    }

    #[test]
    fn substitute_by_membership() {
        let mut r = mavs_celtics();
        assert_eq!(r.substitute("Sam Hauser", "Al Horford"), Some(Side::Team2));
        assert_eq!(r.team2().last().map(String::as_str), Some("Sam Hauser"));
        assert!(!r.team2().iter().any(|p| p == "Al Horford"));
        assert_eq!(r.team2().len(), LINEUP_SIZE);
        assert_eq!(r.team1(), mavs_celtics().team1());
    }

    #[test]
    fn substitute_unknown_is_noop() {
        let mut r = mavs_celtics();
        assert_eq!(r.substitute("Someone", "Nobody"), None);
        assert_eq!(r, mavs_celtics());
    }

    #[test]
    fn substitute_removes_one_copy() {
        let mut r = mavs_celtics();
        r.substitute("Luka Doncic", "Kyrie Irving");
        assert_eq!(r.substitute("Dante Exum", "Luka Doncic"), Some(Side::Team1));
        assert_eq!(r.team1().len(), LINEUP_SIZE);
        assert_eq!(r.team1().iter().filter(|p| *p == "Luka Doncic").count(), 1);
        assert_eq!(r.team1().last().map(String::as_str), Some("Dante Exum"));
    }

    #[test]
    fn serializes_team_keys() {
        let json = serde_json::to_value(mavs_celtics()).unwrap();
        assert_eq!(json["team1"][0], "Luka Doncic");
        assert_eq!(json["team2"][4], "Al Horford");
    }
}

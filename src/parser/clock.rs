use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// `m:ss` / `mm:ss`, or bare tenths-of-a-second `s.s` / `ss.s` shown in the last minute.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}:\d{2}|\d{1,2}\.\d)").unwrap());

/// Length of one 12-minute period.
pub const PERIOD_SECONDS: i64 = 720;

/// Game clock reading (time remaining in the period).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    pub minutes: u32,
    pub seconds: u32,
}

impl GameClock {
    pub const PERIOD_START: GameClock = GameClock { minutes: 12, seconds: 0 };

    pub fn total_seconds(self) -> i64 {
        i64::from(self.minutes) * 60 + i64::from(self.seconds)
    }

    /// Parse a single time token. Decimal tokens are truncated to whole seconds.
    pub fn parse_token(token: &str) -> Option<GameClock> {
        if let Some((m, s)) = token.split_once(':') {
            return Some(GameClock {
                minutes: m.parse().ok()?,
                seconds: s.parse().ok()?,
            });
        }
        let value: f64 = token.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Some(GameClock {
            minutes: (value / 60.0).floor() as u32,
            seconds: (value % 60.0).floor() as u32,
        })
    }

    /// First time token anywhere in `line`.
    pub fn find_in(line: &str) -> Option<GameClock> {
        let m = TIME_RE.find(line)?;
        GameClock::parse_token(m.as_str())
    }

    /// Seconds run off the clock going from `self` to `later`.
    ///
    /// A later reading above the earlier one means a period boundary was crossed;
    /// exactly one boundary is assumed, so one period length is added back.
    /// Skipping a whole period between two timestamped lines is not detected.
    pub fn elapsed_until(self, later: GameClock) -> i64 {
        let delta = self.total_seconds() - later.total_seconds();
        if delta < 0 {
            delta + PERIOD_SECONDS
        } else {
            delta
        }
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_seconds_token() {
        let c = GameClock::find_in("9:15 - Luka Doncic enters the game for Kyrie Irving").unwrap();
        assert_eq!(c, GameClock { minutes: 9, seconds: 15 });
        assert_eq!(c.total_seconds(), 555);
    }

    #[test]
    fn decimal_token_truncates() {
        let c = GameClock::find_in("4.7 - Jayson Tatum makes free throw 1 of 2").unwrap();
        assert_eq!(c.to_string(), "00:04");
    }

    #[test]
    fn decimal_token_over_a_minute() {
        assert_eq!(GameClock::parse_token("75.9"), Some(GameClock { minutes: 1, seconds: 15 }));
    }

    #[test]
    fn no_token() {
        assert_eq!(GameClock::find_in("Start of the 2nd Quarter"), None);
        assert_eq!(GameClock::find_in("Jaylen Brown makes 3-pt jump shot"), None);
    }

    #[test]
    fn plain_elapsed() {
        let from = GameClock::PERIOD_START;
        let to = GameClock::parse_token("10:30").unwrap();
        assert_eq!(from.elapsed_until(to), 90);
    }

    #[test]
    fn rollover_adds_a_period() {
        let from = GameClock::parse_token("0:05").unwrap();
        let to = GameClock::parse_token("11:58").unwrap();
        assert_eq!(from.elapsed_until(to), 5 - (11 * 60 + 58) + 720);
        assert_eq!(from.elapsed_until(to), 7);
    }

    #[test]
    fn same_reading_is_zero() {
        let c = GameClock::parse_token("5:43").unwrap();
        assert_eq!(c.elapsed_until(c), 0);
    }
}

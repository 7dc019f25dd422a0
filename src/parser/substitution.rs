/// Marker that turns a play line into a matchup boundary.
pub const SUB_MARKER: &str = "enters the game for";

const SUB_SEPARATOR: &str = " enters the game for ";
const CLOCK_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub entering: String,
    pub exiting: String,
}

pub fn is_substitution(line: &str) -> bool {
    line.contains(SUB_MARKER)
}

/// Parse `"<clock> - <Entering> enters the game for <Exiting>"`.
///
/// The entering name is the second `" - "` segment of the text before the
/// marker (the whole prefix when there is no clock segment). The exiting name
/// is the text after the marker, up to any repeated marker, with trailing
/// whitespace removed so a stray `\r` or padding from the scraped cell cannot
/// stop it matching the roster entry. Returns `None` when either name comes
/// out empty or the spaced marker is missing.
pub fn parse_substitution(line: &str) -> Option<Substitution> {
    let mut parts = line.split(SUB_SEPARATOR);
    let before = parts.next()?;
    let exiting = parts.next()?.trim_end();

    let entering = match before.split(CLOCK_SEPARATOR).nth(1) {
        Some(name) => name,
        None => before,
    }
    .trim();

    if entering.is_empty() || exiting.is_empty() {
        return None;
    }

    Some(Substitution {
        entering: entering.to_string(),
        exiting: exiting.to_string(),
    })
}

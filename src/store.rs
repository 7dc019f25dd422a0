use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::PersistenceError;
use crate::parser::matchups::Matchup;
use crate::parser::split_lines;
use crate::roster::RosterPair;

fn ensure_parent(path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, PersistenceError> {
    fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), PersistenceError> {
    ensure_parent(path)?;
    fs::write(path, contents).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Save fetched play lines, one per line.
pub fn save_lines(path: &Path, lines: &[String]) -> Result<(), PersistenceError> {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    write(path, &out)?;
    info!("Saved {} play lines to {}", lines.len(), path.display());
    Ok(())
}

pub fn load_text(path: &Path) -> Result<String, PersistenceError> {
    read(path)
}

pub fn load_lines(path: &Path) -> Result<Vec<String>, PersistenceError> {
    let text = read(path)?;
    Ok(split_lines(&text).into_iter().map(str::to_string).collect())
}

#[derive(Deserialize)]
struct RosterFile {
    team1: Vec<String>,
    team2: Vec<String>,
}

/// Load and validate the starting lineups.
pub fn load_rosters(path: &Path) -> Result<RosterPair, PersistenceError> {
    let text = read(path)?;
    let file: RosterFile = serde_json::from_str(&text).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    RosterPair::new(file.team1, file.team2).map_err(|source| PersistenceError::Rosters {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_matchups(path: &Path, matchups: &[Matchup]) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(matchups).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write(path, &json)?;
    info!("Saved {} matchups to {}", matchups.len(), path.display());
    Ok(())
}

pub fn load_matchups(path: &Path) -> Result<Vec<Matchup>, PersistenceError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

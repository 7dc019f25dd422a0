use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

const CONFIG_FILE: &str = "pbp_matchups";
const ENV_PREFIX: &str = "PBP";

const ESPN_GAME_URL: &str = "https://www.espn.com/nba/playbyplay/_/gameId/401656363";
const ESPN_TABLE_SELECTOR: &str = "#fittPageContainer > div.pageContent > div > div > div:nth-child(6) > \
     div > div.PageLayout__Main > section.Card.Card--PlayByPlay > div > div > \
     div > div > div > div.Table__Scroller > table > tbody";

/// Runtime settings: defaults, then `pbp_matchups.toml`, then `PBP_*` env vars.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub webdriver_url: String,
    pub headless: bool,
    pub game_url: String,
    pub table_selector: String,
    pub tab_selector: String,
    pub time_cell_selector: String,
    pub text_cell_selector: String,
    pub page_timeout_secs: u64,
    pub tab_settle_ms: u64,
    pub lines_path: PathBuf,
    pub rosters_path: PathBuf,
    pub matchups_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            webdriver_url: "http://localhost:4444".into(),
            headless: true,
            game_url: ESPN_GAME_URL.into(),
            table_selector: ESPN_TABLE_SELECTOR.into(),
            tab_selector: "nav ul li button".into(),
            time_cell_selector: "td.playByPlay__time".into(),
            text_cell_selector: "td.playByPlay__text".into(),
            page_timeout_secs: 10,
            tab_settle_ms: 2000,
            lines_path: "data/play_by_play.txt".into(),
            rosters_path: "data/rosters.json".into(),
            matchups_path: "data/parsed_matchups.json".into(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn tab_settle(&self) -> Duration {
        Duration::from_millis(self.tab_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_uses_defaults() {
        let s: Settings = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(s.page_timeout(), Duration::from_secs(10));
        assert_eq!(s.tab_settle(), Duration::from_secs(2));
        assert!(s.table_selector.ends_with("table > tbody"));
        assert_eq!(s.rosters_path, PathBuf::from("data/rosters.json"));
    }

    #[test]
    fn override_one_field() {
        let s: Settings = config::Config::builder()
            .set_override("page_timeout_secs", 30)
            .unwrap()
            .set_override("webdriver_url", "http://selenium:4444")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(s.page_timeout_secs, 30);
        assert_eq!(s.webdriver_url, "http://selenium:4444");
        assert!(s.headless);
    }
}

use std::time::Duration;

use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{FetchError, RowExtractionError};
use crate::settings::Settings;

/// Period tab labels, in game order. Overtime tabs are not followed.
const PERIOD_TABS: &[&str] = &["1st", "2nd", "3rd", "4th"];

/// Fetch every play line of a game, period by period.
///
/// The WebDriver session is closed on every path, including failures.
pub async fn fetch_play_by_play(settings: &Settings, url: &str) -> Result<Vec<String>, FetchError> {
    let client = connect(settings).await?;
    let result = scrape_periods(&client, settings, url).await;

    if let Err(e) = client.close().await {
        warn!("Failed to close WebDriver session: {}", e);
    }

    result
}

async fn connect(settings: &Settings) -> Result<Client, FetchError> {
    let mut caps = serde_json::Map::new();
    if settings.headless {
        caps.insert("goog:chromeOptions".into(), json!({ "args": ["--headless", "--disable-gpu"] }));
        caps.insert("moz:firefoxOptions".into(), json!({ "args": ["-headless"] }));
    }

    let mut builder = ClientBuilder::native();
    builder.capabilities(caps);
    builder
        .connect(&settings.webdriver_url)
        .await
        .map_err(|source| FetchError::Session {
            url: settings.webdriver_url.clone(),
            source,
        })
}

async fn scrape_periods(client: &Client, settings: &Settings, url: &str) -> Result<Vec<String>, FetchError> {
    info!("Opening {}", url);
    client.goto(url).await.map_err(|source| FetchError::Navigation {
        url: url.to_string(),
        source,
    })?;

    match client
        .wait()
        .at_most(settings.page_timeout())
        .for_element(Locator::Css(&settings.table_selector))
        .await
    {
        Ok(_) => {}
        Err(CmdError::WaitTimeout) => {
            return Err(FetchError::PageLoadTimeout {
                selector: settings.table_selector.clone(),
                secs: settings.page_timeout_secs,
            })
        }
        Err(e) => return Err(e.into()),
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
    pb.enable_steady_tick(Duration::from_millis(120));

    let mut lines = Vec::new();

    pb.set_message(format!("Reading {} period", PERIOD_TABS[0]));
    lines.extend(extract_rows(client, settings).await?);

    let tabs = period_tabs(client, settings).await?;
    for (label, tab) in tabs.iter().skip(1) {
        pb.set_message(format!("Reading {} period", label));
        tab.click().await?;
        tokio::time::sleep(settings.tab_settle()).await;

        let rows = extract_rows(client, settings).await?;
        debug!(period = %label, rows = rows.len(), "period extracted");
        lines.extend(rows);
    }

    pb.finish_and_clear();
    info!("Fetched {} play lines over {} periods", lines.len(), tabs.len().max(1));
    Ok(lines)
}

/// Period tab buttons currently on the page, paired with their label.
async fn period_tabs(client: &Client, settings: &Settings) -> Result<Vec<(String, Element)>, FetchError> {
    let mut tabs = Vec::new();
    for button in client.find_all(Locator::Css(&settings.tab_selector)).await? {
        let label = button.text().await?;
        if is_period_tab(&label) {
            tabs.push((label.trim().to_string(), button));
        }
    }
    Ok(tabs)
}

/// Read the visible period's table. Rows with unreadable cells are skipped.
async fn extract_rows(client: &Client, settings: &Settings) -> Result<Vec<String>, FetchError> {
    let row_selector = format!("{} > tr", settings.table_selector);
    let rows = client.find_all(Locator::Css(&row_selector)).await?;

    let mut lines = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match read_row(row, index, settings).await {
            Ok(line) => lines.push(line),
            Err(e) => warn!("Skipping row: {}", e),
        }
    }
    Ok(lines)
}

async fn read_row(row: &Element, index: usize, settings: &Settings) -> Result<String, RowExtractionError> {
    let time = cell_text(row, index, &settings.time_cell_selector).await?;
    let text = cell_text(row, index, &settings.text_cell_selector).await?;
    Ok(format_row(&time, &text))
}

async fn cell_text(row: &Element, index: usize, selector: &str) -> Result<String, RowExtractionError> {
    let wrap = |source: CmdError| RowExtractionError {
        index,
        selector: selector.to_string(),
        source,
    };
    let cell = row.find(Locator::Css(selector)).await.map_err(wrap)?;
    cell.text().await.map_err(wrap)
}

fn is_period_tab(label: &str) -> bool {
    PERIOD_TABS.contains(&label.trim())
}

fn format_row(time: &str, text: &str) -> String {
    format!("{} - {}", time.trim(), text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_format() {
        assert_eq!(
            format_row("9:15 ", "Luka Doncic enters the game for Kyrie Irving\n"),
            "9:15 - Luka Doncic enters the game for Kyrie Irving"
        );
    }

    #[test]
    fn period_labels() {
        for label in ["1st", "2nd", "3rd", " 4th "] {
            assert!(is_period_tab(label));
        }
        assert!(!is_period_tab("OT"));
        assert!(!is_period_tab("All Plays"));
    }
}

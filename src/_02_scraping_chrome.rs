use thirtyfour::prelude::*;
use thirtyfour::Key;
use serde_json::json;
use std::time::Duration;
use crate::_01_query::SearchQuery;
use crate::_03_tickets::RawRow;
use futures::stream::{self, StreamExt};
use futures::future::join_all;
use thiserror::Error;

const INDEX_URL: &str = "https://www.12306.cn/index/";

const FROM_INPUT_SELECTOR: &str = "#fromStationText";
const TO_INPUT_SELECTOR: &str = "#toStationText";
const DATE_INPUT_SELECTOR: &str = "#train_date";
const SEARCH_BUTTON_SELECTOR: &str = "#search_one";
const RESULT_ROW_SELECTOR: &str = "tbody#queryLeftTable > tr";

/// Attributes that mark a genuine ticket row (vs. header/spacer rows)
const TRAIN_MARKER_ATTRS: &[&str] = &["datatran", "data-train"];

const STATION_PICK_ATTEMPTS: usize = 10;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("station picker never settled on {wanted:?}, input stayed at {actual:?}")]
    StationNotSelected { wanted: String, actual: String },

    #[error("result window never opened after submitting the search")]
    NoResultWindow,

    #[error("ticket table never showed any rows")]
    TableNeverLoaded,

    #[error(transparent)]
    WebDriver(#[from] WebDriverError),
}

// ===================== Main entry =====================
pub async fn scrape_left_ticket_rows(query: &SearchQuery) -> Result<Vec<RawRow>, ScrapeError> {
    let driver = start_chrome_driver().await?;

    let rows = match run_search(&driver, query).await {
        Ok(rows) => rows,
        Err(e) => {
            driver.quit().await?;
            return Err(e);
        }
    };

    driver.quit().await?;
    Ok(rows)
}

async fn run_search(driver: &WebDriver, query: &SearchQuery) -> Result<Vec<RawRow>, ScrapeError> {
    driver.goto(INDEX_URL).await?;

    pick_station(driver, FROM_INPUT_SELECTOR, &query.from_input, &query.from_station).await?;
    println!("Departure station selected: {}", query.from_station);

    pick_station(driver, TO_INPUT_SELECTOR, &query.to_input, &query.to_station).await?;
    println!("Arrival station selected: {}", query.to_station);

    fill_date(driver, &query.date).await?;
    driver.find(By::Css(SEARCH_BUTTON_SELECTOR)).await?.click().await?;

    switch_to_result_window(driver).await?;
    wait_for_result_rows(driver).await?;

    collect_rows(driver).await
}

// ===================== Station autocomplete =====================
//
// The widget is typed into letter by letter, then walked with ArrowDown
// until the input's value matches the wanted canonical name. Exhausting
// the attempts is the one fail-fast condition of the whole pipeline.
async fn pick_station(
    driver: &WebDriver,
    selector: &str,
    typed: &str,
    wanted: &str,
) -> Result<(), ScrapeError> {
    let input = driver.find(By::Css(selector)).await?;
    input.click().await?;
    input.clear().await?;

    for ch in typed.chars() {
        input.send_keys(ch.to_string()).await?;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(Duration::from_millis(500)).await;

    let mut actual = String::new();
    for _ in 0..STATION_PICK_ATTEMPTS {
        input.send_keys(Key::Down + "").await?;
        tokio::time::sleep(Duration::from_millis(100)).await;

        actual = input.prop("value").await?.unwrap_or_default();
        if actual == wanted {
            input.send_keys(Key::Enter + "").await?;
            tokio::time::sleep(Duration::from_millis(300)).await;
            return Ok(());
        }
    }

    Err(ScrapeError::StationNotSelected {
        wanted: wanted.to_string(),
        actual,
    })
}

// ===================== Travel date =====================
async fn fill_date(driver: &WebDriver, date: &str) -> Result<(), ScrapeError> {
    let input = driver.find(By::Css(DATE_INPUT_SELECTOR)).await?;
    input.click().await?;
    input.clear().await?;
    input.send_keys(date).await?;
    tokio::time::sleep(Duration::from_millis(200)).await;
    input.send_keys(Key::Enter + "").await?;

    // click the page corner to dismiss the calendar popup
    driver.action_chain().move_to(0, 0).click().perform().await?;
    tokio::time::sleep(Duration::from_millis(200)).await;

    Ok(())
}

// ===================== Result window =====================
async fn switch_to_result_window(driver: &WebDriver) -> Result<(), ScrapeError> {
    let original = driver.window().await?;

    let opened = stream::iter(0..40)
        .then(|_| async {
            match driver.windows().await {
                Ok(handles) if handles.len() > 1 => true,
                _ => {
                    tokio::time::sleep(Duration::from_millis(250)).await;
                    false
                }
            }
        })
        .any(|opened| futures::future::ready(opened))
        .await;

    if !opened {
        return Err(ScrapeError::NoResultWindow);
    }

    let handles = driver.windows().await?;
    match handles.into_iter().find(|handle| *handle != original) {
        Some(result_window) => {
            driver.switch_to_window(result_window).await?;
            Ok(())
        }
        None => Err(ScrapeError::NoResultWindow),
    }
}

async fn wait_for_result_rows(driver: &WebDriver) -> Result<(), ScrapeError> {
    let rows_shown = stream::iter(0..120)
        .then(|_| async {
            match driver.find_all(By::Css(RESULT_ROW_SELECTOR)).await {
                Ok(elements) if !elements.is_empty() => true,
                _ => {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    false
                }
            }
        })
        .any(|shown| futures::future::ready(shown))
        .await;

    match rows_shown {
        true => Ok(()),
        false => Err(ScrapeError::TableNeverLoaded),
    }
}

// ===================== Row materialization =====================
async fn collect_rows(driver: &WebDriver) -> Result<Vec<RawRow>, ScrapeError> {
    let elements = driver.find_all(By::Css(RESULT_ROW_SELECTOR)).await?;

    let rows = join_all(elements.into_iter().map(|element| async move {
        let mut has_train_marker = false;
        for attr in TRAIN_MARKER_ATTRS {
            if matches!(element.attr(*attr).await, Ok(Some(_))) {
                has_train_marker = true;
                break;
            }
        }

        RawRow {
            text: element.text().await.unwrap_or_default(),
            has_train_marker,
        }
    }))
    .await;

    Ok(rows)
}

// ===================== Chrome driver =====================
async fn start_chrome_driver() -> Result<WebDriver, ScrapeError> {
    let mut caps = DesiredCapabilities::chrome();
    let chrome_options = json!({
        "args": [
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-blink-features=AutomationControlled"
        ]
    });
    caps.insert_base_capability("goog:chromeOptions".to_string(), chrome_options);
    let driver = WebDriver::new("http://localhost:9515", caps).await?;
    Ok(driver)
}

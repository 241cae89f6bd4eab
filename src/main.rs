//chromedriver.exe --port=9515

mod _01_query;
mod _02_scraping_chrome;
mod _03_tickets;
mod _04_duration;
mod _05_ranking;
mod _06_serialization;

use std::fs;

use _01_query::SearchQuery;
use _02_scraping_chrome::scrape_left_ticket_rows;
use _03_tickets::{extract_records, valid_only};
use _05_ranking::top_by_duration;
use _06_serialization::serialize_to_json;

const TICKETS_PATH: &str = "data/tickets.json";
const TOP_PATH: &str = "data/top5.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Starting ticket search...");

    let query = SearchQuery::from_env();
    println!(
        "Searching {} → {} on {}",
        query.from_station, query.to_station, query.date
    );

    // 1. Scrape the result table rows
    let rows = match scrape_left_ticket_rows(&query).await {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Scraping failed: {}. Is chromedriver running on port 9515?", e);
            return Ok(());
        }
    };
    println!("Scraped {} table rows", rows.len());

    // 2. Extract and filter
    let valid = valid_only(extract_records(&rows));
    println!("{} valid tickets", valid.len());

    // 3. Rank by travel duration
    let top = top_by_duration(valid.clone(), query.top_n);

    // 4. Save both collections
    fs::create_dir_all("data")?;
    serialize_to_json(&valid, TICKETS_PATH)?;
    serialize_to_json(&top, TOP_PATH)?;

    println!("Saved all {} tickets to {}", valid.len(), TICKETS_PATH);
    println!("Saved {} fastest tickets to {}", top.len(), TOP_PATH);

    Ok(())
}

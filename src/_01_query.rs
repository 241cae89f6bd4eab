use chrono::{Days, Local};

/// Default latin text typed into the station autocomplete widgets
pub const DEFAULT_FROM_INPUT: &str = "shanghai";
pub const DEFAULT_TO_INPUT: &str = "beijing";

/// Canonical station names the widgets must settle on
pub const DEFAULT_FROM_STATION: &str = "上海";
pub const DEFAULT_TO_STATION: &str = "北京";

pub const DEFAULT_TOP_N: usize = 5;

/// One immutable search request, built once in main and passed down.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub from_input: String,
    pub from_station: String,
    pub to_input: String,
    pub to_station: String,
    /// Travel date in YYYY-MM-DD form
    pub date: String,
    pub top_n: usize,
}

impl SearchQuery {
    /// Build a query from the environment, falling back to the
    /// Shanghai → Beijing, tomorrow, top-5 defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        SearchQuery {
            from_input: env_or("FROM_INPUT", DEFAULT_FROM_INPUT),
            from_station: env_or("FROM_STATION", DEFAULT_FROM_STATION),
            to_input: env_or("TO_INPUT", DEFAULT_TO_INPUT),
            to_station: env_or("TO_STATION", DEFAULT_TO_STATION),
            date: std::env::var("TRAIN_DATE").unwrap_or_else(|_| tomorrow()),
            top_n: std::env::var("TOP_N")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOP_N),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn tomorrow() -> String {
    let today = Local::now().date_naive();
    let date = today.checked_add_days(Days::new(1)).unwrap_or(today);
    date.format("%Y-%m-%d").to_string()
}

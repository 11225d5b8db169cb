use chrono::NaiveDate;
use clap::Parser;
use skyscan_results::{SortBy, StopsBucket, TimeSlot};
use skyscan_shared::SearchParams;

/// Search, filter and compare flight offers
#[derive(Parser, Debug, Clone)]
#[command(name = "skyscan", version)]
pub struct Cli {
    /// Origin airport (IATA code)
    pub origin: String,

    /// Destination airport (IATA code)
    pub destination: String,

    /// Departure date
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    pub date: NaiveDate,

    /// Return date for round trips
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub return_date: Option<NaiveDate>,

    #[arg(short, long, default_value_t = 1)]
    pub passengers: u32,

    /// Keep only these stop counts (0, 1, 2+)
    #[arg(long, value_delimiter = ',')]
    pub stops: Vec<StopsBucket>,

    /// Keep only these departure slots (early, morning, afternoon, evening)
    #[arg(long = "slot", value_delimiter = ',')]
    pub slots: Vec<TimeSlot>,

    /// Keep only these carriers (IATA airline codes)
    #[arg(long = "airline", value_delimiter = ',')]
    pub airlines: Vec<String>,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    /// price, duration or departure
    #[arg(long)]
    pub sort: Option<SortBy>,

    /// Flight ids to put side by side
    #[arg(long = "compare", value_delimiter = ',')]
    pub compare: Vec<String>,

    /// Flight ids to star
    #[arg(long = "star", value_delimiter = ',')]
    pub star: Vec<String>,

    /// Maximum rows in the result table
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Print a JSON report instead of tables
    #[arg(long, env = "SKYSCAN_JSON")]
    pub json: bool,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            origin: self.origin.trim().to_uppercase(),
            destination: self.destination.trim().to_uppercase(),
            departure_date: self.date,
            return_date: self.return_date,
            passengers: self.passengers,
        }
    }
}

use thiserror::Error;

/// Errors raised while loading, preparing or rendering sales data
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The data source answered with a non-success HTTP status
    #[error("HTTP error! status: {status}")]
    Fetch { status: u16 },

    /// The payload was not a sequence of sales records
    #[error("invalid sales data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid bill export: {0}")]
    Csv(#[from] csv::Error),

    #[error("no bill in the export has a parseable date")]
    NoValidBills,

    #[error("invalid day window: {days}")]
    InvalidWindow { days: i64 },

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("could not write chart image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

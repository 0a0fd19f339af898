use log::{info, warn};
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::{DashboardError, Result};
use crate::types::TimeRecord;

/// Where the pre-processed sales JSON lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is read
    /// from disk
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Http(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the raw half-hourly records, once.
///
/// A non-success status is a `Fetch` error carrying the status code; a
/// payload that is not an array of records is a `Parse` error.
pub async fn fetch_records(source: &DataSource, timeout: Duration) -> Result<Vec<TimeRecord>> {
    info!("Fetching sales data from {}", source);
    let start = Instant::now();

    let body = match source {
        DataSource::Http(url) => {
            let client = make_client(timeout)?;
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                warn!("Sales data request to {} returned {}", url, status);
                return Err(DashboardError::Fetch {
                    status: status.as_u16(),
                });
            }
            response.bytes().await?.to_vec()
        }
        DataSource::File(path) => tokio::fs::read(path).await?,
    };

    let records: Vec<TimeRecord> = serde_json::from_slice(&body)?;
    info!(
        "Loaded {} buckets in {:.2}s",
        records.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(records)
}

fn make_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("salesdash/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
}

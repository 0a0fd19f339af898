use log::{error, info, warn};

use crate::error::Result;
use crate::types::TimeRecord;

/// Progress of the one-time data load.
///
/// `Loading` is the initial state; `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Vec<TimeRecord>),
    Failed(String),
}

impl LoadState {
    /// Apply the fetch outcome. Returns `false` if the load had already
    /// settled, in which case the outcome is ignored.
    pub fn resolve(&mut self, result: Result<Vec<TimeRecord>>) -> bool {
        if !self.is_loading() {
            warn!("Ignoring a second load result, data is already settled");
            return false;
        }

        *self = match result {
            Ok(records) => {
                info!("Sales data ready ({} buckets)", records.len());
                LoadState::Ready(records)
            }
            Err(e) => {
                error!("Fetching error: {}", e);
                LoadState::Failed(e.to_string())
            }
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn records(&self) -> &[TimeRecord] {
        match self {
            LoadState::Ready(records) => records,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

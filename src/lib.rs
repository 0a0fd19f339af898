//! # Sales Dashboard Library
//!
//! `salesdash` loads a half-hourly sales dataset broken down by weekday and
//! renders it as a multi-series line chart. Users pick which weekdays are
//! shown and whether buckets are half-hourly or merged into hours.
//!
//! ## Features
//!
//! - One-time load of the sales JSON over HTTP or from disk
//! - Hourly view that merges consecutive half-hour buckets
//! - Per-weekday visibility toggles that never hide the last series
//! - Cached plotters rendering with PNG export
//! - Offline preparation of the JSON from a bill export CSV
//!
//! ## Example
//!
//! ```
//! use salesdash::types::{DayVisibility, TimeRecord, ViewMode, Weekday};
//! use salesdash::utils::{aggregate, filter_visible};
//!
//! let raw = vec![
//!     TimeRecord::new("08:00").with(Weekday::Monday, 10.0).with(Weekday::Tuesday, 20.0),
//!     TimeRecord::new("08:30").with(Weekday::Monday, 5.0).with(Weekday::Tuesday, 0.0),
//! ];
//! let visibility = DayVisibility::from_visible(&[Weekday::Monday]);
//!
//! let rows = filter_visible(&aggregate(&raw, ViewMode::Hourly), &visibility);
//! assert_eq!(rows[0].time, "08");
//! assert_eq!(rows[0].get(Weekday::Monday), Some(15.0));
//! assert_eq!(rows[0].get(Weekday::Tuesday), None);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod plotting;
pub mod prep;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::App as SalesDashboardApp;
pub use error::{DashboardError, Result};
pub use types::{DayVisibility, DisplayRecord, TimeRecord, ViewMode, Weekday};

mod aggregation;

pub use aggregation::{aggregate, filter_visible};

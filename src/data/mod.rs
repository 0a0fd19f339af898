mod load;
mod source;

pub use load::LoadState;
pub use source::{fetch_records, DataSource};

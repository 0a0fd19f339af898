mod state;
mod ui;

pub use state::{spawn_initial_load, App, AppWrapper};

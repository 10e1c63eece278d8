//! API request handlers.

mod data;
mod filters;
mod query;

pub use data::{get_data, reload};
pub use filters::get_filter_options;
pub use query::run_query;

mod defaults;
mod io;
mod schema;
mod validate;

pub use io::load_config;
#[allow(unused_imports)]
pub use schema::{Config, Delivery, Render, ReportTime, SummaryApi, TableLayout};
pub use validate::ConfigError;

#[cfg(test)]
mod tests;

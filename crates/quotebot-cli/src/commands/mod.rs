//! Command implementations.

pub mod config;
pub mod extract;
pub mod quote;
pub mod rates;
pub mod run;

pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::quote::execute_quote;
pub use self::rates::execute_rates;
pub use self::run::execute_run;

pub mod executor;

pub use executor::{execute, execute_cases};

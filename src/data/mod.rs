pub mod connectors;

pub use connectors::CsvCaseLoader;

use crate::error::Result;
use crate::types::Cases;

/// Source of training or test cases.
pub trait CaseLoader {
    fn load_cases(&self) -> Result<Cases>;
}

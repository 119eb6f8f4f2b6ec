use crate::data::CaseLoader;
use crate::error::{EvotreeError, Result};
use crate::types::{Case, Cases, Feature};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Loads cases from a CSV file with a header row.
///
/// The first `num_features` columns are features (named after their headers) and
/// the last column is the expected output. Columns in between are ignored.
pub struct CsvCaseLoader {
    path: PathBuf,
    num_features: usize,
}

impl CsvCaseLoader {
    pub fn new<P: AsRef<Path>>(path: P, num_features: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            num_features,
        }
    }

    /// Load CSV file into DataFrame
    pub fn load_frame(&self) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()
            .map_err(|e| EvotreeError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
        let column = df.column(name)?.cast(&DataType::Float64)?;
        column
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value.ok_or_else(|| {
                    EvotreeError::DataLoading(format!(
                        "Missing value in column '{}' at row {}",
                        name, row
                    ))
                })
            })
            .collect()
    }
}

impl CaseLoader for CsvCaseLoader {
    fn load_cases(&self) -> Result<Cases> {
        let df = self.load_frame()?;
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        if names.len() < self.num_features + 1 {
            return Err(EvotreeError::DataLoading(format!(
                "Expected at least {} columns, found {}",
                self.num_features + 1,
                names.len()
            )));
        }

        let ignored = &names[self.num_features..names.len() - 1];
        if !ignored.is_empty() {
            log::warn!(
                "Ignoring columns between features and output in {}: {}",
                self.path.display(),
                ignored.join(", ")
            );
        }

        let features = names[..self.num_features]
            .iter()
            .map(|name| Self::float_column(&df, name).map(|values| (name.as_str(), values)))
            .collect::<Result<Vec<_>>>()?;
        let output_name = &names[names.len() - 1];
        let outputs = Self::float_column(&df, output_name)?;

        let cases = outputs
            .iter()
            .enumerate()
            .map(|(row, &output)| {
                let row_features = features
                    .iter()
                    .map(|(name, values)| Feature::new(*name, values[row]))
                    .collect();
                Case::new(row_features, output)
            })
            .collect::<Cases>();

        log::info!(
            "Loaded {} cases with {} features from {}",
            cases.len(),
            self.num_features,
            self.path.display()
        );
        Ok(cases)
    }
}

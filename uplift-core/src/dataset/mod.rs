//! Column-major dataset view with O(1) column lookup.
//!
//! A `Dataset` is an immutable snapshot: the perturbed and filtered views the
//! refuter and uplift engine need are fresh datasets, never in-place edits.

mod roles;

pub use roles::Roles;

use std::collections::HashMap;

use crate::errors::{CausalError, CausalResult};

/// A named column of observations.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Immutable column-major table of observations.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    /// Map from column name → position for O(1) lookup.
    index: HashMap<String, usize>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset from columns. All columns must have the same length
    /// and unique names.
    pub fn from_columns(columns: Vec<Column>) -> CausalResult<Self> {
        let n_rows = columns.first().map(|c| c.values.len()).unwrap_or(0);
        let mut index = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if column.values.len() != n_rows {
                return Err(CausalError::Configuration {
                    reason: format!(
                        "column '{}' has {} rows, expected {}",
                        column.name,
                        column.values.len(),
                        n_rows
                    ),
                });
            }
            if index.insert(column.name.clone(), position).is_some() {
                return Err(CausalError::Configuration {
                    reason: format!("duplicate column '{}'", column.name),
                });
            }
        }
        Ok(Self {
            columns,
            index,
            n_rows,
        })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Values of a column. Unknown names are a configuration error.
    pub fn column(&self, name: &str) -> CausalResult<&[f64]> {
        self.index
            .get(name)
            .map(|&position| self.columns[position].values.as_slice())
            .ok_or_else(|| CausalError::Configuration {
                reason: format!("unknown column '{name}'"),
            })
    }

    /// A fresh dataset keeping only the rows where `keep` holds for the
    /// given column's value.
    pub fn filter_by<F>(&self, column: &str, keep: F) -> CausalResult<Dataset>
    where
        F: Fn(f64) -> bool,
    {
        let mask: Vec<bool> = self.column(column)?.iter().map(|&v| keep(v)).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = c
                    .values
                    .iter()
                    .zip(&mask)
                    .filter_map(|(&v, &m)| m.then_some(v))
                    .collect();
                Column::new(c.name.clone(), values)
            })
            .collect();
        Dataset::from_columns(columns)
    }

    /// A fresh dataset with one additional column appended.
    pub fn with_column(&self, column: Column) -> CausalResult<Dataset> {
        let mut columns = self.columns.clone();
        columns.push(column);
        Dataset::from_columns(columns)
    }

    /// A fresh dataset with the named column's values replaced.
    pub fn replacing_column(&self, name: &str, values: Vec<f64>) -> CausalResult<Dataset> {
        // Validate the name up front so the error names the column.
        self.column(name)?;
        let columns = self
            .columns
            .iter()
            .map(|c| {
                if c.name == name {
                    Column::new(c.name.clone(), values.clone())
                } else {
                    c.clone()
                }
            })
            .collect();
        Dataset::from_columns(columns)
    }

    /// Distinct values of a column, ascending.
    pub fn distinct_values(&self, name: &str) -> CausalResult<Vec<f64>> {
        let mut values = self.column(name)?.to_vec();
        values.sort_by(f64::total_cmp);
        values.dedup();
        Ok(values)
    }
}

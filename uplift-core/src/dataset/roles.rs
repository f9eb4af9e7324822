//! Role assignment: which columns act as treatment, outcome, confounders,
//! and (optionally) the stratification segment.

use serde::{Deserialize, Serialize};

use super::Dataset;
use crate::errors::{CausalError, CausalResult};

/// External annotation mapping dataset columns to causal roles.
///
/// Roles are not stored on the dataset itself; the same dataset can be
/// analyzed under different assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roles {
    /// Column holding the binary intervention (values in {0, 1}).
    pub treatment: String,
    /// Column holding the continuous outcome.
    pub outcome: String,
    /// Columns assumed to cause both treatment and outcome. May be empty.
    pub confounders: Vec<String>,
    /// Optional categorical column for uplift stratification.
    pub segment: Option<String>,
}

impl Roles {
    pub fn new(
        treatment: impl Into<String>,
        outcome: impl Into<String>,
        confounders: Vec<String>,
    ) -> Self {
        Self {
            treatment: treatment.into(),
            outcome: outcome.into(),
            confounders,
            segment: None,
        }
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    /// Structural checks that need no data: role collisions and duplicates.
    pub fn validate_shape(&self) -> CausalResult<()> {
        if self.treatment == self.outcome {
            return Err(CausalError::Configuration {
                reason: format!("treatment and outcome are the same column '{}'", self.treatment),
            });
        }
        for confounder in &self.confounders {
            if confounder == &self.treatment || confounder == &self.outcome {
                return Err(CausalError::Configuration {
                    reason: format!("confounder '{confounder}' collides with treatment or outcome"),
                });
            }
        }
        let mut seen = std::collections::HashSet::new();
        for confounder in &self.confounders {
            if !seen.insert(confounder.as_str()) {
                return Err(CausalError::Configuration {
                    reason: format!("confounder '{confounder}' listed twice"),
                });
            }
        }
        Ok(())
    }

    /// Full validation against a dataset: shape checks, column existence,
    /// and the binary-treatment invariant.
    pub fn validate(&self, data: &Dataset) -> CausalResult<()> {
        self.validate_shape()?;

        let mut required: Vec<&str> = vec![&self.treatment, &self.outcome];
        required.extend(self.confounders.iter().map(String::as_str));
        if let Some(segment) = &self.segment {
            required.push(segment);
        }
        for name in required {
            if !data.has_column(name) {
                return Err(CausalError::Configuration {
                    reason: format!("unknown column '{name}'"),
                });
            }
        }

        let treatment = data.column(&self.treatment)?;
        if treatment.iter().any(|&v| v != 0.0 && v != 1.0) {
            return Err(CausalError::Configuration {
                reason: format!("treatment column '{}' holds values outside {{0, 1}}", self.treatment),
            });
        }
        Ok(())
    }

    /// The adjustment set with one column excluded (used when stratifying on
    /// a column that is itself a confounder).
    pub fn confounders_without(&self, excluded: &str) -> Vec<String> {
        self.confounders
            .iter()
            .filter(|c| c.as_str() != excluded)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;

    fn sample() -> Dataset {
        Dataset::from_columns(vec![
            Column::new("t", vec![0.0, 1.0]),
            Column::new("y", vec![1.0, 2.0]),
            Column::new("x", vec![3.0, 4.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_valid_roles_pass() {
        let roles = Roles::new("t", "y", vec!["x".into()]);
        assert!(roles.validate(&sample()).is_ok());
    }

    #[test]
    fn test_treatment_outcome_collision() {
        let roles = Roles::new("t", "t", vec![]);
        assert!(roles.validate_shape().is_err());
    }

    #[test]
    fn test_confounder_overlap_rejected() {
        let roles = Roles::new("t", "y", vec!["y".into()]);
        assert!(roles.validate_shape().is_err());
    }

    #[test]
    fn test_unknown_column_rejected() {
        let roles = Roles::new("t", "y", vec!["nope".into()]);
        assert!(roles.validate(&sample()).is_err());
    }

    #[test]
    fn test_nonbinary_treatment_rejected() {
        let roles = Roles::new("y", "x", vec![]);
        assert!(roles.validate(&sample()).is_err());
    }

    #[test]
    fn test_confounders_without_excludes_segment() {
        let roles = Roles::new("t", "y", vec!["x".into(), "s".into()]);
        assert_eq!(roles.confounders_without("s"), vec!["x".to_string()]);
    }
}

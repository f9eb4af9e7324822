//! Nearest-propensity matching with replacement.
//!
//! Matching is deterministic given the scores: ties resolve to the lowest
//! control index, and the parallel fan-out preserves treated order.

use rayon::prelude::*;
use uplift_core::{CausalError, CausalResult};

/// One treated unit matched to its nearest control (row indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedPair {
    pub treated: usize,
    pub control: usize,
}

/// For each treated unit, find the control with minimum |p_t − p_c|.
/// Controls may be reused across treated units (matching with replacement).
pub fn match_with_replacement(
    scores: &[f64],
    treated: &[usize],
    controls: &[usize],
) -> CausalResult<Vec<MatchedPair>> {
    if treated.is_empty() || controls.is_empty() {
        return Err(CausalError::PositivityViolation {
            details: format!(
                "cannot match: {} treated and {} control units",
                treated.len(),
                controls.len()
            ),
        });
    }

    let pairs = treated
        .par_iter()
        .map(|&t| {
            let target = scores[t];
            // Controls are in ascending row order; strict `<` keeps the
            // lowest control index on distance ties.
            let mut best = controls[0];
            let mut best_distance = (target - scores[best]).abs();
            for &c in &controls[1..] {
                let distance = (target - scores[c]).abs();
                if distance < best_distance {
                    best = c;
                    best_distance = distance;
                }
            }
            MatchedPair {
                treated: t,
                control: best,
            }
        })
        .collect();

    Ok(pairs)
}

/// Mean matched-pair outcome difference: the ATE under matching.
/// Summed sequentially so repeated runs are bit-identical.
pub fn matched_ate(outcome: &[f64], pairs: &[MatchedPair]) -> f64 {
    let total: f64 = pairs
        .iter()
        .map(|pair| outcome[pair.treated] - outcome[pair.control])
        .sum();
    total / pairs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_control_is_chosen() {
        // treated at rows 0, 1; controls at rows 2, 3, 4.
        let scores = vec![0.30, 0.80, 0.10, 0.33, 0.79];
        let pairs = match_with_replacement(&scores, &[0, 1], &[2, 3, 4]).unwrap();
        assert_eq!(pairs[0].control, 3);
        assert_eq!(pairs[1].control, 4);
    }

    #[test]
    fn test_ties_resolve_to_lowest_control_index() {
        // Controls 1 and 2 are equidistant from the treated unit.
        let scores = vec![0.50, 0.40, 0.60];
        let pairs = match_with_replacement(&scores, &[0], &[1, 2]).unwrap();
        assert_eq!(pairs[0].control, 1);

        // Identical control scores: still the lowest index.
        let scores = vec![0.50, 0.45, 0.45];
        let pairs = match_with_replacement(&scores, &[0], &[1, 2]).unwrap();
        assert_eq!(pairs[0].control, 1);
    }

    #[test]
    fn test_controls_are_reused() {
        let scores = vec![0.40, 0.41, 0.42, 0.39];
        let pairs = match_with_replacement(&scores, &[0, 1, 2], &[3]).unwrap();
        assert!(pairs.iter().all(|p| p.control == 3));
    }

    #[test]
    fn test_empty_pool_is_positivity_violation() {
        let scores = vec![0.5, 0.5];
        let result = match_with_replacement(&scores, &[0, 1], &[]);
        assert!(matches!(
            result,
            Err(CausalError::PositivityViolation { .. })
        ));
        let result = match_with_replacement(&scores, &[], &[0, 1]);
        assert!(matches!(
            result,
            Err(CausalError::PositivityViolation { .. })
        ));
    }

    #[test]
    fn test_matched_ate_averages_pair_differences() {
        let outcome = vec![10.0, 20.0, 4.0, 8.0];
        let pairs = vec![
            MatchedPair {
                treated: 0,
                control: 2,
            },
            MatchedPair {
                treated: 1,
                control: 3,
            },
        ];
        // (10 − 4 + 20 − 8) / 2 = 9
        assert_eq!(matched_ate(&outcome, &pairs), 9.0);
    }
}

//! Scoring primitives shared by every report category.

use crate::error::{AppError, Result};

/// One weighted input to [`calculate_score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreFactor {
    pub value: f64,
    pub weight: f64,
    /// Value at which this factor is fully satisfied.
    pub max: f64,
}

impl ScoreFactor {
    pub fn new(value: impl Into<f64>, weight: impl Into<f64>, max: impl Into<f64>) -> Self {
        Self {
            value: value.into(),
            weight: weight.into(),
            max: max.into(),
        }
    }

    /// A pass/fail factor worth `weight`.
    pub fn flag(passed: bool, weight: impl Into<f64>) -> Self {
        Self::new(if passed { 1.0 } else { 0.0 }, weight, 1.0)
    }

    fn normalized(&self) -> f64 {
        (self.value / self.max).clamp(0.0, 1.0)
    }
}

/// Weighted mean of `value / max` (capped at 1) scaled to 0-100.
///
/// Weights are relative: dividing by the total weight means `[2, 2]` and
/// `[1, 1]` score identically.
pub fn calculate_score(factors: &[ScoreFactor]) -> Result<u8> {
    if factors.is_empty() {
        return Err(AppError::InvalidScoreInput("no factors supplied".into()));
    }
    if let Some(bad) = factors.iter().find(|f| !(f.max > 0.0) || !(f.weight >= 0.0)) {
        return Err(AppError::InvalidScoreInput(format!(
            "factor needs max > 0 and weight >= 0, got max={} weight={}",
            bad.max, bad.weight
        )));
    }

    let total_weight: f64 = factors.iter().map(|f| f.weight).sum();
    if total_weight <= 0.0 {
        return Err(AppError::InvalidScoreInput("total weight must be positive".into()));
    }

    let weighted: f64 = factors.iter().map(|f| f.normalized() * f.weight).sum();
    Ok(((weighted / total_weight) * 100.0).round() as u8)
}

/// Unweighted mean of the category scores, rounded.
pub fn overall_score(scores: &[u8]) -> Result<u8> {
    if scores.is_empty() {
        return Err(AppError::InvalidScoreInput("no category scores".into()));
    }
    let sum: u32 = scores.iter().map(|&s| u32::from(s)).sum();
    Ok((f64::from(sum) / scores.len() as f64).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_mean() {
        // (1.0 * 3 + 0.5 * 1) / 4 = 0.875
        let score = calculate_score(&[ScoreFactor::new(1, 3, 1), ScoreFactor::new(5, 1, 10)]).unwrap();
        assert_eq!(score, 88);
    }

    #[test]
    fn test_values_above_max_are_capped() {
        let score = calculate_score(&[ScoreFactor::new(9000, 1, 10)]).unwrap();
        assert_eq!(score, 100);
    }

    #[test]
    fn test_only_weight_ratios_matter() {
        let a = calculate_score(&[ScoreFactor::flag(true, 1), ScoreFactor::flag(false, 1)]).unwrap();
        let b = calculate_score(&[ScoreFactor::flag(true, 20), ScoreFactor::flag(false, 20)]).unwrap();
        assert_eq!(a, 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_factor_list_is_rejected() {
        let err = calculate_score(&[]).unwrap_err();
        assert!(matches!(err, AppError::InvalidScoreInput(_)));
    }

    #[test]
    fn test_zero_max_and_zero_total_weight_are_rejected() {
        assert!(calculate_score(&[ScoreFactor::new(1, 1, 0)]).is_err());
        assert!(calculate_score(&[ScoreFactor::new(1, 0, 1)]).is_err());
        assert!(calculate_score(&[ScoreFactor::new(1, f64::NAN, 1)]).is_err());
    }

    #[test]
    fn test_score_stays_in_range_for_many_inputs() {
        for value in [-50.0, 0.0, 0.3, 1.0, 7.5, 1e9] {
            for weight in [0.1, 1.0, 4.0, 1000.0] {
                for max in [0.5, 1.0, 10.0, 2000.0] {
                    let score = calculate_score(&[
                        ScoreFactor::new(value, weight, max),
                        ScoreFactor::new(max / 2.0, 1.0, max),
                    ])
                    .unwrap();
                    assert!(score <= 100, "value={value} weight={weight} max={max}");
                }
            }
        }
    }

    #[test]
    fn test_overall_score_rounds_mean() {
        assert_eq!(overall_score(&[70, 40, 51, 52, 75, 75, 30]).unwrap(), 56);
        assert_eq!(overall_score(&[0, 1]).unwrap(), 1);
        assert!(overall_score(&[]).is_err());
    }
}

// src/levels.rs
//! Experience → level conversion.
//!
//! `thresholds[i]` is the cumulative XP at which level `i + 1` starts;
//! `thresholds[0]` is always 0. Built once and passed by reference.

use crate::error::CurveError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCurve {
    thresholds: Vec<u64>,
}

impl LevelCurve {
    /// Build the curve: step `i` (1-based) costs `floor(base_cost * growth^(i-1))`.
    pub fn new(growth: f64, base_cost: u64, max_level: usize) -> Result<Self, CurveError> {
        if !growth.is_finite() || growth < 1.0 {
            return Err(CurveError::Growth(growth));
        }
        if base_cost == 0 {
            return Err(CurveError::BaseCost);
        }
        if max_level == 0 {
            return Err(CurveError::MaxLevel);
        }

        let mut thresholds = Vec::with_capacity(max_level);
        thresholds.push(0u64);
        let mut total = 0u64;

        for level in 1..max_level {
            let cost = (base_cost as f64 * growth.powf((level - 1) as f64)).floor();
            if !cost.is_finite() || cost >= u64::MAX as f64 {
                return Err(CurveError::Overflow(level));
            }
            total = total
                .checked_add(cost as u64)
                .ok_or(CurveError::Overflow(level))?;
            thresholds.push(total);
        }

        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &[u64] { &self.thresholds }

    /// Number of thresholds; also the level reported once XP passes the top.
    pub fn len(&self) -> usize { self.thresholds.len() }

    pub fn is_empty(&self) -> bool { self.thresholds.is_empty() }

    /// Smallest index `i` with `xp < thresholds[i]`, or `len()` if XP is past the top.
    /// Non-positive and NaN XP map to level 1.
    pub fn level_for(&self, xp: f64) -> u32 {
        if xp.is_nan() || xp <= 0.0 {
            return 1;
        }
        self.thresholds.partition_point(|&t| t as f64 <= xp) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_curve() -> LevelCurve {
        LevelCurve::new(1.106, 640, 120).unwrap()
    }

    #[test]
    fn first_thresholds_match_formula() {
        let c = default_curve();
        assert_eq!(c.len(), 120);
        assert_eq!(c.thresholds()[0], 0);
        assert_eq!(c.thresholds()[1], 640);
        // 640 * 1.106 = 707.84 → 707
        assert_eq!(c.thresholds()[2], 640 + 707);
    }

    #[test]
    fn strictly_increasing_after_zero() {
        for (growth, max) in [(1.0, 5), (1.106, 120), (1.3, 60), (2.0, 40)] {
            let c = LevelCurve::new(growth, 640, max).unwrap();
            assert_eq!(c.len(), max);
            assert!(c.thresholds().windows(2).all(|w| w[0] < w[1]), "growth {growth}");
        }
    }

    #[test]
    fn identical_inputs_identical_curves() {
        assert_eq!(default_curve(), default_curve());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(LevelCurve::new(0.9, 640, 10), Err(CurveError::Growth(0.9)));
        assert!(matches!(LevelCurve::new(f64::NAN, 640, 10), Err(CurveError::Growth(_))));
        assert_eq!(LevelCurve::new(1.1, 0, 10), Err(CurveError::BaseCost));
        assert_eq!(LevelCurve::new(1.1, 640, 0), Err(CurveError::MaxLevel));
        assert!(matches!(LevelCurve::new(1000.0, 640, 120), Err(CurveError::Overflow(_))));
    }

    #[test]
    fn non_positive_xp_is_level_one() {
        let c = default_curve();
        for xp in [0.0, -1.0, -1e12, f64::NEG_INFINITY, f64::NAN] {
            assert_eq!(c.level_for(xp), 1);
        }
        assert_eq!(c.level_for(1.0), 1);
    }

    #[test]
    fn boundaries_are_exact() {
        let c = default_curve();
        for i in 1..c.len() {
            let t = c.thresholds()[i] as f64;
            assert_eq!(c.level_for(t - 1.0), i as u32);
            assert_eq!(c.level_for(t), i as u32 + 1);
        }
    }

    #[test]
    fn capped_at_max_level() {
        let c = default_curve();
        let top = *c.thresholds().last().unwrap() as f64;
        assert_eq!(c.level_for(top), 120);
        assert_eq!(c.level_for(top * 10.0), 120);
        assert_eq!(c.level_for(f64::INFINITY), 120);
    }

    #[test]
    fn monotonic() {
        let c = default_curve();
        let mut prev = 0;
        let mut xp = 0.0;
        while xp < 5.0e8 {
            let lvl = c.level_for(xp);
            assert!(lvl >= prev);
            prev = lvl;
            xp = xp * 1.37 + 11.0;
        }
    }
}

//! Pearson chi-squared tests on count data, used to check that two samplers agree and that a
//! sampler matches the exact two-dice law. P-values come from the regularized upper incomplete
//! gamma function, evaluated with the series / continued-fraction pair from *Numerical Recipes*.

use crate::error::{Error, Result};

const ITMAX: usize = 1_000;
const EPS: f64 = 1e-14;
const FPMIN: f64 = f64::MIN_POSITIVE / EPS;

/// Stores the result of a chi-squared test, indicating whether the null was rejected,
/// along with the test statistic, degrees of freedom, p-value, and the chosen level.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub is_rejected: bool,
    pub statistic: f64,
    pub df: usize,
    pub p_value: f64,
    pub level: f64,
}

impl TestResult {
    fn new(statistic: f64, df: usize, level: f64) -> Result<Self> {
        let p_value = chi_squared_sf(statistic, df)?;
        Ok(Self {
            is_rejected: p_value < level,
            statistic,
            df,
            p_value,
            level,
        })
    }
}

/// Tests whether two vectors of counts over the same categories come from the same
/// distribution (a 2×K contingency table). Categories empty in both samples are skipped.
pub fn chi_squared_homogeneity(
    sample_1: &[u64],
    sample_2: &[u64],
    level: f64,
) -> Result<TestResult> {
    if sample_1.len() != sample_2.len() {
        return Err(Error::BadStatistic(format!(
            "samples have {} and {} categories",
            sample_1.len(),
            sample_2.len()
        )));
    }
    let n1 = sample_1.iter().sum::<u64>() as f64;
    let n2 = sample_2.iter().sum::<u64>() as f64;
    if n1 == 0.0 || n2 == 0.0 {
        return Err(Error::EmptySample);
    }
    let n = n1 + n2;

    let mut statistic = 0.0;
    let mut categories = 0;
    for (&a, &b) in sample_1.iter().zip(sample_2) {
        let total = (a + b) as f64;
        if total == 0.0 {
            continue;
        }
        categories += 1;
        let (e1, e2) = (n1 * total / n, n2 * total / n);
        statistic += (a as f64 - e1).powi(2) / e1 + (b as f64 - e2).powi(2) / e2;
    }
    TestResult::new(statistic, categories - 1, level)
}

/// Tests observed counts against category probabilities `probs`.
///
/// Categories with zero probability are skipped as long as nothing was observed in them.
pub fn chi_squared_goodness_of_fit(
    observed: &[u64],
    probs: &[f64],
    level: f64,
) -> Result<TestResult> {
    if observed.len() != probs.len() {
        return Err(Error::BadStatistic(format!(
            "{} observed categories but {} probabilities",
            observed.len(),
            probs.len()
        )));
    }
    let n = observed.iter().sum::<u64>() as f64;
    if n == 0.0 {
        return Err(Error::EmptySample);
    }

    let mut statistic = 0.0;
    let mut categories = 0;
    for (&o, &p) in observed.iter().zip(probs) {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::BadStatistic(format!("probability {p} outside [0, 1]")));
        }
        if p == 0.0 {
            if o > 0 {
                return Err(Error::BadStatistic(
                    "observation in a category with probability 0".into(),
                ));
            }
            continue;
        }
        categories += 1;
        let expected = n * p;
        statistic += (o as f64 - expected).powi(2) / expected;
    }
    if categories == 0 {
        return Err(Error::EmptySample);
    }
    TestResult::new(statistic, categories - 1, level)
}

/// Survival function of the chi-squared distribution with `df` degrees of freedom.
/// Zero degrees of freedom is the point mass at 0, so any statistic gives 1.
fn chi_squared_sf(statistic: f64, df: usize) -> Result<f64> {
    if df == 0 {
        return Ok(1.0);
    }
    let p_value = gammq(df as f64 / 2.0, statistic / 2.0)?;
    Ok(p_value.clamp(0.0, 1.0))
}

/// Regularized upper incomplete gamma function Q(a, x).
fn gammq(a: f64, x: f64) -> Result<f64> {
    if x < 0.0 || a <= 0.0 || x.is_nan() {
        return Err(Error::BadStatistic(format!("bad arguments a={a}, x={x} for Q(a, x)")));
    }
    if x < a + 1.0 {
        Ok(1.0 - gser(a, x)?)
    } else {
        gcf(a, x)
    }
}

/// P(a, x) by its series representation; converges quickly for x < a + 1.
fn gser(a: f64, x: f64) -> Result<f64> {
    if x == 0.0 {
        return Ok(0.0);
    }
    let mut ap = a;
    let mut del = 1.0 / a;
    let mut sum = del;
    for _ in 0..ITMAX {
        ap += 1.0;
        del *= x / ap;
        sum += del;
        if del.abs() < sum.abs() * EPS {
            return Ok(sum * (-x + a * x.ln() - ln_gamma(a)).exp());
        }
    }
    Err(Error::BadStatistic(format!("series for P({a}, {x}) did not converge")))
}

/// Q(a, x) by its continued fraction (modified Lentz); converges quickly for x >= a + 1.
fn gcf(a: f64, x: f64) -> Result<f64> {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / FPMIN;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=ITMAX {
        let an = -(i as f64) * (i as f64 - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = b + an / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;
        if (del - 1.0).abs() < EPS {
            return Ok((-x + a * x.ln() - ln_gamma(a)).exp() * h);
        }
    }
    Err(Error::BadStatistic(format!("continued fraction for Q({a}, {x}) did not converge")))
}

/// ln Γ(x) for x > 0 (Lanczos approximation).
fn ln_gamma(x: f64) -> f64 {
    const COF: [f64; 6] = [
        76.180_091_729_471_46,
        -86.505_320_329_416_77,
        24.014_098_240_830_91,
        -1.231_739_572_450_155,
        0.120_865_097_386_617_9e-2,
        -0.539_523_938_495_3e-5,
    ];
    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();
    let mut y = x;
    let mut ser = 1.000_000_000_190_015;
    for c in COF {
        y += 1.0;
        ser += c / y;
    }
    -tmp + (2.506_628_274_631_000_5 * ser / x).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ln_gamma() {
        assert_abs_diff_eq!(ln_gamma(1.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ln_gamma(5.0), 24f64.ln(), epsilon = 1e-9);
        assert_abs_diff_eq!(ln_gamma(0.5), std::f64::consts::PI.sqrt().ln(), epsilon = 1e-9);
    }

    #[test]
    fn test_sf_critical_values() {
        // Upper 5% points of the chi-squared distribution.
        for (x, df) in [
            (3.841_458_820_694_124, 1),
            (18.307_038_053_275_146, 10),
            (49.801_849_568_201_4, 35),
        ] {
            assert_abs_diff_eq!(chi_squared_sf(x, df).unwrap(), 0.05, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_sf_two_df_is_exponential() {
        for x in [0.1, 1.0, 2.0, 7.5, 30.0] {
            assert_abs_diff_eq!(chi_squared_sf(x, 2).unwrap(), (-x / 2.0).exp(), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_sf_edges() {
        assert_eq!(chi_squared_sf(0.0, 3).unwrap(), 1.0);
        assert_eq!(chi_squared_sf(12.0, 0).unwrap(), 1.0);
        assert!(chi_squared_sf(-1.0, 3).is_err());
        assert!(chi_squared_sf(f64::NAN, 3).is_err());
    }

    #[test]
    fn test_homogeneity_hand_computed() {
        // Expected counts are [15, 20, 25] in both rows: X² = 2 * (25/15 + 25/25) = 16/3.
        let result = chi_squared_homogeneity(&[10, 20, 30], &[20, 20, 20], 0.05).unwrap();
        assert_abs_diff_eq!(result.statistic, 16.0 / 3.0, epsilon = 1e-12);
        assert_eq!(result.df, 2);
        assert_abs_diff_eq!(result.p_value, (-8.0f64 / 3.0).exp(), epsilon = 1e-10);
        assert!(!result.is_rejected);
    }

    #[test]
    fn test_homogeneity_skips_empty_categories() {
        let with_empty = chi_squared_homogeneity(&[10, 0, 20, 30], &[20, 0, 20, 20], 0.05).unwrap();
        let without = chi_squared_homogeneity(&[10, 20, 30], &[20, 20, 20], 0.05).unwrap();
        assert_eq!(with_empty, without);
    }

    #[test]
    fn test_homogeneity_rejects_different_samples() {
        let result = chi_squared_homogeneity(&[100, 0], &[0, 100], 0.01).unwrap();
        assert!(result.is_rejected);
        assert!(result.p_value < 1e-10);
    }

    #[test]
    fn test_homogeneity_errors() {
        assert_eq!(
            chi_squared_homogeneity(&[0, 0], &[1, 2], 0.05),
            Err(Error::EmptySample)
        );
        assert!(chi_squared_homogeneity(&[1], &[1, 2], 0.05).is_err());
    }

    #[test]
    fn test_homogeneity_single_category() {
        let result = chi_squared_homogeneity(&[5], &[7], 0.05).unwrap();
        assert_eq!(result.df, 0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_goodness_of_fit() {
        // X² = 2.5 + 2.5 = 5 on 1 df.
        let result = chi_squared_goodness_of_fit(&[5, 15, 0], &[0.5, 0.5, 0.0], 0.05).unwrap();
        assert_abs_diff_eq!(result.statistic, 5.0, epsilon = 1e-12);
        assert_eq!(result.df, 1);
        assert_abs_diff_eq!(result.p_value, 0.025_347_318_677_468_2, epsilon = 1e-8);
        assert!(result.is_rejected);
    }

    #[test]
    fn test_goodness_of_fit_errors() {
        assert_eq!(
            chi_squared_goodness_of_fit(&[0, 0], &[0.5, 0.5], 0.05),
            Err(Error::EmptySample)
        );
        assert!(chi_squared_goodness_of_fit(&[1, 1], &[1.0, 0.0], 0.05).is_err());
        assert!(chi_squared_goodness_of_fit(&[1, 1], &[1.5, -0.5], 0.05).is_err());
        assert!(chi_squared_goodness_of_fit(&[1], &[0.5, 0.5], 0.05).is_err());
    }
}

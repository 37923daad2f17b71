//! Provides the frequency table used to compare samplers, and a convergence diagnostic for chains.

use ndarray::prelude::*;
use ndarray_stats::QuantileExt;
use num_traits::ToPrimitive;
use std::collections::BTreeMap;
use std::fmt;

use crate::chi2_test::{chi_squared_goodness_of_fit, chi_squared_homogeneity, TestResult};
use crate::distributions::{Normalized, TwoDice};
use crate::error::{Error, Result};

/// Which sampler produced an observation; indexes the count record of a [`FrequencyTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Gibbs = 0,
    Direct = 1,
}

/// Observation counts per `(x, y)` pair: `[gibbs, direct]`.
///
/// A pair gets a `[0, 0]` record the first time it is observed; pairs never observed are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<(u8, u8), [u64; 2]>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pair: (u8, u8), method: Method) {
        self.counts.entry(pair).or_insert([0, 0])[method as usize] += 1;
    }

    /// Counts for `pair`, `[0, 0]` if it was never observed.
    pub fn counts(&self, pair: (u8, u8)) -> [u64; 2] {
        self.counts.get(&pair).copied().unwrap_or([0, 0])
    }

    /// Total number of observations recorded for `method`.
    pub fn total(&self, method: Method) -> u64 {
        self.counts.values().map(|c| c[method as usize]).sum()
    }

    /// Iterates over observed pairs in `(x, y)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&(u8, u8), &[u64; 2])> {
        self.counts.iter()
    }

    /// Number of distinct pairs observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tests whether the Gibbs and direct counts come from the same distribution.
    pub fn homogeneity_test(&self, level: f64) -> Result<TestResult> {
        let gibbs: Vec<u64> = self.counts.values().map(|c| c[0]).collect();
        let direct: Vec<u64> = self.counts.values().map(|c| c[1]).collect();
        chi_squared_homogeneity(&gibbs, &direct, level)
    }

    /// Tests the counts of `method` against the exact two-dice law (1/36 per reachable pair).
    ///
    /// A pair two dice cannot produce is reported as [`Error::InvalidPair`].
    pub fn goodness_of_fit(&self, method: Method, level: f64) -> Result<TestResult> {
        if let Some((&(x, y), _)) = self
            .counts
            .iter()
            .find(|(pair, c)| c[method as usize] > 0 && TwoDice.prob(*pair) == 0.0)
        {
            return Err(Error::InvalidPair { x, y });
        }
        let (observed, probs): (Vec<u64>, Vec<f64>) = TwoDice::support()
            .map(|pair| (self.counts(pair)[method as usize], TwoDice.prob(&pair)))
            .unzip();
        chi_squared_goodness_of_fit(&observed, &probs, level)
    }
}

impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>3} {:>3} {:>8} {:>8}", "x", "y", "gibbs", "direct")?;
        for (&(x, y), &[gibbs, direct]) in self.iter() {
            writeln!(f, "{x:>3} {y:>3} {gibbs:>8} {direct:>8}")?;
        }
        write!(
            f,
            "{:>7} {:>8} {:>8}",
            "total",
            self.total(Method::Gibbs),
            self.total(Method::Direct)
        )
    }
}

/**
Gelman–Rubin potential scale reduction factor per coordinate.

Each trace is one chain with shape `(n_steps, n_params)`; all traces must share a shape and
there must be at least two chains of at least two steps. Values close to `1.0` indicate the
chains have forgotten their starting points. A coordinate that never varies within any chain
gives `NaN`.
*/
pub fn rhat<T>(traces: &[Array2<T>]) -> Result<Array1<f64>>
where
    T: Clone + ToPrimitive,
{
    let first = traces.first().ok_or(Error::EmptySample)?;
    let (n, n_params) = first.dim();
    if traces.len() < 2 || n < 2 {
        return Err(Error::BadStatistic(format!(
            "R-hat needs at least 2 chains of 2 steps, got {} chains of {n}",
            traces.len()
        )));
    }
    if let Some(bad) = traces.iter().find(|t| t.dim() != (n, n_params)) {
        return Err(Error::BadStatistic(format!(
            "trace shape {:?} differs from {:?}",
            bad.dim(),
            (n, n_params)
        )));
    }

    let as_f64: Vec<Array2<f64>> = traces
        .iter()
        .map(|t| t.mapv(|v| v.to_f64().unwrap_or(f64::NAN)))
        .collect();

    let mut means = Array2::<f64>::zeros((traces.len(), n_params));
    let mut vars = Array2::<f64>::zeros((traces.len(), n_params));
    for (c, trace) in as_f64.iter().enumerate() {
        let mean = trace
            .mean_axis(Axis(0))
            .ok_or(Error::EmptySample)?;
        vars.row_mut(c).assign(&trace.var_axis(Axis(0), 1.0));
        means.row_mut(c).assign(&mean);
    }

    let n = n as f64;
    let within = vars.mean_axis(Axis(0)).ok_or(Error::EmptySample)?;
    let between = means.var_axis(Axis(0), 1.0) * n;
    let pooled = &within * ((n - 1.0) / n) + &between / n;
    Ok((pooled / within).mapv(f64::sqrt))
}

/// Largest [`rhat`] over all coordinates.
pub fn max_rhat<T>(traces: &[Array2<T>]) -> Result<f64>
where
    T: Clone + ToPrimitive,
{
    let all = rhat(traces)?;
    let max = all
        .max()
        .map_err(|e| Error::BadStatistic(format!("R-hat maximum: {e}")))?;
    Ok(*max)
}

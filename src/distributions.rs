/*!
Defines the two-dice target distribution along with the traits the samplers use to talk to it:
full conditionals for Gibbs sweeps ([`Conditional`]) and an exact probability mass function
for validation ([`Normalized`]).

[`Die`] and [`TwoDice`] also implement [`rand_distr::Distribution`], so they can be used with
`Rng::sample` and `sample_iter` like any other distribution.

# Examples

```rust
use dice_gibbs::distributions::{Conditional, Normalized, TwoDice};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

let mut rng = SmallRng::seed_from_u64(42);

// Direct draw from the joint distribution.
let (x, y): (u8, u8) = rng.sample(TwoDice);
assert_eq!(TwoDice.prob(&(x, y)), 1.0 / 36.0);

// Redraw the first die given the current state [x, y].
let x_new = TwoDice.sample(0, &[x, y], &mut rng);
assert!((1..=6).contains(&(y - x_new)));
```
*/

use rand::Rng;
use rand_distr::Distribution;

use crate::dice::{self, FACES, MAX_SUM, MIN_SUM};

/// A trait for distributions that can draw each coordinate of a state from its full conditional.
///
/// The random source belongs to the caller (usually the chain), so every chain keeps its own
/// independent stream.
pub trait Conditional<S> {
    /// Samples coordinate `i` given the current values in `given`.
    fn sample<R: Rng + ?Sized>(&self, i: usize, given: &[S], rng: &mut R) -> S;
}

/// A trait for distributions that provide a normalized probability mass (e.g., for diagnostics).
pub trait Normalized<S> {
    /// Returns the probability of `outcome`.
    fn prob(&self, outcome: &S) -> f64;

    /// Returns the log-probability of `outcome`, `-inf` for impossible outcomes.
    fn log_prob(&self, outcome: &S) -> f64 {
        self.prob(outcome).ln()
    }
}

/// A fair six-sided die.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Die;

impl Distribution<u8> for Die {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        dice::draw_die(rng)
    }
}

impl Normalized<u8> for Die {
    fn prob(&self, face: &u8) -> f64 {
        if (1..=FACES).contains(face) {
            1.0 / FACES as f64
        } else {
            0.0
        }
    }
}

/**
The joint distribution of `(x, y)`, where `x` is the first of two fair dice and `y` is their sum.

As a Gibbs target its state is `[x, y]`: coordinate `0` is redrawn from `x | y` and
coordinate `1` from `y | x`. The state must be a valid pair (see [`dice::check_pair`]);
chains built through [`crate::gibbs::gibbs_sample_from`], [`crate::gibbs::GibbsSampler::two_dice`]
and [`crate::compare::Comparison`] validate it up front.

# Panics

[`Conditional::sample`] panics when `given` has fewer than two coordinates, when `i > 1`, or
when the sum `given[1]` is outside `2..=12` (e.g. `[1, 1]`). Chains built
with `GibbsMarkovChain::new` or `GibbsSampler::new` skip the check.
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoDice;

impl TwoDice {
    /// All 36 reachable pairs in lexicographic order.
    pub fn support() -> impl Iterator<Item = (u8, u8)> {
        (1..=FACES).flat_map(|x| (1..=FACES).map(move |d| (x, x + d)))
    }

    /// Marginal probability that two dice sum to `y`, i.e. `(6 - |y - 7|) / 36`.
    pub fn sum_prob(&self, y: u8) -> f64 {
        if !(MIN_SUM..=MAX_SUM).contains(&y) {
            return 0.0;
        }
        let ways = FACES as i32 - (y as i32 - (FACES as i32 + 1)).abs();
        ways as f64 / (FACES as f64 * FACES as f64)
    }
}

impl Conditional<u8> for TwoDice {
    fn sample<R: Rng + ?Sized>(&self, i: usize, given: &[u8], rng: &mut R) -> u8 {
        match i {
            0 => dice::x_given_y(given[1], rng),
            1 => dice::y_given_x(given[0], rng),
            _ => panic!("Invalid coordinate index {i} for TwoDice, expected 0 or 1"),
        }
    }
}

impl Distribution<(u8, u8)> for TwoDice {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (u8, u8) {
        dice::direct_sample(rng)
    }
}

impl Normalized<(u8, u8)> for TwoDice {
    fn prob(&self, pair: &(u8, u8)) -> f64 {
        if dice::check_pair(*pair).is_ok() {
            1.0 / (FACES as f64 * FACES as f64)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod distributions_tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_support_has_36_valid_pairs() {
        let support: Vec<_> = TwoDice::support().collect();
        assert_eq!(support.len(), 36);
        assert_eq!(support.first(), Some(&(1, 2)));
        assert_eq!(support.last(), Some(&(6, 12)));
        assert!(support.iter().all(|&p| dice::check_pair(p).is_ok()));
    }

    #[test]
    fn test_joint_pmf_sums_to_one() {
        let total: f64 = TwoDice::support().map(|p| TwoDice.prob(&p)).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
        assert_eq!(TwoDice.prob(&(2, 2)), 0.0);
        assert_eq!(TwoDice.log_prob(&(6, 13)), f64::NEG_INFINITY);
    }

    #[test]
    fn test_sum_pmf() {
        assert_abs_diff_eq!(TwoDice.sum_prob(2), 1.0 / 36.0, epsilon = 1e-12);
        assert_abs_diff_eq!(TwoDice.sum_prob(7), 6.0 / 36.0, epsilon = 1e-12);
        assert_abs_diff_eq!(TwoDice.sum_prob(11), 2.0 / 36.0, epsilon = 1e-12);
        assert_eq!(TwoDice.sum_prob(1), 0.0);
        assert_eq!(TwoDice.sum_prob(13), 0.0);
        let total: f64 = (MIN_SUM..=MAX_SUM).map(|y| TwoDice.sum_prob(y)).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_die_pmf() {
        assert_abs_diff_eq!(Die.prob(&3), 1.0 / 6.0, epsilon = 1e-12);
        assert_eq!(Die.prob(&0), 0.0);
        assert_eq!(Die.prob(&7), 0.0);
    }

    #[test]
    fn test_conditional_coordinates() {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..1_000 {
            // Only 6 + 6 sums to 12.
            assert_eq!(Conditional::sample(&TwoDice, 0, &[3, 12], &mut rng), 6);
            let y = Conditional::sample(&TwoDice, 1, &[4, 12], &mut rng);
            assert!((5..=10).contains(&y), "y={y} impossible for x=4");
        }
    }

    #[test]
    #[should_panic(expected = "Invalid coordinate index")]
    fn test_conditional_bad_index() {
        let mut rng = SmallRng::seed_from_u64(5);
        Conditional::sample(&TwoDice, 2, &[1, 2], &mut rng);
    }

    #[test]
    #[should_panic]
    fn test_conditional_short_state() {
        let mut rng = SmallRng::seed_from_u64(5);
        Conditional::sample(&TwoDice, 0, &[1], &mut rng);
    }

    #[test]
    #[should_panic]
    fn test_unchecked_chain_with_bad_sum() {
        let mut chain = crate::gibbs::GibbsMarkovChain::new(TwoDice, &[1, 1]);
        crate::core::MarkovChain::step(&mut chain);
    }

    #[test]
    fn test_distribution_impls() {
        let rng = SmallRng::seed_from_u64(9);
        let pairs: Vec<(u8, u8)> = TwoDice.sample_iter(rng).take(1_000).collect();
        assert!(pairs.iter().all(|&p| dice::check_pair(p).is_ok()));

        let mut rng = SmallRng::seed_from_u64(9);
        let faces: Vec<u8> = (0..1_000).map(|_| rng.sample(Die)).collect();
        assert!(faces.iter().all(|f| (1..=6).contains(f)));
    }
}

/*!
# Gibbs Sampling

The target distribution is specified via the [`Conditional`] trait, which provides the full
conditional distribution of each coordinate of the state. The module defines:

- [`GibbsMarkovChain<S, D, R>`]: a single chain performing full Gibbs sweeps.
- [`GibbsSampler<S, D>`]: several independent chains started from the same state; a global
  seed drives a master RNG that seeds each chain.
- [`gibbs_sample`] / [`gibbs_sample_from`]: run one two-dice chain and return its terminal pair.

# Example

```rust
use dice_gibbs::gibbs::{gibbs_sample, DEFAULT_ITERATIONS};
use rand::rngs::SmallRng;
use rand::SeedableRng;

let mut rng = SmallRng::seed_from_u64(42);
let (x, y) = gibbs_sample(DEFAULT_ITERATIONS, &mut rng);
assert!((1..=6).contains(&x));
assert!((1..=6).contains(&(y - x)));
```
*/

use rand::rngs::SmallRng;
use rand::{thread_rng, Rng, SeedableRng};

use crate::core::{run_to_end, HasChains, MarkovChain};
use crate::dice;
use crate::distributions::{Conditional, TwoDice};
use crate::error::Result;

/// Number of Gibbs sweeps used when the caller has no better choice.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Seed pair a two-dice chain starts from unless told otherwise.
pub const DEFAULT_INITIAL_STATE: (u8, u8) = (1, 2);

/// A single Gibbs sampling chain.
///
/// Each [`step`](MarkovChain::step) is a full sweep: for every coordinate `i` in order, a new
/// value is drawn from `target` given the current values of all coordinates, and written back
/// before the next coordinate is drawn.
///
/// # Type Parameters
/// - `S`: The type of each element in the state.
/// - `D`: The conditional distribution; must implement [`Conditional<S>`].
/// - `R`: The random source owned by the chain, [`SmallRng`] unless built with
///   [`GibbsMarkovChain::with_rng`].
#[derive(Debug, Clone)]
pub struct GibbsMarkovChain<S, D, R = SmallRng>
where
    D: Conditional<S>,
{
    /// The distribution that provides conditional samples.
    pub target: D,

    /// Current state of the Markov chain.
    pub current_state: Vec<S>,

    /// RNG for this chain.
    pub rng: R,
}

impl<S, D> GibbsMarkovChain<S, D>
where
    D: Conditional<S>,
    S: Clone,
{
    /// Creates a new chain with a given target distribution and initial state, seeded from entropy.
    pub fn new(target: D, initial_state: &[S]) -> Self {
        let seed = thread_rng().gen::<u64>();
        Self::with_rng(target, initial_state, SmallRng::seed_from_u64(seed))
    }

    /// Reseeds the chain's RNG.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }
}

impl<S, D, R> GibbsMarkovChain<S, D, R>
where
    D: Conditional<S>,
    S: Clone,
    R: Rng,
{
    /// Creates a new chain drawing from `rng`, which may also be a `&mut` borrow of a caller's RNG.
    pub fn with_rng(target: D, initial_state: &[S], rng: R) -> Self {
        Self {
            target,
            current_state: initial_state.to_vec(),
            rng,
        }
    }
}

impl<S, D, R> MarkovChain<S> for GibbsMarkovChain<S, D, R>
where
    D: Conditional<S>,
    R: Rng,
{
    fn step(&mut self) -> &[S] {
        for i in 0..self.current_state.len() {
            self.current_state[i] = self.target.sample(i, &self.current_state, &mut self.rng);
        }
        &self.current_state
    }

    fn current_state(&self) -> &[S] {
        &self.current_state
    }
}

/// A Gibbs sampler running `n_chains` independent chains from one initial state.
///
/// The per-chain RNGs are seeded from a master `SmallRng` built from `seed`, so samplers with
/// nearby seeds do not share chain streams.
pub struct GibbsSampler<S, D: Conditional<S>> {
    pub target: D,
    pub chains: Vec<GibbsMarkovChain<S, D>>,
    pub seed: u64,
}

impl<S, D> GibbsSampler<S, D>
where
    D: Conditional<S> + Clone,
    S: Clone,
{
    /// Creates a new Gibbs sampler with `n_chains` chains, all starting from `initial_state`.
    ///
    /// The state is not checked against `target`; for [`TwoDice`] prefer
    /// [`GibbsSampler::two_dice`].
    pub fn new(target: D, initial_state: &[S], n_chains: usize) -> Self {
        Self::seeded(target, initial_state, n_chains, thread_rng().gen::<u64>())
    }

    /// Like [`GibbsSampler::new`], with the chains seeded from `seed` directly.
    pub fn seeded(target: D, initial_state: &[S], n_chains: usize, seed: u64) -> Self {
        let chains = chain_rngs(seed, n_chains)
            .map(|rng| GibbsMarkovChain::with_rng(target.clone(), initial_state, rng))
            .collect();

        Self {
            target,
            chains,
            seed,
        }
    }

    /// Sets a new seed, and updates the chains accordingly.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        let n_chains = self.chains.len();
        for (chain, rng) in self.chains.iter_mut().zip(chain_rngs(seed, n_chains)) {
            chain.rng = rng;
        }
        self
    }
}

fn chain_rngs(seed: u64, n_chains: usize) -> impl Iterator<Item = SmallRng> {
    let mut master = SmallRng::seed_from_u64(seed);
    (0..n_chains).map(move |_| SmallRng::seed_from_u64(master.gen::<u64>()))
}

impl GibbsSampler<u8, TwoDice> {
    /// Creates a two-dice sampler after checking that `initial` is a reachable pair.
    pub fn two_dice(initial: (u8, u8), n_chains: usize) -> Result<Self> {
        dice::check_pair(initial)?;
        Ok(Self::new(TwoDice, &[initial.0, initial.1], n_chains))
    }

    /// Like [`GibbsSampler::two_dice`], seeded with `seed`.
    pub fn two_dice_seeded(initial: (u8, u8), n_chains: usize, seed: u64) -> Result<Self> {
        dice::check_pair(initial)?;
        Ok(Self::seeded(TwoDice, &[initial.0, initial.1], n_chains, seed))
    }
}

impl<S, D> HasChains<S> for GibbsSampler<S, D>
where
    D: Conditional<S> + Send,
    S: Send,
{
    type Chain = GibbsMarkovChain<S, D>;

    fn chains_mut(&mut self) -> &mut Vec<Self::Chain> {
        &mut self.chains
    }
}

/// Draws one `(x, y)` pair by running a two-dice Gibbs chain from
/// [`DEFAULT_INITIAL_STATE`] for `iterations` sweeps.
pub fn gibbs_sample<R: Rng + ?Sized>(iterations: usize, rng: &mut R) -> (u8, u8) {
    run_two_dice(DEFAULT_INITIAL_STATE, iterations, rng)
}

/// Like [`gibbs_sample`], starting from `initial`.
///
/// Returns [`crate::Error::InvalidPair`] if `initial` cannot be produced by two dice.
/// With zero iterations the seed pair itself is returned.
pub fn gibbs_sample_from<R: Rng + ?Sized>(
    initial: (u8, u8),
    iterations: usize,
    rng: &mut R,
) -> Result<(u8, u8)> {
    dice::check_pair(initial)?;
    Ok(run_two_dice(initial, iterations, rng))
}

fn run_two_dice<R: Rng + ?Sized>(initial: (u8, u8), iterations: usize, rng: &mut R) -> (u8, u8) {
    let mut chain = GibbsMarkovChain::with_rng(TwoDice, &[initial.0, initial.1], rng);
    let state = run_to_end(&mut chain, iterations);
    (state[0], state[1])
}

/*!
# Gibbs vs. Direct Comparison

Draws the same number of samples from the Gibbs sampler and from the direct sampler and
tallies both into one [`FrequencyTable`], so the two empirical distributions can be compared
(see [`FrequencyTable::homogeneity_test`]).

- [`compare`]: sequential, drawing everything from one caller-supplied RNG.
- [`Comparison`]: configurable runner that spreads the Gibbs chains over rayon's thread pool,
  one independently seeded RNG per chain.

# Example

```rust
use dice_gibbs::compare::Comparison;
use dice_gibbs::stats::Method;

let table = Comparison::new(1_000).iterations(50).set_seed(42).run();
assert_eq!(table.total(Method::Gibbs), 1_000);
assert_eq!(table.total(Method::Direct), 1_000);
```
*/

use rand::rngs::SmallRng;
use rand::{thread_rng, Rng, SeedableRng};

use crate::core::ChainRunner;
use crate::dice;
use crate::distributions::TwoDice;
use crate::error::Result;
use crate::gibbs::{gibbs_sample, GibbsSampler, DEFAULT_INITIAL_STATE};
use crate::stats::{FrequencyTable, Method};

/// Number of Gibbs sweeps per sample used by [`Comparison`] unless configured.
pub const DEFAULT_COMPARE_ITERATIONS: usize = 10_000;

/// Runs `num_samples` trials; each draws one Gibbs sample (`iterations` sweeps from
/// [`DEFAULT_INITIAL_STATE`]) and one direct sample, recording both in the same table.
pub fn compare<R: Rng + ?Sized>(
    num_samples: usize,
    iterations: usize,
    rng: &mut R,
) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for _ in 0..num_samples {
        table.record(gibbs_sample(iterations, rng), Method::Gibbs);
        table.record(dice::direct_sample(rng), Method::Direct);
    }
    table
}

/// Configuration for a parallel comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub num_samples: usize,
    pub iterations: usize,
    pub initial_state: (u8, u8),
    pub seed: u64,
}

impl Comparison {
    /// A comparison of `num_samples` draws per method, with [`DEFAULT_COMPARE_ITERATIONS`]
    /// sweeps per Gibbs draw and a random seed.
    pub fn new(num_samples: usize) -> Self {
        Self {
            num_samples,
            iterations: DEFAULT_COMPARE_ITERATIONS,
            initial_state: DEFAULT_INITIAL_STATE,
            seed: thread_rng().gen::<u64>(),
        }
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Starts every Gibbs chain from `initial`, which must be a pair two dice can produce.
    pub fn initial_state(mut self, initial: (u8, u8)) -> Result<Self> {
        dice::check_pair(initial)?;
        self.initial_state = initial;
        Ok(self)
    }

    /// Seeds a master RNG from which the Gibbs chains and the direct stream get their own seeds.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn run(&self) -> FrequencyTable {
        let (gibbs_seed, direct_seed) = self.stream_seeds();
        let states = self.sampler(gibbs_seed).run_terminal(self.iterations);
        self.tabulate(states, direct_seed)
    }

    /// Like [`Comparison::run`], with a progress bar over finished chains.
    pub fn run_with_progress(&self) -> FrequencyTable {
        let (gibbs_seed, direct_seed) = self.stream_seeds();
        let states = self.sampler(gibbs_seed).run_terminal_with_progress(self.iterations);
        self.tabulate(states, direct_seed)
    }

    fn stream_seeds(&self) -> (u64, u64) {
        let mut master = SmallRng::seed_from_u64(self.seed);
        (master.gen::<u64>(), master.gen::<u64>())
    }

    fn sampler(&self, seed: u64) -> GibbsSampler<u8, TwoDice> {
        let (x, y) = self.initial_state;
        GibbsSampler::seeded(TwoDice, &[x, y], self.num_samples, seed)
    }

    fn tabulate(&self, gibbs_states: Vec<Vec<u8>>, direct_seed: u64) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for state in gibbs_states {
            table.record((state[0], state[1]), Method::Gibbs);
        }

        let mut rng = SmallRng::seed_from_u64(direct_seed);
        for _ in 0..self.num_samples {
            table.record(dice::direct_sample(&mut rng), Method::Direct);
        }
        table
    }
}

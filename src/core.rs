/*!
Chain abstractions shared by the samplers.

- [`MarkovChain`]: a single chain that can be stepped.
- [`run_chain`] / [`run_chain_with_progress`]: record a chain's trajectory as an `Array2`.
- [`HasChains`] / [`ChainRunner`]: run every chain of a sampler in parallel, either keeping
  the full (burned-in) traces or only the terminal state of each chain.
*/

use indicatif::ProgressBar;
use indicatif::{MultiProgress, ProgressStyle};
use ndarray::{s, Array2};
use num_traits::Zero;
use rayon::prelude::*;

pub trait MarkovChain<S> {
    /// Does one iteration of the chain, returning the new current state.
    fn step(&mut self) -> &[S];

    /// Get the current state without stepping.
    fn current_state(&self) -> &[S];
}

/// Steps `chain` `n_steps` times and records every visited state as one row.
pub fn run_chain<S, M>(chain: &mut M, n_steps: usize) -> Array2<S>
where
    M: MarkovChain<S>,
    S: Clone + Zero,
{
    let dim = chain.current_state().len();
    let mut out = Array2::<S>::zeros((n_steps, dim));

    for mut row in out.rows_mut() {
        let state = chain.step();
        row.iter_mut()
            .zip(state)
            .for_each(|(dst, src)| *dst = src.clone());
    }

    out
}

pub fn run_chain_with_progress<S, M>(chain: &mut M, n_steps: usize, pb: &ProgressBar) -> Array2<S>
where
    M: MarkovChain<S>,
    S: Clone + Zero,
{
    let dim = chain.current_state().len();
    let mut out = Array2::<S>::zeros((n_steps, dim));

    pb.set_length(n_steps as u64);

    for mut row in out.rows_mut() {
        let state = chain.step();
        row.iter_mut()
            .zip(state)
            .for_each(|(dst, src)| *dst = src.clone());

        pb.inc(1);
    }

    out
}

/// Steps `chain` `n_steps` times without recording, returning the terminal state.
pub fn run_to_end<S, M>(chain: &mut M, n_steps: usize) -> Vec<S>
where
    M: MarkovChain<S>,
    S: Clone,
{
    for _ in 0..n_steps {
        chain.step();
    }
    chain.current_state().to_vec()
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

/// A trait for "anything that owns multiple MarkovChains".
/// - `S` is the state element type (e.g. u8).
/// - `Chain` is the MarkovChain type stored by this struct.
pub trait HasChains<S> {
    type Chain: MarkovChain<S> + std::marker::Send;

    /// Returns a mutable reference to the vector of chains.
    fn chains_mut(&mut self) -> &mut Vec<Self::Chain>;
}

pub trait ChainRunner<S>: HasChains<S>
where
    S: Clone + Zero + Send,
{
    /// Runs the chains in parallel, discarding the first `discard` states of each trace.
    fn run(&mut self, n_steps: usize, discard: usize) -> Vec<Array2<S>> {
        self.chains_mut()
            .par_iter_mut()
            .map(|chain| {
                let trace: Array2<S> = run_chain(chain, n_steps);
                let keep = discard.min(trace.nrows());
                trace.slice(s![keep.., ..]).to_owned()
            })
            .collect()
    }

    fn run_with_progress(&mut self, n_steps: usize, discard: usize) -> Vec<Array2<S>> {
        let multi = MultiProgress::new();
        let pb_style = progress_style();

        self.chains_mut()
            .par_iter_mut()
            .enumerate()
            .map(|(i, chain)| {
                let pb = multi.add(ProgressBar::new(n_steps as u64));
                pb.set_prefix(format!("Chain {i}"));
                pb.set_style(pb_style.clone());

                let trace: Array2<S> = run_chain_with_progress(chain, n_steps, &pb);
                pb.finish_with_message("Done!");

                let keep = discard.min(trace.nrows());
                trace.slice(s![keep.., ..]).to_owned()
            })
            .collect()
    }

    /// Runs every chain for `n_steps` and returns only the terminal state of each,
    /// ordered by chain index.
    fn run_terminal(&mut self, n_steps: usize) -> Vec<Vec<S>> {
        self.chains_mut()
            .par_iter_mut()
            .map(|chain| run_to_end::<S, _>(chain, n_steps))
            .collect()
    }

    /// Like [`ChainRunner::run_terminal`], with a single bar counting finished chains.
    fn run_terminal_with_progress(&mut self, n_steps: usize) -> Vec<Vec<S>> {
        let chains = self.chains_mut();
        let pb = ProgressBar::new(chains.len() as u64);
        pb.set_prefix("Chains");
        pb.set_style(progress_style());

        let states = chains
            .par_iter_mut()
            .map(|chain| {
                let state = run_to_end::<S, _>(chain, n_steps);
                pb.inc(1);
                state
            })
            .collect();
        pb.finish_with_message("Done!");
        states
    }
}

impl<S: Clone + Zero + Send, T: HasChains<S>> ChainRunner<S> for T {}

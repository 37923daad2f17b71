//! Two-dice demo: draws a few samples with each method, then compares Gibbs and direct
//! sampling over many draws and checks the tallies with chi-squared tests.

use dice_gibbs::compare::Comparison;
use dice_gibbs::core::ChainRunner;
use dice_gibbs::dice::{conditional_x_given_y, conditional_y_given_x, direct_sample};
use dice_gibbs::gibbs::{gibbs_sample, GibbsSampler, DEFAULT_INITIAL_STATE, DEFAULT_ITERATIONS};
use dice_gibbs::stats::{self, Method};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::error::Error;

/// Main entry point: shows the primitive draws, runs the comparison, and reports
/// homogeneity, goodness-of-fit and R-hat diagnostics.
fn main() -> Result<(), Box<dyn Error>> {
    const N_SAMPLES: usize = 10_000;
    const ITERATIONS: usize = 1_000;
    const N_CHAINS: usize = 4;
    const LEVEL: f64 = 0.01;
    const SEED: u64 = 42;

    let mut rng = SmallRng::seed_from_u64(SEED);

    println!("Direct samples:");
    for _ in 0..5 {
        let (x, y) = direct_sample(&mut rng);
        println!("  x = {x}, y = {y}");
    }

    println!("Conditional samples:");
    for x in [1, 6] {
        println!("  y | x = {x}: {}", conditional_y_given_x(x, &mut rng)?);
    }
    for y in [2, 7, 11] {
        println!("  x | y = {y}: {}", conditional_x_given_y(y, &mut rng)?);
    }

    println!("Gibbs samples ({DEFAULT_ITERATIONS} iterations each):");
    for _ in 0..5 {
        let (x, y) = gibbs_sample(DEFAULT_ITERATIONS, &mut rng);
        println!("  x = {x}, y = {y}");
    }

    // Mixing check: independent chains from opposite corners of the support.
    let mut traces = Vec::with_capacity(2 * N_CHAINS);
    for (i, start) in [DEFAULT_INITIAL_STATE, (6, 12)].into_iter().enumerate() {
        let mut sampler = GibbsSampler::two_dice(start, N_CHAINS)?.set_seed(SEED + 100 * i as u64);
        traces.extend(sampler.run(2_000, 200));
    }
    println!("Max R-hat over {} chains: {:.4}", traces.len(), stats::max_rhat(&traces)?);

    println!("Comparing {N_SAMPLES} samples per method ({ITERATIONS} Gibbs iterations each)...");
    let table = Comparison::new(N_SAMPLES)
        .iterations(ITERATIONS)
        .set_seed(SEED)
        .run_with_progress();
    println!("{table}");

    let homogeneity = table.homogeneity_test(LEVEL)?;
    println!(
        "Gibbs vs direct: X² = {:.2} on {} df, p = {:.4}, rejected at {}: {}",
        homogeneity.statistic,
        homogeneity.df,
        homogeneity.p_value,
        LEVEL,
        homogeneity.is_rejected
    );
    for method in [Method::Gibbs, Method::Direct] {
        let fit = table.goodness_of_fit(method, LEVEL)?;
        println!(
            "{method:?} vs exact law: X² = {:.2} on {} df, p = {:.4}",
            fit.statistic, fit.df, fit.p_value
        );
    }

    Ok(())
}

#[test]
fn test_main() {
    main().expect("Expected main to not return an error.");
}

//! # Dice Gibbs
//!
//! Gibbs sampling illustrated on two dice. The pair `(x, y)` holds the first die and the sum of
//! both dice; it can be drawn directly, or approximately by a Gibbs chain that alternately redraws
//! `x | y` and `y | x`. A comparison driver runs both and tallies the outcomes side by side.
//!
//! ## Example
//!
//! ```rust
//! use dice_gibbs::compare::compare;
//! use dice_gibbs::dice::{conditional_x_given_y, direct_sample};
//! use dice_gibbs::gibbs::gibbs_sample;
//! use dice_gibbs::stats::Method;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//!
//! let (x, y) = direct_sample(&mut rng);
//! println!("direct: x = {x}, y = {y}");
//!
//! // 11 can only be 5 + 6 or 6 + 5.
//! let x = conditional_x_given_y(11, &mut rng).unwrap();
//! assert!(x == 5 || x == 6);
//!
//! let (x, y) = gibbs_sample(100, &mut rng);
//! println!("gibbs: x = {x}, y = {y}");
//!
//! let table = compare(1_000, 100, &mut rng);
//! assert_eq!(table.total(Method::Gibbs), table.total(Method::Direct));
//! let test = table.homogeneity_test(0.001).unwrap();
//! println!("{table}\np-value: {:.3}", test.p_value);
//! ```

pub mod chi2_test;
pub mod compare;
pub mod core;
pub mod dice;
pub mod distributions;
pub mod error;
pub mod gibbs;
pub mod io;
pub mod stats;

pub use error::{Error, Result};

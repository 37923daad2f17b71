/*!
# Two-Dice Primitives

The primitive draws used by every sampler in this crate. `x` is the outcome of the
first die and `y` is the sum of both dice, so a valid pair always satisfies
`y - x ∈ {1, ..., 6}`.

All functions take the random source explicitly, which lets tests pass a seeded
[`SmallRng`](rand::rngs::SmallRng) or a mock generator.

# Examples

```rust
use dice_gibbs::dice::{conditional_x_given_y, direct_sample};
use rand::rngs::SmallRng;
use rand::SeedableRng;

let mut rng = SmallRng::seed_from_u64(42);
let (x, y) = direct_sample(&mut rng);
assert!((1..=6).contains(&(y - x)));

// Two dice can only sum to 2 if the first one shows 1.
assert_eq!(conditional_x_given_y(2, &mut rng).unwrap(), 1);
```
*/

use rand::Rng;

use crate::error::{Error, Result};

/// Number of faces on each die.
pub const FACES: u8 = 6;

/// Smallest possible sum of two dice.
pub const MIN_SUM: u8 = 2;

/// Largest possible sum of two dice.
pub const MAX_SUM: u8 = 2 * FACES;

/// Draws one face uniformly from `1..=6`.
pub fn draw_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=FACES)
}

/// Draws `(x, y)` jointly: `x` is the first die, `y` is `x` plus a second independent die.
pub fn direct_sample<R: Rng + ?Sized>(rng: &mut R) -> (u8, u8) {
    let x = draw_die(rng);
    let y = x + draw_die(rng);
    (x, y)
}

/// Draws the sum `y` given the first die `x`, i.e. uniformly from `x+1..=x+6`.
///
/// Returns [`Error::FaceOutOfRange`] if `x` is not a die face.
pub fn conditional_y_given_x<R: Rng + ?Sized>(x: u8, rng: &mut R) -> Result<u8> {
    check_face(x)?;
    Ok(y_given_x(x, rng))
}

/// Draws the first die `x` given the sum `y`.
///
/// For `y <= 7` the result is uniform over `1..y`, otherwise over `y-6..=6`.
/// Returns [`Error::SumOutOfRange`] if `y` is not a sum of two dice.
pub fn conditional_x_given_y<R: Rng + ?Sized>(y: u8, rng: &mut R) -> Result<u8> {
    check_sum(y)?;
    Ok(x_given_y(y, rng))
}

/// Unchecked draw of `y | x`; `x` must be in `1..=6`.
pub(crate) fn y_given_x<R: Rng + ?Sized>(x: u8, rng: &mut R) -> u8 {
    debug_assert!((1..=FACES).contains(&x), "x = {x} is not a die face");
    x + draw_die(rng)
}

/// Unchecked draw of `x | y`; `y` must be in `2..=12`.
pub(crate) fn x_given_y<R: Rng + ?Sized>(y: u8, rng: &mut R) -> u8 {
    debug_assert!((MIN_SUM..=MAX_SUM).contains(&y), "y = {y} is not a sum");
    if y <= FACES + 1 {
        rng.gen_range(1..y)
    } else {
        rng.gen_range(y - FACES..=FACES)
    }
}

/// Checks that `x` is a face of a die.
pub fn check_face(x: u8) -> Result<()> {
    if (1..=FACES).contains(&x) {
        Ok(())
    } else {
        Err(Error::FaceOutOfRange(x))
    }
}

/// Checks that `y` is a sum two dice can show.
pub fn check_sum(y: u8) -> Result<()> {
    if (MIN_SUM..=MAX_SUM).contains(&y) {
        Ok(())
    } else {
        Err(Error::SumOutOfRange(y))
    }
}

/// Checks that `(x, y)` is reachable: `x` is a face and `y - x` is a face.
pub fn check_pair((x, y): (u8, u8)) -> Result<()> {
    match y.checked_sub(x) {
        Some(d) if (1..=FACES).contains(&x) && (1..=FACES).contains(&d) => Ok(()),
        _ => Err(Error::InvalidPair { x, y }),
    }
}

//! Helper module for RNG-related functions

use crate::core::types::{Number, Vector2};
use rand::Rng;
use rand_core::SeedableRng;
use std::f64::consts::TAU;

/// The generator used for a single scatter call.
///
/// Each call seeds its own instance, generators are never shared between calls or threads
pub type ScatterRng = rand_pcg::Pcg32;

/// Creates the random stream for one scatter call from the host-provided seed
pub fn seeded(seed: u32) -> ScatterRng { ScatterRng::seed_from_u64(seed as u64) }

/// Returns a random number in `0..1`
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> Number { rng.gen::<Number>() }

/// Returns a random point in a disk of the given `radius` centred at the origin.
///
/// The radius is sampled as `radius * sqrt(u)`, so points are uniformly distributed over the disk area.
/// The `x` coordinate follows `sin(phi)`, and `y` follows `cos(phi)`.
pub fn point_in_disk<R: Rng + ?Sized>(rng: &mut R, radius: Number) -> Vector2 {
    let rad = radius * unit(rng).sqrt();
    let phi = TAU * unit(rng);
    Vector2::new(rad * phi.sin(), rad * phi.cos())
}

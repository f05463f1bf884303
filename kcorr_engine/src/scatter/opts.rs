use crate::core::types::Number;
use serde::{Deserialize, Serialize};
use valuable::Valuable;

/// Knobs for [`crate::scatter::ScatterEvaluator`].
///
/// The defaults reproduce the reference behaviour of the plugin, and are what the host always gets.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Valuable)]
pub struct EvaluatorOpts {
    /// Scale the TIS by `cos²(inc_ang)` when choosing whether to scatter (and when reporting it),
    /// and report a relative energy of `1.0` for scattered rays.
    ///
    /// When disabled, the raw normal-incidence TIS is used, and scattered rays carry `cos(inc_ang)` as their energy.
    pub angle_correction: bool,
    /// Cosine between the specular ray and normal above which they are treated as parallel
    pub parallel_threshold: Number,
    pub shrink: ShrinkPolicy,
}

impl Default for EvaluatorOpts {
    fn default() -> Self {
        Self {
            angle_correction: true,
            parallel_threshold: 0.999_999_9,
            shrink: ShrinkPolicy::default(),
        }
    }
}

/// How the sampling radius of the rejection sampler shrinks when samples keep getting rejected.
///
/// After [`Self::first_after`] iterations the radius is multiplied by [`Self::first_factor`] every iteration,
/// and after [`Self::second_after`] it is additionally multiplied by [`Self::second_factor`].
/// Once it starts shrinking, the sampling disk is moved towards the specular ray so the peak stays reachable.
///
/// The iteration count goes up once per trial. The C++ K-correlation plugin counts every trial twice, so its
/// shrink starts after 50 and 100 trials instead, and its long runs won't match these ones.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Valuable)]
pub struct ShrinkPolicy {
    pub first_after: usize,
    pub first_factor: Number,
    pub second_after: usize,
    pub second_factor: Number,
    /// Specular offsets smaller than this are treated as zero, and the disk is never moved
    pub min_offset: Number,
}

impl Default for ShrinkPolicy {
    fn default() -> Self {
        Self {
            first_after: 100,
            first_factor: 0.99,
            second_after: 200,
            second_factor: 0.90,
            min_offset: 1e-8,
        }
    }
}

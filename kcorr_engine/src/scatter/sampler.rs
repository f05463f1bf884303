use crate::core::types::{Number, Vector3};
use crate::scatter::frame::LocalFrame;
use crate::scatter::opts::ShrinkPolicy;
use crate::scatter::params::KCorrelation;
use crate::shared::{rng, validate};
use rand::Rng;

/// A scattered direction picked by [`RejectionSampler`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// The scattered direction, normalised if the frame's normal was
    pub direction: Vector3,
    /// Squared length of the tangential part of [`Self::direction`], always `<= 1`
    pub tangential_sqr: Number,
    /// Total number of trial directions drawn, across all restarts
    pub iterations: usize,
    /// How many accepted directions had to be thrown away for pointing behind the surface
    pub restarts: usize,
}

/// Rejection sampler for the K-correlation scatter distribution.
///
/// Trial directions are drawn uniformly from a disk in the tangent plane (initially the unit disk),
/// and accepted with a probability proportional to the un-normalised BSDF. There is no upper bound
/// on the number of iterations, instead the disk shrinks and moves onto the specular peak as the
/// iteration count grows, which drives the acceptance rate towards one.
#[derive(Copy, Clone, Debug)]
pub struct RejectionSampler<'a> {
    pub policy: ShrinkPolicy,
    pub frame: &'a LocalFrame,
    pub model: &'a KCorrelation,
}

impl<'a> RejectionSampler<'a> {
    pub fn new(policy: ShrinkPolicy, frame: &'a LocalFrame, model: &'a KCorrelation) -> Self {
        Self { policy, frame, model }
    }

    /// Draws trial directions until one is accepted.
    ///
    /// The frame must not be [grazing](LocalFrame::is_grazing): the trial weights there tend to zero and this never returns.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Sample {
        let frame = self.frame;
        let mut iterations = 0;
        let mut restarts = 0;

        'restart: loop {
            let (tangent, tangential_sqr, count) = self.accept_tangent(rng);
            iterations += count;

            let direction = tangent + frame.n * Number::sqrt(1. - tangential_sqr);
            if direction.dot(frame.n) < 0. {
                restarts += 1;
                continue 'restart;
            }

            validate::scattered(direction, frame.n);
            return Sample {
                direction,
                tangential_sqr,
                iterations,
                restarts,
            };
        }
    }

    /// Runs the rejection loop until a trial is accepted.
    /// Returns the tangential part of the accepted direction, its squared length, and the number of trials
    fn accept_tangent<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vector3, Number, usize) {
        let ShrinkPolicy {
            first_after,
            first_factor,
            second_after,
            second_factor,
            min_offset,
        } = self.policy;
        let bo = self.frame.bo;

        let mut count: usize = 0;
        let mut radius: Number = 1.;
        let mut offset: Number = 0.;

        loop {
            count += 1;
            let old_radius = radius;
            if count > first_after {
                radius *= first_factor;
            }
            if count > second_after {
                radius *= second_factor;
            }
            if radius != old_radius && bo.abs() > min_offset {
                offset = if offset.abs() < bo.abs() {
                    (1. - radius) * bo.signum()
                } else {
                    bo
                };
            }

            let disk = rng::point_in_disk(rng, radius);
            let (bp, bq) = (disk.x + offset, disk.y);
            let xsq = (bp - bo) * (bp - bo) + bq * bq;

            let tangent = self.frame.tangent(bp, bq);
            let tangential_sqr = tangent.length_squared();
            // Past the horizon `asin` gives NaN, which never passes the comparison below
            let cos_theta = Number::asin(tangential_sqr.sqrt()).cos();
            let weight = self.model.sample_weight(cos_theta, xsq);

            if rng::unit(rng) < weight && tangential_sqr <= 1. {
                return (tangent, tangential_sqr, count);
            }
        }
    }
}

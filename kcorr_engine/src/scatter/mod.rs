use self::{
    error::{ParamError, ScatterError},
    frame::LocalFrame,
    opts::EvaluatorOpts,
    params::KCorrelation,
    record::{ImportanceRequest, ScatterRecord},
    sampler::RejectionSampler,
};
use crate::core::targets::{SAMPLER, SCATTER};
use crate::core::types::{Number, Vector3};
use crate::shared::{rng, validate};
use tracing::trace;

pub mod bsdf;
pub mod error;
pub mod frame;
pub mod opts;
pub mod params;
pub mod record;
pub mod sampler;

/// The successful result of [`ScatterEvaluator::evaluate`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScatterOutcome {
    /// Total integrated scatter, for a TIS request
    Tis(Number),
    /// `BSDF·cos(θ)` of the candidate direction, for a BSDF request
    Bsdf(Number),
    /// The request code wasn't one we know about, so nothing was computed
    Unsupported,
    /// The ray was scattered
    Scattered {
        direction: Vector3,
        relative_energy: Number,
        iterations: usize,
        restarts: usize,
    },
}

/// Evaluates scattering off a K-correlation surface, one ray at a time.
///
/// The evaluator holds no state besides its options: every call builds its own frame and seeds
/// its own random stream from the record, so calls are independent and can run on any thread.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScatterEvaluator {
    pub opts: EvaluatorOpts,
}

impl ScatterEvaluator {
    pub fn new(opts: EvaluatorOpts) -> Self { Self { opts } }

    /// Evaluates the record, and on success writes the outputs back into it.
    ///
    /// # Errors
    /// See [`Self::compute`]. The record is not modified when an error is returned.
    pub fn evaluate(&self, record: &mut ScatterRecord) -> Result<ScatterOutcome, ScatterError> {
        let outcome = self.compute(record)?;
        record.apply(&outcome);
        Ok(outcome)
    }

    /// Evaluates the record without modifying it.
    ///
    /// Depending on the [`ImportanceRequest`] this either computes the TIS, the BSDF for the record's
    /// candidate direction, or samples a scattered direction using the record's seed.
    ///
    /// # Errors
    /// * [`ScatterError::InvalidParams`] if the surface parameters are not physical
    /// * [`ScatterError::NonPhysicalTis`] if the surface would scatter more than all the light at normal incidence
    /// * [`ScatterError::NotScattered`] if a random direction was requested, but the ray happened not to scatter
    /// * [`ScatterError::GrazingIncidence`] if the ray should scatter, but runs along the surface
    pub fn compute(&self, record: &ScatterRecord) -> Result<ScatterOutcome, ScatterError> {
        if !(record.direction.is_finite() && record.normal.is_finite()) {
            return Err(ParamError::GeometryInvalid.into());
        }

        let frame = LocalFrame::new(record.direction, record.normal, self.opts.parallel_threshold);
        let inc_ang = frame.incidence_angle();
        let model = KCorrelation::new(&record.params, record.index_difference(), record.wavelength)?;

        let cos_i = inc_ang.cos();
        let angle_factor = if self.opts.angle_correction { cos_i * cos_i } else { 1. };

        let request = record.importance_request();
        trace!(target: SCATTER, ?request, inc_ang, tis = model.tis, "evaluating scatter");

        match request {
            ImportanceRequest::Tis => Ok(ScatterOutcome::Tis(model.tis * angle_factor)),
            ImportanceRequest::Bsdf => Ok(ScatterOutcome::Bsdf(bsdf::bsdf_cos(
                &model,
                &frame,
                inc_ang,
                record.candidate,
            ))),
            ImportanceRequest::Unsupported(code) => {
                trace!(target: SCATTER, code, "ignoring unsupported importance request");
                Ok(ScatterOutcome::Unsupported)
            }
            ImportanceRequest::None => self.scatter(record.seed, &frame, &model, angle_factor, cos_i),
        }
    }

    /// Decides whether the ray scatters at all, and if so samples a direction
    fn scatter(
        &self,
        seed: u32,
        frame: &LocalFrame,
        model: &KCorrelation,
        angle_factor: Number,
        cos_i: Number,
    ) -> Result<ScatterOutcome, ScatterError> {
        let mut rng = rng::seeded(seed);

        let threshold = model.tis * angle_factor;
        let draw = rng::unit(&mut rng);
        // Written this way round so a NaN threshold never scatters
        if !(draw <= threshold) {
            return Err(ScatterError::NotScattered { draw, threshold });
        }
        if frame.is_grazing() {
            return Err(ScatterError::GrazingIncidence { bo: frame.bo });
        }

        let sample = RejectionSampler::new(self.opts.shrink, frame, model).sample(&mut rng);
        trace!(
            target: SAMPLER,
            iterations = sample.iterations,
            restarts = sample.restarts,
            "accepted scattered direction"
        );
        validate::vector3(sample.direction);

        // With angle correction the cosine is already part of the scatter threshold
        let relative_energy = if self.opts.angle_correction { 1. } else { cos_i };

        Ok(ScatterOutcome::Scattered {
            direction: sample.direction,
            relative_energy,
            iterations: sample.iterations,
            restarts: sample.restarts,
        })
    }
}

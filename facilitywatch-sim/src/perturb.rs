//! The perturbation step: bounded random walks for a single metric.

use facilitywatch_types::Bounds;

use crate::error::ConfigError;
use crate::random::StepSource;

/// Move `current` by one random step from `[-delta, +delta]`, clamped to `[min, max]`.
///
/// With `delta = 1` the step is one of `{-1, 0, +1}`, each equally likely
/// for a uniform source.
///
/// # Example
///
/// ```rust
/// use facilitywatch_sim::{perturb, FixedStep};
///
/// assert_eq!(perturb(&mut FixedStep(1), 5.0, 0.0, 10.0, 1), 6.0);
/// assert_eq!(perturb(&mut FixedStep(-1), 0.0, 0.0, 10.0, 1), 0.0);
/// ```
pub fn perturb<S: StepSource + ?Sized>(
    rng: &mut S,
    current: f64,
    min: f64,
    max: f64,
    delta: u32,
) -> f64 {
    let step = rng.step(delta) as f64;
    // max/min chain instead of f64::clamp, which panics on inverted bounds
    (current + step).max(min).min(max)
}

/// A bounded random walk with a step size, for metrics that are not counts.
///
/// The integer step drawn from the source is scaled by `step_size` and added
/// to the current value. Only noise far below the step size is removed, so
/// repeated walks over `0.01` steps land on `0.96` rather than
/// `0.9600000000000001`, while off-grid starting values are carried as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walk {
    delta: u32,
    step_size: f64,
}

impl Walk {
    /// Walk in whole units (`step_size = 1`).
    pub const fn unit(delta: u32) -> Self {
        Self {
            delta,
            step_size: 1.0,
        }
    }

    /// Walk in multiples of `step_size`.
    pub fn scaled(delta: u32, step_size: f64) -> Result<Self, ConfigError> {
        if !step_size.is_finite() || step_size <= 0.0 {
            return Err(ConfigError::InvalidStep(step_size));
        }
        Ok(Self { delta, step_size })
    }

    pub(crate) const fn scaled_unchecked(delta: u32, step_size: f64) -> Self {
        Self { delta, step_size }
    }

    /// A walk that never moves.
    pub const fn frozen() -> Self {
        Self::unit(0)
    }

    pub fn delta(&self) -> u32 {
        self.delta
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Same step size, different maximum number of steps per tick.
    pub fn with_delta(self, delta: u32) -> Self {
        Self { delta, ..self }
    }

    /// Compute the next value of a metric bounded by `bounds`.
    pub fn next<S: StepSource + ?Sized>(&self, rng: &mut S, current: f64, bounds: Bounds) -> f64 {
        let steps = rng.step(self.delta);
        if steps == 0 {
            return bounds.clamp(current);
        }
        let next = current + steps as f64 * self.step_size;
        bounds.clamp(snap(next, noise_decimals(self.step_size)))
    }
}

/// Decimal places below which a sum of `step` multiples is only noise:
/// nine orders of magnitude finer than the step itself.
fn noise_decimals(step: f64) -> i32 {
    const NOISE_DIGITS: i32 = 9;
    if !step.is_finite() || step <= 0.0 {
        return NOISE_DIGITS;
    }
    (-step.log10()).ceil() as i32 + NOISE_DIGITS
}

fn snap(value: f64, decimals: i32) -> f64 {
    if decimals <= 0 {
        return value;
    }
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    // Past 2^53 the value has no fractional noise to remove
    if !scaled.is_finite() || scaled.abs() >= 9.0e15 {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedStep, RngSource, ScriptedSteps};

    #[test]
    fn unit_delta_moves_at_most_one() {
        let mut rng = RngSource::seeded(11);
        for _ in 0..500 {
            let next = perturb(&mut rng, 5.0, 0.0, 10.0, 1);
            assert!([4.0, 5.0, 6.0].contains(&next), "got {next}");
        }
    }

    #[test]
    fn lower_edge_never_goes_negative() {
        let mut rng = RngSource::seeded(5);
        for _ in 0..500 {
            let next = perturb(&mut rng, 0.0, 0.0, 10.0, 1);
            assert!(next == 0.0 || next == 1.0, "got {next}");
        }
    }

    #[test]
    fn upper_edge_never_exceeds_max() {
        let mut rng = RngSource::seeded(6);
        for _ in 0..500 {
            let next = perturb(&mut rng, 10.0, 0.0, 10.0, 1);
            assert!(next == 9.0 || next == 10.0, "got {next}");
        }
    }

    #[test]
    fn inverted_bounds_do_not_panic() {
        let next = perturb(&mut FixedStep(1), 5.0, 10.0, 0.0, 1);
        assert!(next.is_finite());
    }

    #[test]
    fn scaled_walk_stays_on_grid() {
        let walk = Walk::scaled(1, 0.01).unwrap();
        let bounds = Bounds::new(0.0, 1.0).unwrap();
        let mut rng = FixedStep(1);

        let mut value = 0.91;
        for _ in 0..5 {
            value = walk.next(&mut rng, value, bounds);
        }
        assert_eq!(value, 0.96);
    }

    #[test]
    fn scaled_walk_clamps_to_bounds() {
        let walk = Walk::scaled(1, 15.0).unwrap();
        let bounds = Bounds::new(400.0, 2000.0).unwrap();
        let mut rng = ScriptedSteps::new([-1, -1]);

        assert_eq!(walk.next(&mut rng, 410.0, bounds), 400.0);
        assert_eq!(walk.next(&mut rng, 400.0, bounds), 400.0);
    }

    #[test]
    fn frozen_walk_never_moves() {
        let bounds = Bounds::new(0.0, 10.0).unwrap();
        let walk = Walk::frozen();
        assert_eq!(walk.next(&mut FixedStep(1), 4.0, bounds), 4.0);
        assert_eq!(walk.next(&mut FixedStep(1), 4.4, bounds), 4.4);
    }

    #[test]
    fn quarter_steps_stay_on_their_grid() {
        let walk = Walk::scaled(1, 0.25).unwrap();
        let bounds = Bounds::new(0.0, 10.0).unwrap();
        let mut rng = FixedStep(1);

        assert_eq!(walk.next(&mut rng, 0.0, bounds), 0.25);
        let mut value = 0.0;
        for _ in 0..7 {
            value = walk.next(&mut rng, value, bounds);
        }
        assert_eq!(value, 1.75);
    }

    #[test]
    fn fractional_start_is_carried_by_unit_walks() {
        let walk = Walk::unit(1);
        let bounds = Bounds::new(0.0, 10.0).unwrap();

        assert_eq!(walk.next(&mut FixedStep(0), 2.5, bounds), 2.5);
        assert_eq!(walk.next(&mut FixedStep(1), 2.5, bounds), 3.5);
        assert_eq!(walk.next(&mut FixedStep(-1), 2.5, bounds), 1.5);
        assert_eq!(walk.next(&mut FixedStep(1), 9.5, bounds), 10.0);
    }

    #[test]
    fn walk_matches_perturb_for_unit_steps() {
        let walk = Walk::unit(2);
        let bounds = Bounds::new(0.0, 10.0).unwrap();
        let mut a = RngSource::seeded(17);
        let mut b = RngSource::seeded(17);

        let (mut x, mut y) = (4.5, 4.5);
        for _ in 0..200 {
            x = walk.next(&mut a, x, bounds);
            y = perturb(&mut b, y, 0.0, 10.0, 2);
            assert_eq!(x, y);
        }
    }

    #[test]
    fn invalid_step_sizes_are_rejected() {
        assert_eq!(Walk::scaled(1, 0.0), Err(ConfigError::InvalidStep(0.0)));
        assert!(Walk::scaled(1, f64::INFINITY).is_err());
        assert!(Walk::scaled(1, -0.5).is_err());
    }

    #[test]
    fn noise_is_removed_only_far_below_the_step() {
        assert_eq!(noise_decimals(1.0), 9);
        assert!(noise_decimals(0.01) >= 11);
        assert_eq!(snap(0.9600000000000001, noise_decimals(0.01)), 0.96);
        assert_eq!(snap(2.123456, noise_decimals(1.0)), 2.123456);
    }
}

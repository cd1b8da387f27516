//! Distribution sampling primitives over a [`RandomSource`].
//!
//! The selection policy only needs Gaussian draws; the gamma sampler is a
//! standalone primitive kept off the posterior path so a future posterior
//! family can reuse the same uniform stream.

use std::f64::consts::{E, TAU};

use crate::rng::RandomSource;

/// Smallest uniform fed into `ln`; keeps Box–Muller finite when the
/// generator lands on an exact zero.
const UNIFORM_FLOOR: f64 = 1e-12;

/// One standard-normal draw via the Box–Muller transform.
///
/// Consumes exactly two uniforms from the source.
pub fn standard_normal(rng: &mut RandomSource) -> f64 {
    let u1 = rng.next_uniform().max(UNIFORM_FLOOR);
    let u2 = rng.next_uniform();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// One draw from `N(mean, std_dev^2)`.
///
/// Consumes exactly two uniforms from the source.
pub fn normal(rng: &mut RandomSource, mean: f64, std_dev: f64) -> f64 {
    std_dev.mul_add(standard_normal(rng), mean)
}

/// One draw from `Gamma(shape, scale)`.
///
/// Dispatches on shape: exponential inversion at `shape == 1`,
/// Ahrens–Dieter rejection below 1, Marsaglia–Tsang squeeze at and above 1.
/// Shape and scale must be finite and positive.
pub fn gamma(rng: &mut RandomSource, shape: f64, scale: f64) -> f64 {
    debug_assert!(shape.is_finite() && shape > 0.0, "gamma shape must be > 0");
    debug_assert!(scale.is_finite() && scale > 0.0, "gamma scale must be > 0");

    #[allow(clippy::float_cmp)]
    let sample = if shape == 1.0 {
        exponential_unit(rng)
    } else if shape < 1.0 {
        gamma_ahrens_dieter(rng, shape)
    } else {
        gamma_marsaglia_tsang(rng, shape)
    };

    sample * scale
}

/// Unit-rate exponential via inversion.
fn exponential_unit(rng: &mut RandomSource) -> f64 {
    -rng.next_uniform().max(UNIFORM_FLOOR).ln()
}

/// Ahrens–Dieter rejection sampler for `shape < 1`.
fn gamma_ahrens_dieter(rng: &mut RandomSource, shape: f64) -> f64 {
    let b = (E + shape) / E;
    loop {
        let p = b * rng.next_uniform();
        if p <= 1.0 {
            let x = p.powf(1.0 / shape);
            if rng.next_uniform() <= (-x).exp() {
                return x;
            }
        } else {
            let x = -((b - p) / shape).max(UNIFORM_FLOOR).ln();
            if rng.next_uniform() <= x.powf(shape - 1.0) {
                return x;
            }
        }
    }
}

/// Marsaglia–Tsang squeeze sampler for `shape >= 1`.
fn gamma_marsaglia_tsang(rng: &mut RandomSource, shape: f64) -> f64 {
    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let x = standard_normal(rng);
        let v = c.mul_add(x, 1.0).powi(3);
        if v <= 0.0 {
            continue;
        }
        let u = rng.next_uniform().max(UNIFORM_FLOOR);
        // Squeeze check first; the log check only runs on the rare miss.
        if u < 1.0 - 0.0331 * x.powi(4) {
            return d * v;
        }
        if u.ln() < 0.5f64.mul_add(x.powi(2), d * (1.0 - v + v.ln())) {
            return d * v;
        }
    }
}

/// Clamp a value into `[0, 1]`, mapping non-finite inputs to 0.
#[must_use]
pub fn clip_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

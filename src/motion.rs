//! Closed-form motion used by the demos. Everything here is a pure
//! function of time and per-object constants.
//!
//! Time comes in as `f64` seconds and is reduced to an angle in `[0, 2π)`
//! before any `f32` maths, so motion stays smooth on a page left open for
//! days.

use std::f32::consts::TAU;

use glam::Vec3;

/// Reference frame rate per-frame increments are expressed in
pub const REFERENCE_FPS: f32 = 60.0;

/// Number of reference frames covered by `dt` seconds
pub fn frames(dt: f32) -> f32 {
    dt.max(0.0) * REFERENCE_FPS
}

/// `t * rate + offset` reduced to `[0, 2π)`
pub fn phase(t: f64, rate: f32, offset: f32) -> f32 {
    wrap_angle((t * rate as f64 + offset as f64).rem_euclid(std::f64::consts::TAU) as f32)
}

/// Angle reduced to `[0, 2π)`
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Accumulated Euler spin, each component kept in `[0, 2π)`
pub fn spin(rotation: Vec3, speed: Vec3, frames: f32) -> Vec3 {
    let r = rotation + speed * frames;
    Vec3::new(wrap_angle(r.x), wrap_angle(r.y), wrap_angle(r.z))
}

/// Breathing scale factor, bounded to `[1 - 0.2 * amplitude, 1 + 0.2 * amplitude]`
pub fn breath(t: f64, offset: f32, amplitude: f32) -> f32 {
    1.0 + phase(t, 2.0, offset).sin() * 0.2 * amplitude
}

/// Small wandering displacement around `origin`
pub fn jitter(origin: Vec3, t: f64, offset: f32, disturbance: f32) -> Vec3 {
    let slow = phase(t, 0.5, offset);
    origin + Vec3::new(slow.sin(), slow.cos(), phase(t, 0.3, offset).sin()) * disturbance
}

/// Height of a radial wave travelling outward from the origin
pub fn wave(distance: f32, t: f64, frequency: f32, speed: f32, amplitude: f32) -> f32 {
    (distance * frequency - phase(t, speed, 0.0)).sin() * amplitude
}

/// One step of exponential smoothing towards `target`
pub fn damp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Maps `sin` output from `[-1, 1]` onto `[lo, hi]`
pub fn remap_unit(s: f32, lo: f32, hi: f32) -> f32 {
    lo + (s + 1.0) * 0.5 * (hi - lo)
}

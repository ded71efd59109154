//! Space Up - falling comets for an endless vertical arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (comets, animation tracks, effects, emitter)
//! - `tuning`: Data-driven spawn balance

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Collision radius per comet kind (world units)
    pub const SLOW_RADIUS: f32 = 99.0;
    pub const REGULAR_RADIUS: f32 = 63.0;
    pub const FAST_RADIUS: f32 = 36.0;
    pub const AWARD_RADIUS: f32 = 25.0;

    /// Score brackets for the visual tier
    pub const TIER2_MIN_SCORE_EXCLUSIVE: u64 = 90;
    pub const TIER3_MIN_SCORE_EXCLUSIVE: u64 = 190;

    /// Idle animation: one full turn of the sphere every 6 seconds
    pub const ROTATION_PERIOD: f32 = 6.0;
    /// Idle animation: glow fades 0.5 -> 1.0 -> 0.5 over 1.2 seconds
    pub const GLOW_PULSE_PERIOD: f32 = 1.2;
    pub const GLOW_ALPHA_HIGH: f32 = 1.0;
    pub const GLOW_ALPHA_LOW: f32 = 0.5;

    /// Glow anchor for the flared kinds (normalized sprite coordinates)
    pub const FLARE_ANCHOR: (f32, f32) = (0.68, 0.38);

    /// Explosion sprite frame rate (frames per second)
    pub const EXPLOSION_FPS: f32 = 20.0;
    /// Number of shared explosion frames after the crack frames
    pub const EXPLOSION_BURST_FRAMES: u32 = 5;

    /// Particle burst is pre-simulated so it doesn't start cold
    pub const BURST_PREWARM: f32 = 0.6;
    pub const BURST_ALPHA: f32 = 0.5;
    /// Hard cutoff for the particle burst, whatever its own state
    pub const BURST_LIFETIME: f32 = 3.0;
}

/// Wrap an angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Smoothstep ease-in-ease-out on t in [0, 1]
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

//! Transient explosion effects
//!
//! Effects are owner-less: once spawned they only know their own position
//! and deadline, and remove themselves from the layer when it passes.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::variant::{CometKind, texture};
use crate::consts::*;

/// Effect identifier, unique within a layer
pub type EffectId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    ExplosionSprite,
    ParticleBurst,
}

/// Notice that an effect left the layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectRemoved {
    pub id: EffectId,
    pub kind: EffectKind,
}

/// Crack-and-burst sprite animation
#[derive(Debug, Clone)]
pub struct ExplosionSprite {
    pub id: EffectId,
    pub pos: Vec2,
    /// Texture currently shown
    pub texture: &'static str,
    frames: Vec<&'static str>,
    elapsed: f32,
}

impl ExplosionSprite {
    fn new(id: EffectId, pos: Vec2, kind: CometKind) -> Self {
        Self {
            id,
            pos,
            texture: texture::CRACKED_RED,
            frames: explosion_frames(kind),
            elapsed: 0.0,
        }
    }

    /// Total animation length
    pub fn duration(&self) -> f32 {
        self.frames.len() as f32 / EXPLOSION_FPS
    }

    pub fn frames(&self) -> &[&'static str] {
        &self.frames
    }

    /// Advance the animation; returns false once the last frame has shown
    fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        let index = (self.elapsed * EXPLOSION_FPS) as usize;
        if let Some(&frame) = self.frames.get(index.min(self.frames.len().saturating_sub(1))) {
            self.texture = frame;
        }
        self.elapsed < self.duration()
    }
}

/// Frame list: kind-specific crack, red crack, then the shared burst
pub fn explosion_frames(kind: CometKind) -> Vec<&'static str> {
    let mut frames = Vec::with_capacity(2 + EXPLOSION_BURST_FRAMES as usize);
    frames.push(kind.crack_texture());
    frames.push(texture::CRACKED_RED);
    frames.extend_from_slice(&texture::EXPLOSION);
    frames
}

/// One glow particle
#[derive(Debug, Clone, Copy)]
pub struct BurstParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub size: f32,
}

/// Particles emitted per burst
pub const BURST_PARTICLES: usize = 48;

/// Glow particle burst. Removed after a fixed delay even if particles remain.
#[derive(Debug, Clone)]
pub struct ParticleBurst {
    pub id: EffectId,
    pub pos: Vec2,
    pub alpha: f32,
    pub effect: &'static str,
    pub particles: Vec<BurstParticle>,
    /// Time since the burst was added to the layer
    age: f32,
    /// Internal simulation clock, includes the prewarm
    sim_time: f32,
}

impl ParticleBurst {
    fn new(id: EffectId, pos: Vec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(id as u64);
        let particles = (0..BURST_PARTICLES)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(60.0..180.0);
                BurstParticle {
                    pos: Vec2::ZERO,
                    vel: Vec2::from_angle(angle) * speed,
                    life: rng.random_range(0.8..1.6),
                    size: rng.random_range(6.0..14.0),
                }
            })
            .collect();

        let mut burst = Self {
            id,
            pos,
            alpha: BURST_ALPHA,
            effect: texture::EXPLOSION_GLOW_EFFECT,
            particles,
            age: 0.0,
            sim_time: 0.0,
        };
        burst.advance_simulation_time(BURST_PREWARM);
        burst
    }

    /// Run the particle simulation forward without aging the burst itself
    pub fn advance_simulation_time(&mut self, seconds: f32) {
        let mut remaining = seconds;
        while remaining > 0.0 {
            let dt = remaining.min(SIM_DT);
            self.step_particles(dt);
            remaining -= dt;
        }
    }

    fn step_particles(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.vel *= 0.96;
            particle.life -= dt;
            particle.size *= 0.995;
        }
        self.particles.retain(|p| p.life > 0.0);
        self.sim_time += dt;
    }

    pub fn sim_time(&self) -> f32 {
        self.sim_time
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    /// Advance; returns false when the removal deadline has passed
    fn advance(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.step_particles(dt);
        self.age < BURST_LIFETIME
    }
}

/// Scene layer hosting transient effects
#[derive(Debug, Clone, Default)]
pub struct EffectLayer {
    sprites: Vec<ExplosionSprite>,
    bursts: Vec<ParticleBurst>,
    next_id: EffectId,
}

impl EffectLayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_effect_id(&mut self) -> EffectId {
        self.next_id += 1;
        self.next_id
    }

    /// Add an explosion sprite animation for a comet of `kind` at `pos`
    pub fn spawn_explosion(&mut self, pos: Vec2, kind: CometKind) -> EffectId {
        let id = self.next_effect_id();
        self.sprites.push(ExplosionSprite::new(id, pos, kind));
        log::debug!("Explosion sprite {} at ({:.0}, {:.0})", id, pos.x, pos.y);
        id
    }

    /// Add a prewarmed glow burst at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2) -> EffectId {
        let id = self.next_effect_id();
        self.bursts.push(ParticleBurst::new(id, pos));
        log::debug!("Particle burst {} at ({:.0}, {:.0})", id, pos.x, pos.y);
        id
    }

    /// Advance all effects, dropping the ones whose time is up
    pub fn advance(&mut self, dt: f32) -> Vec<EffectRemoved> {
        let mut removed = Vec::new();

        self.sprites.retain_mut(|sprite| {
            let alive = sprite.advance(dt);
            if !alive {
                removed.push(EffectRemoved {
                    id: sprite.id,
                    kind: EffectKind::ExplosionSprite,
                });
            }
            alive
        });

        self.bursts.retain_mut(|burst| {
            let alive = burst.advance(dt);
            if !alive {
                removed.push(EffectRemoved {
                    id: burst.id,
                    kind: EffectKind::ParticleBurst,
                });
            }
            alive
        });

        removed
    }

    pub fn sprites(&self) -> &[ExplosionSprite] {
        &self.sprites
    }

    pub fn bursts(&self) -> &[ParticleBurst] {
        &self.bursts
    }

    pub fn len(&self) -> usize {
        self.sprites.len() + self.bursts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_frames_by_kind() {
        let frames = explosion_frames(CometKind::Slow);
        assert_eq!(frames.len(), 7);
        assert_eq!(frames[0], texture::CRACKED_LARGE);
        assert_eq!(frames[1], texture::CRACKED_RED);
        assert_eq!(frames[6], "Explosion5");

        assert_eq!(explosion_frames(CometKind::Fast)[0], texture::CRACKED_SMALL);
        assert_eq!(explosion_frames(CometKind::Award)[0], texture::CRACKED_MEDIUM);
    }

    #[test]
    fn test_explosion_sprite_plays_then_removes() {
        let mut layer = EffectLayer::new();
        let id = layer.spawn_explosion(Vec2::new(10.0, 20.0), CometKind::Regular);
        assert_eq!(layer.sprites()[0].texture, texture::CRACKED_RED);
        assert!((layer.sprites()[0].duration() - 0.35).abs() < 1e-6);

        assert!(layer.advance(0.01).is_empty());
        assert_eq!(layer.sprites()[0].texture, texture::CRACKED_MEDIUM);

        assert!(layer.advance(0.2).is_empty());
        assert_eq!(layer.sprites()[0].texture, "Explosion3");

        let removed = layer.advance(0.2);
        assert_eq!(
            removed,
            vec![EffectRemoved {
                id,
                kind: EffectKind::ExplosionSprite
            }]
        );
        assert!(layer.is_empty());
    }

    #[test]
    fn test_burst_is_prewarmed() {
        let mut layer = EffectLayer::new();
        layer.spawn_burst(Vec2::ZERO);
        let burst = &layer.bursts()[0];
        assert_eq!(burst.alpha, 0.5);
        assert_eq!(burst.age(), 0.0);
        assert!((burst.sim_time() - 0.6).abs() < 1e-3);
        // Particles have already spread out
        assert!(burst.particles.iter().all(|p| p.pos.length() > 1.0));
    }

    #[test]
    fn test_burst_removed_after_fixed_delay() {
        let mut layer = EffectLayer::new();
        let id = layer.spawn_burst(Vec2::ZERO);

        let mut elapsed: f32 = 0.0;
        let mut removed_at = None;
        while elapsed < 4.0 {
            elapsed += 0.1;
            if layer.advance(0.1).iter().any(|r| r.id == id) {
                removed_at = Some(elapsed);
                break;
            }
        }
        let removed_at = removed_at.expect("burst never removed");
        assert!((removed_at - 3.0).abs() < 0.11, "removed at {}", removed_at);
    }

    #[test]
    fn test_bursts_are_deterministic_per_id() {
        let mut a = EffectLayer::new();
        let mut b = EffectLayer::new();
        a.spawn_burst(Vec2::ZERO);
        b.spawn_burst(Vec2::ZERO);
        let pa: Vec<Vec2> = a.bursts()[0].particles.iter().map(|p| p.pos).collect();
        let pb: Vec<Vec2> = b.bursts()[0].particles.iter().map(|p| p.pos).collect();
        assert_eq!(pa, pb);
    }
}

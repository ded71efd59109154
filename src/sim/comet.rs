//! The comet entity
//!
//! A comet picks its variant once at spawn, spins and pulses for as long as
//! it lives, follows at most one scripted move at a time, and is torn down
//! exactly once, either quietly or with an explosion.

use std::fmt;
use std::rc::Weak;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::contact::{PhysicsBody, Rect, category};
use super::effects::EffectLayer;
use super::track::{Sample, TrackKey, Tracks, Tween};
use super::variant::{CometKind, CometVariant, VisualTier};
use crate::consts::*;

/// Comet identifier, unique per emitter
pub type CometId = u32;

/// Whoever spawned the comet and holds the strong reference to it
pub trait CometOwner {
    /// Called once when the comet leaves play. The owner should drop it.
    fn remove_comet(&self, id: CometId);
}

/// Called with the comet when a scripted move arrives
pub type MoveCompletion = Box<dyn FnOnce(&mut Comet)>;

/// Lifecycle of a comet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// In play, accepts moves and contacts
    Active,
    /// Plain removal in progress. Transient: only held inside a removal call.
    Removing,
    /// Explode-and-remove in progress. Transient: only held inside a removal call.
    Exploding,
    /// Owner notified; terminal
    Removed,
}

/// How the glow is composited over the sphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    Alpha,
    Screen,
}

/// A textured child node of the comet
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteNode {
    pub texture: &'static str,
    /// Normalized anchor, (0.5, 0.5) is the center
    pub anchor: Vec2,
    pub scale: Vec2,
    pub rotation: f32,
    pub alpha: f32,
    pub z_position: f32,
    pub blend: BlendMode,
}

impl SpriteNode {
    fn new(texture: &'static str) -> Self {
        Self {
            texture,
            anchor: Vec2::splat(0.5),
            scale: Vec2::ONE,
            rotation: 0.0,
            alpha: 1.0,
            z_position: 0.0,
            blend: BlendMode::Alpha,
        }
    }
}

/// Specular highlight drawn over the sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightNode {
    pub radius: f32,
}

pub struct Comet {
    id: CometId,
    variant: CometVariant,
    is_mirrored: bool,
    enabled: bool,
    lifecycle: Lifecycle,
    /// Position in the scene
    pub pos: Vec2,
    sphere: SpriteNode,
    glow: SpriteNode,
    highlight: Option<HighlightNode>,
    body: PhysicsBody,
    physics_frame: Rect,
    tracks: Tracks,
    on_move_complete: Option<MoveCompletion>,
    owner: Option<Weak<dyn CometOwner>>,
}

impl fmt::Debug for Comet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comet")
            .field("id", &self.id)
            .field("kind", &self.variant.kind)
            .field("tier", &self.variant.tier)
            .field("enabled", &self.enabled)
            .field("lifecycle", &self.lifecycle)
            .field("pos", &self.pos)
            .finish_non_exhaustive()
    }
}

impl Comet {
    /// Build a comet for `kind`, dressed for `current_score`. Idle animation
    /// starts right away.
    pub fn new(id: CometId, kind: CometKind, is_mirrored: bool, current_score: u64) -> Self {
        let variant = CometVariant::select(kind, current_score);
        let radius = variant.collision_radius;

        let sphere = SpriteNode::new(variant.assets.sphere);

        let mut glow = SpriteNode::new(variant.assets.glow);
        if let Some(anchor) = variant.glow_anchor {
            glow.anchor = anchor;
        }
        glow.z_position = 1.0;
        glow.blend = BlendMode::Screen;
        if is_mirrored {
            glow.scale = Vec2::splat(-1.0);
        }

        let highlight = variant.has_highlight.then_some(HighlightNode { radius });

        let mut comet = Self {
            id,
            variant,
            is_mirrored,
            enabled: true,
            lifecycle: Lifecycle::Active,
            pos: Vec2::ZERO,
            sphere,
            glow,
            highlight,
            body: PhysicsBody::circle(radius, kind.category(), category::PLAYER),
            physics_frame: Rect::new(radius, radius, radius * 2.0, radius * 2.0),
            tracks: Tracks::new(),
            on_move_complete: None,
            owner: None,
        };
        comet.begin_idle_animation();

        log::debug!(
            "Comet {} spawned: {:?} {:?} r={}",
            id,
            kind,
            comet.variant.tier,
            radius
        );
        comet
    }

    /// Attach the non-owning back reference used to report removal
    pub fn with_owner(mut self, owner: Weak<dyn CometOwner>) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn id(&self) -> CometId {
        self.id
    }

    pub fn kind(&self) -> CometKind {
        self.variant.kind
    }

    pub fn variant(&self) -> &CometVariant {
        &self.variant
    }

    pub fn tier(&self) -> VisualTier {
        self.variant.tier
    }

    pub fn collision_radius(&self) -> f32 {
        self.variant.collision_radius
    }

    pub fn is_mirrored(&self) -> bool {
        self.is_mirrored
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn sphere(&self) -> &SpriteNode {
        &self.sphere
    }

    pub fn glow(&self) -> &SpriteNode {
        &self.glow
    }

    pub fn highlight(&self) -> Option<&HighlightNode> {
        self.highlight.as_ref()
    }

    pub fn body(&self) -> &PhysicsBody {
        &self.body
    }

    /// Bounding frame of the collision circle
    pub fn physics_frame(&self) -> Rect {
        self.physics_frame
    }

    // === Movement ===

    /// Place the comet at `start` and slide it linearly to `end` over
    /// `duration`. Replaces any move in flight without firing its completion.
    pub fn move_from_to(
        &mut self,
        start: Vec2,
        end: Vec2,
        duration: f32,
        on_complete: Option<MoveCompletion>,
    ) {
        if !self.enabled {
            log::debug!("Comet {} ignoring move: already removed", self.id);
            return;
        }

        self.pos = start;
        let replaced = self.tracks.run(
            TrackKey::Move,
            Tween::Move {
                from: start,
                to: end,
                duration,
            },
        );
        if replaced {
            log::debug!("Comet {} move replaced", self.id);
        }
        self.on_move_complete = on_complete;
    }

    /// Stop the scripted move, if any. Its completion never fires.
    pub fn cancel_movement(&mut self) {
        self.tracks.remove(TrackKey::Move);
        self.on_move_complete = None;
    }

    pub fn is_moving(&self) -> bool {
        self.tracks.contains(TrackKey::Move)
    }

    // === Idle animation ===

    /// Start the endless spin and glow pulse
    pub fn begin_idle_animation(&mut self) {
        self.tracks.run(
            TrackKey::Rotation,
            Tween::Spin {
                start: self.sphere.rotation,
                period: ROTATION_PERIOD,
            },
        );
        self.tracks.run(
            TrackKey::GlowPulse,
            Tween::Pulse {
                from: self.glow.alpha,
                high: GLOW_ALPHA_HIGH,
                low: GLOW_ALPHA_LOW,
                period: GLOW_PULSE_PERIOD,
            },
        );
    }

    pub fn stop_idle_animation(&mut self) {
        self.tracks.remove(TrackKey::Rotation);
        self.tracks.remove(TrackKey::GlowPulse);
    }

    pub fn is_idle_animating(&self) -> bool {
        self.tracks.contains(TrackKey::Rotation) || self.tracks.contains(TrackKey::GlowPulse)
    }

    /// Advance all animation tracks by `dt`. Fires the move completion when
    /// the scripted move arrives.
    pub fn tick(&mut self, dt: f32) {
        let mut arrived = false;
        for frame in self.tracks.advance(dt) {
            match frame.value {
                Sample::Position(pos) => self.pos = pos,
                Sample::Rotation(angle) => self.sphere.rotation = angle,
                Sample::Alpha(alpha) => self.glow.alpha = alpha,
            }
            if frame.key == TrackKey::Move && frame.finished {
                arrived = true;
            }
        }

        if arrived {
            // Taken first so the callback is free to start another move
            if let Some(on_complete) = self.on_move_complete.take() {
                on_complete(self);
            }
        }
    }

    // === Removal ===

    /// Leave play without any effect. Returns false if already removed.
    pub fn request_plain_removal(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.lifecycle = Lifecycle::Removing;
        self.finish_removal();
        true
    }

    /// Blow up at the current position, then leave play.
    ///
    /// `host` is the scene layer the comet sits in. Without one the effects
    /// are skipped but the owner is still notified. Returns false if the
    /// comet was already removed.
    pub fn request_explode_and_remove(&mut self, host: Option<&mut EffectLayer>) -> bool {
        if !self.enabled {
            return false;
        }
        self.lifecycle = Lifecycle::Exploding;
        self.stop_idle_animation();

        match host {
            Some(layer) => {
                layer.spawn_explosion(self.pos, self.variant.kind);
                layer.spawn_burst(self.pos);
            }
            None => log::debug!("Comet {} exploded without an effect host", self.id),
        }

        self.finish_removal();
        true
    }

    /// Notify the owner and settle in `Removed`
    fn finish_removal(&mut self) {
        let via = self.lifecycle;
        debug_assert!(matches!(via, Lifecycle::Removing | Lifecycle::Exploding));
        self.enabled = false;
        self.cancel_movement();

        match self.owner.take().and_then(|owner| owner.upgrade()) {
            Some(owner) => owner.remove_comet(self.id),
            None => log::debug!("Comet {} removed with no owner left", self.id),
        }
        log::debug!("Comet {} removed via {:?}", self.id, via);
        self.lifecycle = Lifecycle::Removed;
    }
}

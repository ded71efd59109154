//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::comet::CometId;
use super::contact::{PhysicsBody, category};
use super::effects::{EffectId, EffectKind, EffectLayer};
use super::emitter::CometEmitter;
use super::variant::CometKind;
use crate::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Comets falling, player in control
    Playing,
    /// Game is paused
    Paused,
    /// Player hit a comet
    GameOver,
}

/// Something that happened during a tick, for audio/HUD hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CometLaunched { id: CometId, kind: CometKind },
    /// Comet hit the player and blew up
    CometExploded { id: CometId, kind: CometKind, pos: Vec2 },
    AwardCollected { id: CometId, bonus: u64 },
    /// Owner dropped the comet (every removal ends with this)
    CometRemoved { id: CometId },
    EffectFinished { id: EffectId, kind: EffectKind },
    GameOver { score: u64 },
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub body: PhysicsBody,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            body: PhysicsBody::circle(radius, category::PLAYER, category::NONE),
        }
    }

    /// Slide horizontally toward `target_x`, clamped to the field
    pub fn move_toward(&mut self, target_x: f32, dt: f32, max_speed: f32, half_width: f32) {
        let limit = (half_width - self.body.radius).max(0.0);
        let target = target_x.clamp(-limit, limit);
        let max_delta = max_speed * dt;
        self.pos.x += (target - self.pos.x).clamp(-max_delta, max_delta);
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub score: u64,
    /// Score from awards (added on top of survival time)
    pub bonus_score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds of play
    pub elapsed: f32,
    pub phase: GamePhase,
    pub player: Player,
    pub emitter: CometEmitter,
    /// Scene layer hosting explosion effects
    pub effects: EffectLayer,
    pub tuning: Tuning,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        // Player rides near the bottom of the field
        let player_y = -tuning.half_height() + tuning.field_height * 0.2;
        Self {
            seed,
            score: 0,
            bonus_score: 0,
            time_ticks: 0,
            elapsed: 0.0,
            phase: GamePhase::Playing,
            player: Player::new(Vec2::new(0.0, player_y), tuning.player_radius),
            emitter: CometEmitter::new(seed, tuning.clone()),
            effects: EffectLayer::new(),
            tuning,
        }
    }
}

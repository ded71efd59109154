//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by spawn order)
//! - No rendering or platform dependencies

pub mod comet;
pub mod contact;
pub mod effects;
pub mod emitter;
pub mod state;
pub mod tick;
pub mod track;
pub mod variant;

pub use comet::{BlendMode, Comet, CometId, CometOwner, HighlightNode, Lifecycle, MoveCompletion, SpriteNode};
pub use contact::{PhysicsBody, Rect, bodies_in_contact, category, sd_circle};
pub use effects::{EffectId, EffectKind, EffectLayer, EffectRemoved, ExplosionSprite, ParticleBurst};
pub use emitter::{CometEmitter, RemovalInbox};
pub use state::{GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
pub use track::{TrackKey, Tracks, Tween};
pub use variant::{AssetPair, CometKind, CometVariant, VisualTier};

//! Fixed timestep simulation tick
//!
//! Advances spawning, comet animation, contacts and effects in a fixed
//! order so a run replays identically from its seed.

use super::contact::bodies_in_contact;
use super::state::{GameEvent, GamePhase, GameState};
use super::variant::CometKind;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Where the player wants to be horizontally
    pub target_x: Option<f32>,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return events;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Effects keep playing after game over; everything else stops
    match state.phase {
        GamePhase::Paused => return events,
        GamePhase::GameOver => {
            advance_effects(state, dt, &mut events);
            return events;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.elapsed += dt;
    state.score = (state.elapsed * state.tuning.score_per_second) as u64 + state.bonus_score;

    if let Some(target_x) = input.target_x {
        let half_width = state.tuning.half_width();
        let speed = state.tuning.player_speed;
        state.player.move_toward(target_x, dt, speed, half_width);
    }

    for id in state.emitter.update(dt, state.score) {
        if let Some(comet) = state.emitter.comet(id) {
            events.push(GameEvent::CometLaunched { id, kind: comet.kind() });
        }
    }

    state.emitter.tick_comets(dt);

    // Contacts. A comet overlapping the player is reported every tick until
    // it is reaped; removal requests after the first are no-ops.
    let mut hit = false;
    for comet in state.emitter.comets_mut() {
        if !bodies_in_contact(comet.body(), comet.pos, &state.player.body, state.player.pos) {
            continue;
        }
        match comet.kind() {
            CometKind::Award => {
                if comet.request_plain_removal() {
                    state.bonus_score += state.tuning.award_bonus;
                    state.score += state.tuning.award_bonus;
                    events.push(GameEvent::AwardCollected {
                        id: comet.id(),
                        bonus: state.tuning.award_bonus,
                    });
                }
            }
            kind => {
                let pos = comet.pos;
                if comet.request_explode_and_remove(Some(&mut state.effects)) {
                    events.push(GameEvent::CometExploded {
                        id: comet.id(),
                        kind,
                        pos,
                    });
                    hit = true;
                }
            }
        }
    }

    state.emitter.cull_fallen();

    for id in state.emitter.reap() {
        events.push(GameEvent::CometRemoved { id });
    }

    advance_effects(state, dt, &mut events);

    if hit {
        state.phase = GamePhase::GameOver;
        state.emitter.enabled = false;
        log::info!("Game over at {:.1}s, score {}", state.elapsed, state.score);
        events.push(GameEvent::GameOver { score: state.score });
    }

    events
}

fn advance_effects(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    for removed in state.effects.advance(dt) {
        events.push(GameEvent::EffectFinished {
            id: removed.id,
            kind: removed.kind,
        });
    }
}

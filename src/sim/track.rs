//! Keyed animation tracks
//!
//! An entity runs at most one track per key. Keys drive different channels
//! (position, rotation, glow alpha), so removing one track never touches the
//! others. Starting a track on a busy key silently replaces the old one.

use glam::Vec2;

use crate::{ease_in_out, lerp, wrap_angle};

/// Animation channel identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKey {
    /// Scripted path move (position)
    Move,
    /// Continuous sphere rotation
    Rotation,
    /// Glow opacity pulse
    GlowPulse,
}

/// What a track animates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tween {
    /// Linear move, runs once
    Move { from: Vec2, to: Vec2, duration: f32 },
    /// Full turn every `period`, repeats forever
    Spin { start: f32, period: f32 },
    /// Fade to `high` then to `low`, each over half the period, eased, repeats forever.
    /// `from` is only the starting alpha of the very first fade.
    Pulse { from: f32, high: f32, low: f32, period: f32 },
}

impl Tween {
    fn repeats(&self) -> bool {
        !matches!(self, Tween::Move { .. })
    }
}

/// Sampled channel value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Position(Vec2),
    Rotation(f32),
    Alpha(f32),
}

/// Result of advancing a single track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub key: TrackKey,
    pub value: Sample,
    /// The track reached its end and has been dropped
    pub finished: bool,
}

#[derive(Debug, Clone)]
struct Track {
    key: TrackKey,
    tween: Tween,
    elapsed: f32,
}

impl Track {
    fn sample(&self) -> Sample {
        match self.tween {
            Tween::Move { from, to, duration } => {
                if duration <= 0.0 || self.elapsed >= duration {
                    Sample::Position(to)
                } else {
                    Sample::Position(from.lerp(to, self.elapsed / duration))
                }
            }
            Tween::Spin { start, period } => {
                let turns = if period > 0.0 { self.elapsed / period } else { 0.0 };
                Sample::Rotation(wrap_angle(start + turns * std::f32::consts::TAU))
            }
            Tween::Pulse { from, high, low, period } => {
                let half = period * 0.5;
                if half <= 0.0 {
                    return Sample::Alpha(low);
                }
                if self.elapsed < half {
                    Sample::Alpha(lerp(from, high, ease_in_out(self.elapsed / half)))
                } else {
                    let t = (self.elapsed - half) / half;
                    Sample::Alpha(lerp(high, low, ease_in_out(t)))
                }
            }
        }
    }

    /// Advance; returns true once a one-shot track has run its course
    fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        match &mut self.tween {
            Tween::Move { duration, .. } => self.elapsed >= *duration,
            Tween::Spin { period, .. } => {
                if *period > 0.0 && self.elapsed >= *period {
                    self.elapsed %= *period;
                }
                false
            }
            Tween::Pulse { from, low, period, .. } => {
                if *period > 0.0 && self.elapsed >= *period {
                    self.elapsed %= *period;
                    // Every cycle after the first starts from the low alpha
                    *from = *low;
                }
                false
            }
        }
    }
}

/// Set of independently keyed tracks on one entity
#[derive(Debug, Clone, Default)]
pub struct Tracks {
    tracks: Vec<Track>,
}

impl Tracks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween on `key`, replacing whatever ran there.
    /// Returns true if an existing track was replaced.
    pub fn run(&mut self, key: TrackKey, tween: Tween) -> bool {
        let replaced = self.remove(key);
        self.tracks.push(Track {
            key,
            tween,
            elapsed: 0.0,
        });
        replaced
    }

    /// Drop the track on `key`. Returns false if nothing was running.
    pub fn remove(&mut self, key: TrackKey) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.key != key);
        self.tracks.len() != before
    }

    pub fn contains(&self, key: TrackKey) -> bool {
        self.tracks.iter().any(|t| t.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Advance every track and sample it. Finished one-shot tracks are
    /// removed before this returns.
    pub fn advance(&mut self, dt: f32) -> Vec<Frame> {
        let mut frames = Vec::with_capacity(self.tracks.len());
        for track in &mut self.tracks {
            let finished = track.advance(dt) && !track.tween.repeats();
            frames.push(Frame {
                key: track.key,
                value: track.sample(),
                finished,
            });
        }
        if frames.iter().any(|f| f.finished) {
            self.tracks
                .retain(|t| !frames.iter().any(|f| f.finished && f.key == t.key));
        }
        frames
    }
}

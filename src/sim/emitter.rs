//! Comet emitter: spawns comets, owns them, and drops them on removal
//!
//! Comets report removal through a weak handle to the emitter's inbox.
//! The inbox is drained by `reap`, which is the only place comets are
//! actually dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::comet::{Comet, CometId, CometOwner};
use super::contact::Rect;
use super::variant::CometKind;
use crate::Tuning;

/// Removal notices waiting to be reaped
#[derive(Debug, Default)]
pub struct RemovalInbox {
    removed: RefCell<Vec<CometId>>,
}

impl CometOwner for RemovalInbox {
    fn remove_comet(&self, id: CometId) {
        self.removed.borrow_mut().push(id);
    }
}

impl RemovalInbox {
    fn drain(&self) -> Vec<CometId> {
        std::mem::take(&mut *self.removed.borrow_mut())
    }

    pub fn pending(&self) -> usize {
        self.removed.borrow().len()
    }
}

/// Spawns and owns the comets in play
#[derive(Debug)]
pub struct CometEmitter {
    comets: Vec<Comet>,
    inbox: Rc<RemovalInbox>,
    rng: Pcg32,
    tuning: Tuning,
    spawn_timer: f32,
    next_id: CometId,
    /// Spawning paused (existing comets keep moving)
    pub enabled: bool,
}

impl CometEmitter {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            comets: Vec::new(),
            inbox: Rc::new(RemovalInbox::default()),
            rng: Pcg32::seed_from_u64(seed),
            spawn_timer: 0.0,
            tuning,
            next_id: 1,
            enabled: true,
        }
    }

    fn owner_handle(&self) -> Weak<dyn CometOwner> {
        let inbox: Rc<dyn CometOwner> = self.inbox.clone();
        Rc::downgrade(&inbox)
    }

    /// Play field rectangle, centered on the origin
    pub fn field(&self) -> Rect {
        Rect::new(
            -self.tuning.half_width(),
            -self.tuning.half_height(),
            self.tuning.field_width,
            self.tuning.field_height,
        )
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Create a comet owned by this emitter. It sits at the origin until moved.
    pub fn spawn(&mut self, kind: CometKind, is_mirrored: bool, current_score: u64) -> CometId {
        let id = self.next_id;
        self.next_id += 1;
        let comet = Comet::new(id, kind, is_mirrored, current_score).with_owner(self.owner_handle());
        self.comets.push(comet);
        id
    }

    /// Spawn a random comet above the field and send it falling through.
    /// It removes itself when the path ends.
    pub fn launch_random(&mut self, current_score: u64) -> CometId {
        let roll = self.rng.random_range(0.0..self.tuning.weights.total().max(f32::EPSILON));
        let kind = self.tuning.weights.pick(roll);
        let is_mirrored = self.rng.random_bool(0.5);

        let radius = kind.radius();
        let half_w = self.tuning.half_width();
        let half_h = self.tuning.half_height();
        let x = if half_w > radius {
            self.rng.random_range(-half_w + radius..half_w - radius)
        } else {
            0.0
        };
        let start = Vec2::new(x, half_h + radius);
        let end = Vec2::new(x, -half_h - radius * 2.0);
        let duration = self.tuning.fall_duration(kind);

        let id = self.spawn(kind, is_mirrored, current_score);
        if let Some(comet) = self.comet_mut(id) {
            comet.move_from_to(
                start,
                end,
                duration,
                Some(Box::new(|comet: &mut Comet| {
                    comet.request_plain_removal();
                })),
            );
        }
        log::debug!("Launched comet {} ({:?}) at x={:.0}", id, kind, x);
        id
    }

    /// Run the spawn timer. Returns the ids launched this step.
    pub fn update(&mut self, dt: f32, current_score: u64) -> Vec<CometId> {
        let mut launched = Vec::new();
        if !self.enabled || self.tuning.spawn_interval <= 0.0 {
            return launched;
        }

        self.spawn_timer += dt;
        while self.spawn_timer >= self.tuning.spawn_interval {
            self.spawn_timer -= self.tuning.spawn_interval;
            if self.active_count() < self.tuning.max_comets {
                launched.push(self.launch_random(current_score));
            }
        }
        launched
    }

    /// Advance every comet's animation tracks
    pub fn tick_comets(&mut self, dt: f32) {
        for comet in &mut self.comets {
            comet.tick(dt);
        }
    }

    /// Plainly remove comets that have fallen entirely below the field
    pub fn cull_fallen(&mut self) {
        let field = self.field();
        for comet in &mut self.comets {
            if comet.is_enabled()
                && comet.pos.y < field.origin.y
                && !field.intersects_circle(comet.pos, comet.collision_radius())
            {
                comet.request_plain_removal();
            }
        }
    }

    /// Drop every comet that reported removal. Returns their ids in
    /// notification order.
    pub fn reap(&mut self) -> Vec<CometId> {
        let removed = self.inbox.drain();
        if !removed.is_empty() {
            self.comets.retain(|c| !removed.contains(&c.id()));
        }
        removed
    }

    pub fn comets(&self) -> &[Comet] {
        &self.comets
    }

    pub fn comets_mut(&mut self) -> &mut [Comet] {
        &mut self.comets
    }

    pub fn comet(&self, id: CometId) -> Option<&Comet> {
        self.comets.iter().find(|c| c.id() == id)
    }

    pub fn comet_mut(&mut self, id: CometId) -> Option<&mut Comet> {
        self.comets.iter_mut().find(|c| c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.comets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comets.is_empty()
    }

    /// Comets still in play (not yet removed)
    pub fn active_count(&self) -> usize {
        self.comets.iter().filter(|c| c.is_enabled()).count()
    }

    /// Removal notices not reaped yet
    pub fn pending_removals(&self) -> usize {
        self.inbox.pending()
    }
}

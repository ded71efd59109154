//! Physics bodies and contact detection
//!
//! Comets and the player are circles. Contacts are reported every tick the
//! shapes overlap, so a single hit usually shows up several times in a row.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Contact category bits
pub mod category {
    pub const NONE: u32 = 0;
    pub const PLAYER: u32 = 1 << 0;
    pub const COMET: u32 = 1 << 1;
    pub const AWARD: u32 = 1 << 2;
}

/// Axis-aligned rectangle (origin + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Whether a circle is at least partially inside the rect
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.origin, self.origin + self.size);
        (center - closest).length_squared() <= radius * radius
    }
}

/// Circular physics body with contact filtering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub radius: f32,
    pub category: u32,
    /// Categories that generate contact reports
    pub contact_mask: u32,
    /// Categories that generate collision response (none for comets)
    pub collision_mask: u32,
    pub affected_by_gravity: bool,
    pub precise: bool,
}

impl PhysicsBody {
    /// A sensor-style circle: reports contacts, never pushes anything
    pub fn circle(radius: f32, category: u32, contact_mask: u32) -> Self {
        Self {
            radius,
            category,
            contact_mask,
            collision_mask: category::NONE,
            affected_by_gravity: false,
            precise: true,
        }
    }

    /// Whether either side asked to be told about the other
    pub fn wants_contact_with(&self, other: &PhysicsBody) -> bool {
        self.contact_mask & other.category != 0 || other.contact_mask & self.category != 0
    }
}

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Check whether two bodies at the given positions are in contact
pub fn bodies_in_contact(a: &PhysicsBody, a_pos: Vec2, b: &PhysicsBody, b_pos: Vec2) -> bool {
    a.wants_contact_with(b) && sd_circle(a_pos, b_pos, b.radius) < a.radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_body_is_sensor() {
        let body = PhysicsBody::circle(63.0, category::COMET, category::PLAYER);
        assert_eq!(body.collision_mask, 0);
        assert!(!body.affected_by_gravity);
        assert!(body.precise);
    }

    #[test]
    fn test_contact_requires_mask() {
        let comet = PhysicsBody::circle(36.0, category::COMET, category::PLAYER);
        let other_comet = PhysicsBody::circle(36.0, category::COMET, category::PLAYER);
        let player = PhysicsBody::circle(20.0, category::PLAYER, category::NONE);

        assert!(bodies_in_contact(&comet, Vec2::ZERO, &player, Vec2::new(50.0, 0.0)));
        assert!(!bodies_in_contact(&comet, Vec2::ZERO, &player, Vec2::new(60.0, 0.0)));
        // Comets never report each other
        assert!(!bodies_in_contact(&comet, Vec2::ZERO, &other_comet, Vec2::ZERO));
    }

    #[test]
    fn test_rect_intersects_circle() {
        let field = Rect::new(-100.0, -100.0, 200.0, 200.0);
        assert!(field.intersects_circle(Vec2::ZERO, 1.0));
        assert!(field.intersects_circle(Vec2::new(0.0, -120.0), 25.0));
        assert!(!field.intersects_circle(Vec2::new(0.0, -130.0), 25.0));
    }
}

//! Constraint projector.
//!
//! The world boundary is a sum type: either a disc or an axis-aligned
//! rectangle, chosen at configuration. A single `apply` pass dispatches on
//! the variant and snaps every particle back to the nearest feasible point.
//!
//! Projection deliberately leaves `position_prev` alone: velocity is
//! implicit, so clamping the position bleeds energy out of the normal
//! component, which acts as perfectly plastic wall contact.

use crate::simulation::states::{NVec2, Particle};

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Circular region: particles stay within `radius` of `center`.
    Disc { center: NVec2, radius: f32 },
    /// Axis-aligned rectangle spanning `[0, size.x] x [0, size.y]`.
    Rect { size: NVec2 },
}

impl Constraint {
    /// Project every particle back inside the boundary.
    pub fn apply(&self, particles: &mut [Particle]) {
        match *self {
            Constraint::Disc { center, radius } => {
                for p in particles.iter_mut() {
                    let v = center - p.position;
                    let dist = v.magnitude();
                    if dist > radius - p.radius && dist > 0.0 {
                        // dist == 0 is ambiguous (no direction), leave in place
                        let n = v / dist;
                        p.position = center - n * (radius - p.radius);
                    }
                }
            }
            Constraint::Rect { size } => {
                for p in particles.iter_mut() {
                    if p.position.x < p.radius {
                        p.position.x = p.radius;
                    } else if p.position.x > size.x - p.radius {
                        p.position.x = size.x - p.radius;
                    }

                    if p.position.y < p.radius {
                        p.position.y = p.radius;
                    } else if p.position.y > size.y - p.radius {
                        p.position.y = size.y - p.radius;
                    }
                }
            }
        }
    }

    /// Axis-aligned bounds of the feasible region, `(min, max)`. Used by
    /// the host for camera placement and image-to-world mapping.
    pub fn bounds(&self) -> (NVec2, NVec2) {
        match *self {
            Constraint::Disc { center, radius } => (
                NVec2::new(center.x - radius, center.y - radius),
                NVec2::new(center.x + radius, center.y + radius),
            ),
            Constraint::Rect { size } => (NVec2::zeros(), size),
        }
    }
}

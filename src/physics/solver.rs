use super::Body;
use crate::math::{self as m, Unit};

/// Apply a collision impulse to a pair of colliding bodies.
///
/// `normal` must point from `b2` towards `b1`.
/// Only velocities are changed; overlapping bodies are not pushed apart.
///
/// Returns the magnitude of the applied impulse,
/// which is zero if both bodies are static or already separating.
pub fn resolve_contact(b1: &mut Body, b2: &mut Body, normal: Unit<m::Vec3>) -> f32 {
    if b1.is_static && b2.is_static {
        return 0.0;
    }

    let relative_vel = b1.velocity - b2.velocity;
    let normal_vel = relative_vel.dot(*normal);
    if normal_vel > 0.0 {
        return 0.0;
    }

    let restitution = (b1.restitution + b2.restitution) * 0.5;
    let inv_masses = [b1.inverse_mass(), b2.inverse_mass()];
    let impulse_magnitude = -(1.0 + restitution) * normal_vel / (inv_masses[0] + inv_masses[1]);

    let impulse = *normal * impulse_magnitude;
    if b1.is_dynamic() {
        b1.velocity += impulse * inv_masses[0];
    }
    if b2.is_dynamic() {
        b2.velocity -= impulse * inv_masses[1];
    }

    impulse_magnitude
}

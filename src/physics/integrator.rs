use super::Body;
use crate::math as m;

use thunderdome as td;

/// Move every non-static body forward by `dt` under `gravity`.
///
/// Semi-implicit Euler integration: velocity is updated first
/// and the new velocity is used to move the body.
/// Accumulated acceleration is consumed.
pub fn integrate(bodies: &mut td::Arena<Body>, gravity: m::Vec3, dt: f32) {
    for (_, body) in bodies.iter_mut() {
        if body.is_static {
            continue;
        }
        body.acceleration += gravity;
        body.velocity += body.acceleration * dt;
        body.position += body.velocity * dt;
        body.acceleration = m::Vec3::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_before_position() {
        let mut bodies = td::Arena::new();
        let key = bodies.insert(Body::new(m::Vec3::zero(), 1.0).with_velocity(m::Vec3::unit_x()));
        let gravity = m::Vec3::new(0.0, -10.0, 0.0);

        integrate(&mut bodies, gravity, 0.5);
        let body = bodies[key];
        assert_eq!(body.velocity, m::Vec3::new(1.0, -5.0, 0.0));
        // position moves with the updated velocity, not the initial one
        assert_eq!(body.position, m::Vec3::new(0.5, -2.5, 0.0));
        assert_eq!(body.acceleration, m::Vec3::zero());
    }

    #[test]
    fn accumulated_acceleration_is_consumed() {
        let mut bodies = td::Arena::new();
        let mut body = Body::new(m::Vec3::zero(), 1.0);
        body.acceleration = m::Vec3::new(2.0, 0.0, 0.0);
        let key = bodies.insert(body);

        integrate(&mut bodies, m::Vec3::zero(), 1.0);
        assert_eq!(bodies[key].velocity, m::Vec3::new(2.0, 0.0, 0.0));
        integrate(&mut bodies, m::Vec3::zero(), 1.0);
        assert_eq!(bodies[key].velocity, m::Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn static_bodies_dont_move() {
        let mut bodies = td::Arena::new();
        let mut wall = Body::new_static(m::Vec3::new(0.0, -1.0, 0.0));
        wall.velocity = m::Vec3::new(3.0, 0.0, 0.0);
        let key = bodies.insert(wall);

        integrate(&mut bodies, m::Vec3::new(0.0, -9.81, 0.0), 0.1);
        assert_eq!(bodies[key].position, m::Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(bodies[key].velocity, m::Vec3::new(3.0, 0.0, 0.0));
    }
}

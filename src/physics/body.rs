use crate::math as m;

/// Restitution given to bodies that don't specify their own.
pub const DEFAULT_RESTITUTION: f32 = 0.5;

/// A body is a point mass that moves under gravity and collides with other bodies.
/// Its shape is stored separately in the [`World`][super::World].
///
/// Bodies carry no rotational state.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Body {
    #[cfg_attr(feature = "serde-types", serde(with = "m::serde_vec3"))]
    pub position: m::Vec3,
    #[cfg_attr(feature = "serde-types", serde(with = "m::serde_vec3"))]
    pub velocity: m::Vec3,
    /// Acceleration accumulated for the next step.
    /// Reset to zero after every step.
    #[cfg_attr(feature = "serde-types", serde(with = "m::serde_vec3"))]
    pub acceleration: m::Vec3,
    pub mass: Mass,
    /// How much energy is retained in collisions, from 0 (none) to 1 (all).
    ///
    /// The restitution of a contact is the average of the two bodies' values.
    pub restitution: f32,
    /// Static bodies are never moved by the integrator
    /// and act as if they had infinite mass in collisions.
    pub is_static: bool,
}

impl Body {
    /// Create a dynamic body at rest.
    pub fn new(position: m::Vec3, mass: f32) -> Self {
        Self {
            position,
            velocity: m::Vec3::zero(),
            acceleration: m::Vec3::zero(),
            mass: Mass::new(mass),
            restitution: DEFAULT_RESTITUTION,
            is_static: false,
        }
    }

    /// Create a static body. The mass is irrelevant for static bodies
    /// and set to 1 in case the body is later made dynamic.
    pub fn new_static(position: m::Vec3) -> Self {
        Self {
            is_static: true,
            ..Self::new(position, 1.0)
        }
    }

    /// Set the velocity of the body in a builder-like chain.
    pub fn with_velocity(mut self, vel: m::Vec3) -> Self {
        self.velocity = vel;
        self
    }

    /// Set the restitution of the body in a builder-like chain.
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        !self.is_static
    }

    /// Get the inverse of the mass, which is zero if the body is static.
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static {
            0.0
        } else {
            self.mass.inv()
        }
    }
}

/// This stores both a mass value and its inverse, because calculating inverse mass
/// is expensive and needed a lot in physics calculations.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "f32", into = "f32")
)]
pub struct Mass {
    mass: f32,
    inverse: f32,
}

impl Mass {
    pub fn new(mass: f32) -> Self {
        Mass {
            mass,
            inverse: 1.0 / mass,
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv(&self) -> f32 {
        self.inverse
    }
}

impl From<f32> for Mass {
    #[inline]
    fn from(mass: f32) -> Self {
        Mass::new(mass)
    }
}

impl From<Mass> for f32 {
    #[inline]
    fn from(mass: Mass) -> Self {
        mass.mass
    }
}

use crate::math as m;

/// Radius of the sphere every body starts out with.
pub const DEFAULT_SPHERE_RADIUS: f32 = 0.5;

/// The physical shape of a body.
///
/// Boxes are always axis-aligned.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Shape {
    Sphere {
        r: f32,
    },
    /// The box stores its side lengths halved because this makes
    /// intersection tests easier.
    Box {
        #[cfg_attr(feature = "serde-types", serde(with = "m::serde_vec3"))]
        half_extents: m::Vec3,
    },
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Sphere {
            r: DEFAULT_SPHERE_RADIUS,
        }
    }
}

impl Shape {
    /// Create a sphere from a radius.
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere { r: radius }
    }

    /// Create a box from its half side lengths.
    pub fn cuboid(half_extents: m::Vec3) -> Self {
        Shape::Box { half_extents }
    }

    /// Create a box with all sides set to the same length.
    pub fn cube(side_length: f32) -> Self {
        Shape::cuboid(m::Vec3::broadcast(side_length / 2.0))
    }

    /// Half the side lengths of the smallest axis-aligned box containing the shape.
    pub fn aabb_half_extents(&self) -> m::Vec3 {
        match *self {
            Shape::Sphere { r } => m::Vec3::broadcast(r),
            Shape::Box { half_extents } => half_extents,
        }
    }
}

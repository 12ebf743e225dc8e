//! Types, aliases and helper operations for doing math with `ultraviolet`.
pub use ultraviolet as uv;

pub type Vec3 = uv::Vec3;

/// A wrapper type to indicate a vector should always be normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit<T>(T);

impl Unit<Vec3> {
    /// Normalize `v`, or return `None` if it has zero length
    /// and thus no direction.
    pub fn try_new(v: Vec3) -> Option<Self> {
        let mag = v.mag();
        if mag > 0.0 {
            Some(Unit(v / mag))
        } else {
            None
        }
    }

    pub const fn new_unchecked(v: Vec3) -> Self {
        Unit(v)
    }

    pub fn unit_x() -> Self {
        Unit(Vec3::unit_x())
    }

    pub fn unit_y() -> Self {
        Unit(Vec3::unit_y())
    }

    pub fn unit_z() -> Self {
        Unit(Vec3::unit_z())
    }
}

impl<T> std::ops::Deref for Unit<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::Neg for Unit<T>
where
    T: std::ops::Neg,
{
    type Output = Unit<<T as std::ops::Neg>::Output>;

    fn neg(self) -> Self::Output {
        Unit(-self.0)
    }
}

/// Componentwise absolute value.
#[inline]
pub fn abs(v: Vec3) -> Vec3 {
    Vec3::new(v.x.abs(), v.y.abs(), v.z.abs())
}

/// Clamp every component of `v` to the box spanning `center ± half_extents`.
///
/// The result is the point of the box closest to `v`.
#[inline]
pub fn clamp_to_box(v: Vec3, center: Vec3, half_extents: Vec3) -> Vec3 {
    let min = center - half_extents;
    let max = center + half_extents;
    Vec3::new(
        v.x.min(max.x).max(min.x),
        v.y.min(max.y).max(min.y),
        v.z.min(max.z).max(min.z),
    )
}

/// Module to (de)serialize `Vec3`s as plain `[x, y, z]` triples,
/// using the serde attribute `#[serde(with = "serde_vec3")]`.
#[cfg(feature = "serde-types")]
pub mod serde_vec3 {
    use super::*;

    pub fn serialize<S>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::Serialize;
        <[f32; 3]>::from(*v).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec3, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize;
        <[f32; 3]>::deserialize(deserializer).map(Vec3::from)
    }
}

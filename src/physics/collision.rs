//! Detecting intersections between the shapes of bodies.

mod shape;
pub use shape::{Shape, DEFAULT_SPHERE_RADIUS};

pub mod broadphase;
pub use broadphase::{BroadPhase, BruteForce};

pub mod narrowphase;
pub use narrowphase::{intersection_check, Contact};

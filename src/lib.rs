//! A small rigid body physics core: spheres and axis-aligned boxes
//! falling under gravity and bouncing off each other.
//!
//! # Example
//! ```
//! use rigidframe::{math::Vec3, World};
//!
//! let mut world = World::new(16).unwrap();
//! let floor = world.create_body(Vec3::new(0.0, -1.0, 0.0), 1.0).unwrap();
//! world.add_box_shape(floor, Vec3::new(10.0, 0.5, 10.0)).unwrap();
//! world.set_body_static(floor, true).unwrap();
//!
//! let ball = world.create_body(Vec3::new(0.0, 2.0, 0.0), 1.0).unwrap();
//! for _ in 0..60 {
//!     world.step(1.0 / 60.0);
//! }
//! assert!(world.get_body(ball).unwrap().position.y < 2.0);
//! ```

/// Start a profiling span that lasts until the returned value is dropped.
/// Does nothing unless the `tracy` feature is enabled and a client is running.
macro_rules! tracy_span {
    ($name:expr, $fn_name:expr) => {
        tracy_client::Client::running()
            .map(|client| client.span_alloc(Some($name), $fn_name, file!(), line!(), 0))
    };
}

pub mod math;
pub use math::{uv, Unit, Vec3};

pub mod physics;
pub use physics::{
    body::{Body, Mass},
    collision::{self, Shape},
    listener::{CollisionListener, ContactEvent, EventSink},
    BodyKey, ContactInfo, World, WorldError, WorldParams,
};

use crate::math::{self as m, Unit};

use thunderdome as td;

//

pub mod body;
pub use body::{Body, Mass, DEFAULT_RESTITUTION};

pub mod collision;
use collision::{intersection_check, BroadPhase};
pub use collision::{Shape, DEFAULT_SPHERE_RADIUS};

mod integrator;

pub mod listener;
pub use listener::{CollisionListener, ContactEvent, EventSink};

pub mod solver;

//

/// Gravity of a freshly created world, in metres per second squared.
pub fn default_gravity() -> m::Vec3 {
    m::Vec3::new(0.0, -9.81, 0.0)
}

/// Bodies are addressed by 32-bit arena slots.
const MAX_CAPACITY: usize = u32::MAX as usize;

/// Key type to look up a body stored in the physics world.
///
/// Keys stay valid until the world is shut down.
/// Keys from before a shutdown are rejected even if the slot they point to
/// has been filled again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyKey {
    idx: td::Index,
    epoch: u32,
}

impl BodyKey {
    /// Get the underlying [`thunderdome::Index`][thunderdome::Index] of this key.
    #[inline]
    pub fn index(&self) -> td::Index {
        self.idx
    }

    /// The position of the body in creation order.
    /// Bodies are tested for collisions in this order.
    #[inline]
    pub fn slot(&self) -> u32 {
        self.idx.slot()
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum WorldError {
    #[error("A physics world needs room for at least one body")]
    ZeroCapacity,
    #[error("Requested room for {requested} bodies, but at most {max} are supported")]
    CapacityOverflow { requested: usize, max: usize },
    #[error("The physics world is full ({capacity} bodies)")]
    AtCapacity { capacity: usize },
    #[error("No body exists for key {0:?}")]
    InvalidBody(BodyKey),
    #[error("Could not allocate storage for {requested} bodies")]
    AllocationFailed { requested: usize },
}

/// Parameters for the creation of a physics world.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WorldParams {
    /// Number of bodies the world has room for.
    /// Storage is allocated once up front and never grows.
    pub capacity: usize,
    /// Acceleration applied to every non-static body each step.
    #[cfg_attr(feature = "serde-types", serde(with = "m::serde_vec3"))]
    pub gravity: m::Vec3,
    /// Restitution given to new bodies.
    pub default_restitution: f32,
    /// Shape given to new bodies.
    pub default_shape: Shape,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            capacity: 256,
            gravity: default_gravity(),
            default_restitution: DEFAULT_RESTITUTION,
            default_shape: Shape::default(),
        }
    }
}

/// Record of a collision detected during the last step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactInfo {
    /// The colliding bodies, in creation order.
    pub bodies: [BodyKey; 2],
    /// The normal of the contact, facing towards `bodies[0]`.
    pub normal: Unit<m::Vec3>,
    /// How deep the shapes overlapped.
    pub depth: f32,
    /// The strength of the impulse caused by the contact.
    /// Zero if the bodies were already moving apart or both were static.
    pub impulse: f32,
}

/// A fixed-capacity collection of bodies and their shapes
/// that moves under gravity and bounces off itself.
pub struct World {
    // bodies, shapes and listeners share keys.
    // bodies are never removed, so slots 0..len are all occupied
    bodies: td::Arena<Body>,
    shapes: td::Arena<Shape>,
    listeners: td::Arena<Box<dyn CollisionListener>>,
    capacity: usize,
    gravity: m::Vec3,
    params: WorldParams,
    // bumped on shutdown to invalidate old keys
    epoch: u32,
    contacts: Vec<ContactInfo>,
}

impl World {
    /// Create a world with room for `max_bodies` bodies and default parameters.
    pub fn new(max_bodies: usize) -> Result<Self, WorldError> {
        Self::with_params(WorldParams {
            capacity: max_bodies,
            ..Default::default()
        })
    }

    /// Create a world. See [`WorldParams`][self::WorldParams] for explanation.
    pub fn with_params(params: WorldParams) -> Result<Self, WorldError> {
        let mut world = World {
            bodies: td::Arena::new(),
            shapes: td::Arena::new(),
            listeners: td::Arena::new(),
            capacity: 0,
            gravity: params.gravity,
            params,
            epoch: 0,
            contacts: Vec::new(),
        };
        world.init(params.capacity)?;
        Ok(world)
    }

    /// (Re)initialize the world with room for `max_bodies` bodies,
    /// dropping all existing bodies and resetting gravity.
    ///
    /// On error the world is left shut down.
    pub fn init(&mut self, max_bodies: usize) -> Result<(), WorldError> {
        self.shutdown();
        if max_bodies == 0 {
            return Err(WorldError::ZeroCapacity);
        }
        if max_bodies > MAX_CAPACITY {
            return Err(WorldError::CapacityOverflow {
                requested: max_bodies,
                max: MAX_CAPACITY,
            });
        }

        // arenas abort on allocation failure, so make sure the memory is there first
        let alloc_failed = |_: std::collections::TryReserveError| WorldError::AllocationFailed {
            requested: max_bodies,
        };
        let mut contacts: Vec<ContactInfo> = Vec::new();
        contacts.try_reserve_exact(max_bodies).map_err(alloc_failed)?;
        {
            let mut bodies: Vec<Body> = Vec::new();
            let mut shapes: Vec<Shape> = Vec::new();
            let mut listeners: Vec<Box<dyn CollisionListener>> = Vec::new();
            bodies.try_reserve_exact(max_bodies).map_err(alloc_failed)?;
            shapes.try_reserve_exact(max_bodies).map_err(alloc_failed)?;
            listeners.try_reserve_exact(max_bodies).map_err(alloc_failed)?;
        }

        self.bodies = td::Arena::with_capacity(max_bodies);
        self.shapes = td::Arena::with_capacity(max_bodies);
        self.listeners = td::Arena::with_capacity(max_bodies);
        self.contacts = contacts;
        self.capacity = max_bodies;
        self.params.capacity = max_bodies;
        self.gravity = self.params.gravity;
        log::debug!("physics world initialized with room for {} bodies", max_bodies);
        Ok(())
    }

    /// Drop all bodies and release their storage.
    /// The world must be [`init`][Self::init]ialized again before it can hold bodies.
    pub fn shutdown(&mut self) {
        if !self.is_initialized() {
            return;
        }
        self.bodies = td::Arena::new();
        self.shapes = td::Arena::new();
        self.listeners = td::Arena::new();
        self.contacts = Vec::new();
        self.capacity = 0;
        self.epoch = self.epoch.wrapping_add(1);
        log::debug!("physics world shut down");
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.capacity > 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bodies in the world.
    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn gravity(&self) -> m::Vec3 {
        self.gravity
    }

    /// Replace the gravity applied from the next step onwards.
    #[inline]
    pub fn set_gravity(&mut self, gravity: m::Vec3) {
        self.gravity = gravity;
    }

    //
    // Entity management
    //

    /// Insert a dynamic body at rest with the default shape and restitution.
    pub fn create_body(&mut self, position: m::Vec3, mass: f32) -> Result<BodyKey, WorldError> {
        if self.bodies.len() >= self.capacity {
            log::warn!(
                "tried to create a body in a full physics world ({} bodies)",
                self.capacity
            );
            return Err(WorldError::AtCapacity {
                capacity: self.capacity,
            });
        }

        let body = Body::new(position, mass).with_restitution(self.params.default_restitution);
        let idx = self.bodies.insert(body);
        self.shapes.insert_at(idx, self.params.default_shape);
        Ok(self.key(idx))
    }

    /// Access a body in the world, if the key is valid.
    #[inline]
    pub fn get_body(&self, key: BodyKey) -> Option<&Body> {
        self.valid_index(key).and_then(|idx| self.bodies.get(idx))
    }

    /// Mutably access a body in the world, if the key is valid.
    #[inline]
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.valid_index(key).and_then(|idx| self.bodies.get_mut(idx))
    }

    /// Access the shape of a body, if the key is valid.
    #[inline]
    pub fn get_shape(&self, key: BodyKey) -> Option<&Shape> {
        self.valid_index(key).and_then(|idx| self.shapes.get(idx))
    }

    /// Iterate over all bodies and their shapes in creation order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &Body, &Shape)> + '_ {
        self.bodies
            .iter()
            .filter_map(move |(idx, body)| Some((self.key(idx), body, self.shapes.get(idx)?)))
    }

    pub fn set_body_velocity(&mut self, key: BodyKey, velocity: m::Vec3) -> Result<(), WorldError> {
        self.body_mut(key)?.velocity = velocity;
        Ok(())
    }

    pub fn set_body_position(&mut self, key: BodyKey, position: m::Vec3) -> Result<(), WorldError> {
        self.body_mut(key)?.position = position;
        Ok(())
    }

    /// Static bodies don't move and act as if they had infinite mass.
    pub fn set_body_static(&mut self, key: BodyKey, is_static: bool) -> Result<(), WorldError> {
        self.body_mut(key)?.is_static = is_static;
        Ok(())
    }

    pub fn set_body_restitution(
        &mut self,
        key: BodyKey,
        restitution: f32,
    ) -> Result<(), WorldError> {
        self.body_mut(key)?.restitution = restitution;
        Ok(())
    }

    /// Add to the acceleration of a body for the next step only.
    pub fn apply_acceleration(
        &mut self,
        key: BodyKey,
        acceleration: m::Vec3,
    ) -> Result<(), WorldError> {
        self.body_mut(key)?.acceleration += acceleration;
        Ok(())
    }

    /// Replace the shape of a body.
    pub fn set_shape(&mut self, key: BodyKey, shape: Shape) -> Result<(), WorldError> {
        let idx = self.valid_index(key).ok_or(WorldError::InvalidBody(key))?;
        self.shapes.insert_at(idx, shape);
        Ok(())
    }

    /// Replace the shape of a body with a sphere.
    pub fn add_sphere_shape(&mut self, key: BodyKey, radius: f32) -> Result<(), WorldError> {
        self.set_shape(key, Shape::sphere(radius))
    }

    /// Replace the shape of a body with an axis-aligned box.
    pub fn add_box_shape(&mut self, key: BodyKey, half_extents: m::Vec3) -> Result<(), WorldError> {
        self.set_shape(key, Shape::cuboid(half_extents))
    }

    /// Attach a listener to a body, replacing any previous one.
    /// It is called during [`step`][Self::step] for every collision the body takes part in.
    pub fn set_collision_listener(
        &mut self,
        key: BodyKey,
        listener: impl CollisionListener + 'static,
    ) -> Result<(), WorldError> {
        let idx = self.valid_index(key).ok_or(WorldError::InvalidBody(key))?;
        self.listeners.insert_at(idx, Box::new(listener));
        Ok(())
    }

    /// Remove the listener attached to a body, if any.
    pub fn clear_collision_listener(&mut self, key: BodyKey) -> Result<(), WorldError> {
        let idx = self.valid_index(key).ok_or(WorldError::InvalidBody(key))?;
        self.listeners.remove(idx);
        Ok(())
    }

    #[inline]
    fn key(&self, idx: td::Index) -> BodyKey {
        BodyKey {
            idx,
            epoch: self.epoch,
        }
    }

    #[inline]
    fn valid_index(&self, key: BodyKey) -> Option<td::Index> {
        if key.epoch == self.epoch && self.bodies.contains(key.idx) {
            Some(key.idx)
        } else {
            None
        }
    }

    #[inline]
    fn body_mut(&mut self, key: BodyKey) -> Result<&mut Body, WorldError> {
        self.get_body_mut(key).ok_or(WorldError::InvalidBody(key))
    }

    //
    // Simulation
    //

    /// Advance the simulation by `dt`.
    ///
    /// First every non-static body is moved under gravity,
    /// then every pair of bodies is tested for collision in creation order.
    /// For each colliding pair, listeners of both bodies are called
    /// and then an impulse is applied to push the bodies' velocities apart.
    pub fn step(&mut self, dt: f32) {
        self.contacts.clear();

        {
            let _span = tracy_span!("integrate", "step");
            integrator::integrate(&mut self.bodies, self.gravity, dt);
        }

        let _span = tracy_span!("collide", "step");
        let count = self.bodies.len() as u32;
        for [slot1, slot2] in collision::BruteForce::pairs(count) {
            let (Some(idx1), Some(idx2)) = (
                self.bodies.contains_slot(slot1),
                self.bodies.contains_slot(slot2),
            ) else {
                continue;
            };
            let (Some(b1), Some(b2), Some(s1), Some(s2)) = (
                self.bodies.get(idx1),
                self.bodies.get(idx2),
                self.shapes.get(idx1),
                self.shapes.get(idx2),
            ) else {
                continue;
            };
            let Some(contact) = intersection_check(b1.position, s1, b2.position, s2) else {
                continue;
            };

            let event = ContactEvent {
                body: self.key(idx1),
                other: self.key(idx2),
                normal: contact.normal,
                velocity: b1.velocity,
                other_velocity: b2.velocity,
            };
            self.notify(&event);

            let impulse = match self.bodies.get2_mut(idx1, idx2) {
                (Some(b1), Some(b2)) => solver::resolve_contact(b1, b2, contact.normal),
                _ => 0.0,
            };
            log::trace!(
                "contact between bodies {} and {}, depth {}, impulse {}",
                slot1,
                slot2,
                contact.depth,
                impulse
            );
            self.contacts.push(ContactInfo {
                bodies: [event.body, event.other],
                normal: contact.normal,
                depth: contact.depth,
                impulse,
            });
        }
    }

    fn notify(&mut self, event: &ContactEvent) {
        if let Some(listener) = self.listeners.get_mut(event.body.idx) {
            listener.on_contact(event);
        }
        let flipped = event.flipped();
        if let Some(listener) = self.listeners.get_mut(flipped.body.idx) {
            listener.on_contact(&flipped);
        }
    }

    /// Contacts detected during the last [`step`][Self::step], in detection order.
    ///
    /// The log has room for as many contacts as the world has bodies
    /// and only grows when a step finds more contacts than any step before it.
    #[inline]
    pub fn contacts(&self) -> &[ContactInfo] {
        &self.contacts
    }
}

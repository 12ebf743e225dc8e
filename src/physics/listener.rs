use super::BodyKey;
use crate::math::{self as m, Unit};

/// Event delivered to a body's [`CollisionListener`] when it collides with another body.
///
/// Listeners run before the collision impulse is applied,
/// so the velocities here are the ones the bodies collided with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactEvent {
    /// The body the listener is attached to.
    pub body: BodyKey,
    /// The body that was collided with.
    pub other: BodyKey,
    /// The normal of the contact, facing towards `body`.
    pub normal: Unit<m::Vec3>,
    /// Velocity of `body` at the time of contact.
    pub velocity: m::Vec3,
    /// Velocity of `other` at the time of contact.
    pub other_velocity: m::Vec3,
}

impl ContactEvent {
    /// The same contact from the point of view of the other body.
    pub fn flipped(&self) -> Self {
        Self {
            body: self.other,
            other: self.body,
            normal: -self.normal,
            velocity: self.other_velocity,
            other_velocity: self.velocity,
        }
    }
}

/// Something that wants to know when a body collides with another.
///
/// Implemented for all closures taking a `&ContactEvent`.
pub trait CollisionListener {
    fn on_contact(&mut self, event: &ContactEvent);
}

impl<F> CollisionListener for F
where
    F: FnMut(&ContactEvent),
{
    fn on_contact(&mut self, event: &ContactEvent) {
        self(event)
    }
}

/// A listener that collects every event it receives, for polling after a step.
///
/// Clones share the same buffer, so keep one clone and give another to the world.
#[derive(Clone, Debug, Default)]
pub struct EventSink {
    events: std::rc::Rc<std::cell::RefCell<Vec<ContactEvent>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all events received so far.
    pub fn drain(&self) -> Vec<ContactEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl CollisionListener for EventSink {
    fn on_contact(&mut self, event: &ContactEvent) {
        self.events.borrow_mut().push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thunderdome as td;

    #[test]
    fn sink_clones_share_events() {
        let mut arena = td::Arena::new();
        let k1 = BodyKey {
            idx: arena.insert(()),
            epoch: 0,
        };
        let k2 = BodyKey {
            idx: arena.insert(()),
            epoch: 0,
        };
        let event = ContactEvent {
            body: k1,
            other: k2,
            normal: Unit::unit_x(),
            velocity: m::Vec3::zero(),
            other_velocity: m::Vec3::unit_y(),
        };

        let sink = EventSink::new();
        let mut listener = sink.clone();
        listener.on_contact(&event);
        listener.on_contact(&event.flipped());
        assert!(!sink.is_empty());

        let events = sink.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], event);
        assert_eq!(events[1].body, k2);
        assert_eq!(*events[1].normal, -m::Vec3::unit_x());
        assert!(sink.is_empty());
        assert!(listener.drain().is_empty());
    }
}

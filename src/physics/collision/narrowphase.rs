use super::Shape;
use crate::math::{self as m, Unit};

/// An intersection between two objects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// The normal, facing away from obj2 towards obj1
    pub normal: Unit<m::Vec3>,
    /// Penetration depth along the normal
    pub depth: f32,
}

/// Checks two shapes at the given positions for intersection.
pub fn intersection_check(
    pos1: m::Vec3,
    shape1: &Shape,
    pos2: m::Vec3,
    shape2: &Shape,
) -> Option<Contact> {
    use Shape::*;
    match (*shape1, *shape2) {
        (Sphere { r: r1 }, Sphere { r: r2 }) => sphere_sphere(pos1, r1, pos2, r2),
        (Sphere { r }, Box { half_extents }) => sphere_box(pos1, r, pos2, half_extents),
        (Box { half_extents }, Sphere { r }) => {
            sphere_box(pos2, r, pos1, half_extents).map(flip_contact)
        }
        (
            Box {
                half_extents: half1,
            },
            Box {
                half_extents: half2,
            },
        ) => box_box(pos1, half1, pos2, half2),
    }
}

fn flip_contact(c: Contact) -> Contact {
    Contact {
        normal: -c.normal,
        depth: c.depth,
    }
}

//
// SPHERE <-> SPHERE
//

fn sphere_sphere(pos1: m::Vec3, r1: f32, pos2: m::Vec3, r2: f32) -> Option<Contact> {
    let dist = pos1 - pos2;
    let dist_mag = dist.mag();
    let r_sum = r1 + r2;
    if dist_mag >= r_sum {
        return None;
    }

    // same position, consider penetration to be on the y axis
    let normal = Unit::try_new(dist).unwrap_or_else(Unit::unit_y);
    Some(Contact {
        normal,
        depth: r_sum - dist_mag,
    })
}

//
// SPHERE <-> BOX
//

fn sphere_box(
    pos_sphere: m::Vec3,
    r: f32,
    pos_box: m::Vec3,
    half_extents: m::Vec3,
) -> Option<Contact> {
    let closest = m::clamp_to_box(pos_sphere, pos_box, half_extents);
    let dist = pos_sphere - closest;
    let dist_mag = dist.mag();
    if dist_mag >= r {
        return None;
    }

    // sphere center is inside the box, push straight up
    let normal = Unit::try_new(dist).unwrap_or_else(Unit::unit_y);
    Some(Contact {
        normal,
        depth: r - dist_mag,
    })
}

//
// BOX <-> BOX
//

fn box_box(pos1: m::Vec3, half1: m::Vec3, pos2: m::Vec3, half2: m::Vec3) -> Option<Contact> {
    let dist = pos1 - pos2;
    let overlap = (half1 + half2) - m::abs(dist);
    if overlap.x <= 0.0 || overlap.y <= 0.0 || overlap.z <= 0.0 {
        return None;
    }

    // separate along the axis of least penetration
    let sign = |d: f32| if d > 0.0 { 1.0 } else { -1.0 };
    let (normal, depth) = if overlap.x < overlap.y && overlap.x < overlap.z {
        (m::Vec3::new(sign(dist.x), 0.0, 0.0), overlap.x)
    } else if overlap.y < overlap.z {
        (m::Vec3::new(0.0, sign(dist.y), 0.0), overlap.y)
    } else {
        (m::Vec3::new(0.0, 0.0, sign(dist.z)), overlap.z)
    };

    Some(Contact {
        normal: Unit::new_unchecked(normal),
        depth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_normal(contact: Option<Contact>, expected: m::Vec3) {
        let contact = contact.expect("shapes should intersect");
        assert!(
            (*contact.normal - expected).mag() < 0.0001,
            "expected normal {:?}, got {:?}",
            expected,
            *contact.normal
        );
    }

    #[test]
    fn sphere_sphere_threshold() {
        let a = Shape::sphere(0.5);
        let b = Shape::sphere(1.0);
        // exactly touching is not a collision
        assert!(intersection_check(
            m::Vec3::zero(),
            &a,
            m::Vec3::new(1.5, 0.0, 0.0),
            &b
        )
        .is_none());
        let c = intersection_check(m::Vec3::zero(), &a, m::Vec3::new(1.4, 0.0, 0.0), &b);
        assert_normal(c, m::Vec3::new(-1.0, 0.0, 0.0));
        assert!((c.unwrap().depth - 0.1).abs() < 0.0001);
        assert!(intersection_check(
            m::Vec3::zero(),
            &a,
            m::Vec3::new(0.0, 0.0, 2.0),
            &b
        )
        .is_none());
    }

    #[test]
    fn coincident_spheres_push_up() {
        let s = Shape::sphere(0.5);
        let p = m::Vec3::new(3.0, -2.0, 1.0);
        let c = intersection_check(p, &s, p, &s);
        assert_normal(c, m::Vec3::unit_y());
        assert!(c.unwrap().normal.x.is_finite());
    }

    #[test]
    fn sphere_box_normals() {
        let sphere = Shape::sphere(0.5);
        let cube = Shape::cuboid(m::Vec3::one());
        let sphere_pos = m::Vec3::new(0.0, 1.3, 0.0);

        // sphere first: normal points from the box to the sphere
        assert_normal(
            intersection_check(sphere_pos, &sphere, m::Vec3::zero(), &cube),
            m::Vec3::unit_y(),
        );
        // box first: mirrored
        assert_normal(
            intersection_check(m::Vec3::zero(), &cube, sphere_pos, &sphere),
            -m::Vec3::unit_y(),
        );
        // out of reach
        assert!(intersection_check(
            m::Vec3::new(0.0, 1.6, 0.0),
            &sphere,
            m::Vec3::zero(),
            &cube
        )
        .is_none());
        // near a corner, the normal points diagonally away from it
        let corner = m::Vec3::new(1.2, 1.2, 1.2);
        assert_normal(
            intersection_check(corner, &sphere, m::Vec3::zero(), &cube),
            m::Vec3::one().normalized(),
        );
    }

    #[test]
    fn sphere_inside_box() {
        let c = intersection_check(
            m::Vec3::new(0.2, -0.3, 0.1),
            &Shape::sphere(0.1),
            m::Vec3::zero(),
            &Shape::cube(2.0),
        );
        assert_normal(c, m::Vec3::unit_y());
        assert_normal(
            intersection_check(
                m::Vec3::zero(),
                &Shape::cube(2.0),
                m::Vec3::new(0.2, -0.3, 0.1),
                &Shape::sphere(0.1),
            ),
            -m::Vec3::unit_y(),
        );
    }

    #[test]
    fn box_box_min_penetration_axis() {
        let cube = Shape::cuboid(m::Vec3::one());
        let c = intersection_check(
            m::Vec3::zero(),
            &cube,
            m::Vec3::new(1.5, 0.2, 0.0),
            &cube,
        );
        assert_normal(c, m::Vec3::new(-1.0, 0.0, 0.0));
        assert!((c.unwrap().depth - 0.5).abs() < 0.0001);

        assert_normal(
            intersection_check(
                m::Vec3::new(0.1, 0.0, 1.8),
                &cube,
                m::Vec3::zero(),
                &cube,
            ),
            m::Vec3::unit_z(),
        );

        // touching faces don't count
        assert!(intersection_check(
            m::Vec3::zero(),
            &cube,
            m::Vec3::new(0.0, 2.0, 0.0),
            &cube
        )
        .is_none());
    }

    #[test]
    fn box_box_ties() {
        let cube = Shape::cuboid(m::Vec3::one());
        // equal overlap on x and y resolves to y
        assert_normal(
            intersection_check(
                m::Vec3::zero(),
                &cube,
                m::Vec3::new(1.0, 1.0, 0.0),
                &cube,
            ),
            -m::Vec3::unit_y(),
        );
        // equal overlap everywhere resolves to z,
        // and zero offset along that axis points in the negative direction
        assert_normal(
            intersection_check(m::Vec3::zero(), &cube, m::Vec3::zero(), &cube),
            -m::Vec3::unit_z(),
        );
    }
}

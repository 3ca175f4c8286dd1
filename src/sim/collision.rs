//! Pairwise collision response between competitors
//!
//! Bit cars are discs of radius `size`. Overlapping pairs exchange an impulse
//! along the line of centers, derived from the 1-D momentum-conserving
//! collision formula:
//!
//! ```text
//! v1' = v1 - m2 * [(1 + e1*e2) / (m1 + m2) * (v1 - v2)·d] * d * (r / |d|) * damping
//! v2' = v2 + m1 * [(1 + e1*e2) / (m1 + m2) * (v1 - v2)·d] * d * (r / |d|) * damping
//! ```
//!
//! `d` is the unnormalized center offset and `r` the contact radius, so the
//! push grows the deeper two cars overlap.
//!
//! Pairs are resolved one after another (ascending i, then ascending j < i)
//! and each pair sees the velocities left by the pairs before it. This is an
//! order-dependent approximation, not a simultaneous solve.

use glam::Vec3;
use rand::Rng;

use super::competitor::Competitor;
use crate::tuning::Tuning;

/// Geometry of an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Center offset from the first body to the second
    pub offset: Vec3,
    /// Length of `offset`
    pub distance: f32,
    /// Sum of both radii
    pub contact_radius: f32,
}

/// Check whether two competitors touch; `None` when apart
pub fn find_contact(a: &Competitor, b: &Competitor) -> Option<Contact> {
    let offset = b.position - a.position;
    let distance = offset.length();
    let contact_radius = a.archetype.size() + b.archetype.size();
    if distance > contact_radius {
        return None;
    }
    Some(Contact {
        offset,
        distance,
        contact_radius,
    })
}

/// Impulse per unit of partner mass for an overlapping pair
///
/// `distance` must be positive; callers floor it before calling.
pub fn pair_impulse(a: &Competitor, b: &Competitor, contact: &Contact, damping: f32) -> Vec3 {
    let total_mass = a.archetype.mass() + b.archetype.mass();
    let restitution = 1.0 + a.archetype.restitution() * b.archetype.restitution();
    let closing = (a.velocity - b.velocity).dot(contact.offset);
    let softener = contact.contact_radius / contact.distance * damping;
    contact.offset * (restitution / total_mass * closing * softener)
}

/// Resolve one pair in place; returns true if they were touching
///
/// A pair of one competitor with itself, out-of-range indices and dead
/// competitors are all skipped.
pub fn resolve_pair<R: Rng + ?Sized>(
    roster: &mut [Competitor],
    i: usize,
    j: usize,
    tuning: &Tuning,
    rng: &mut R,
) -> bool {
    if i == j || i >= roster.len() || j >= roster.len() {
        return false;
    }
    let (a, b) = pair_mut(roster, i, j);
    if !a.is_alive() || !b.is_alive() {
        return false;
    }
    let Some(mut contact) = find_contact(a, b) else {
        return false;
    };

    if contact.distance < tuning.degenerate_distance {
        // Centers (nearly) coincide: nudge apart before the impulse blows up
        contact.offset.x += rng.random::<f32>() * tuning.jitter_magnitude;
        a.velocity.y += rng.random::<f32>() * tuning.jitter_magnitude;
        contact.distance = contact.offset.length().max(tuning.degenerate_distance);
        log::debug!("Jittered coincident pair {} / {}", a.name, b.name);
    }

    let impulse = pair_impulse(a, b, &contact, tuning.collision_damping);
    let (mass_a, mass_b) = (a.archetype.mass(), b.archetype.mass());
    a.velocity -= impulse * mass_b;
    b.velocity += impulse * mass_a;
    true
}

/// Resolve every touching pair once; returns the number of contacts
pub fn resolve_all<R: Rng + ?Sized>(roster: &mut [Competitor], tuning: &Tuning, rng: &mut R) -> usize {
    let mut contacts = 0;
    for i in 0..roster.len() {
        for j in 0..i {
            if resolve_pair(roster, i, j, tuning, rng) {
                contacts += 1;
            }
        }
    }
    contacts
}

/// Borrow two distinct roster entries mutably, in (i, j) order
fn pair_mut(roster: &mut [Competitor], i: usize, j: usize) -> (&mut Competitor, &mut Competitor) {
    if i > j {
        let (lo, hi) = roster.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    } else {
        let (lo, hi) = roster.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    }
}

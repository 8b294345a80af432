//! Free-space bubbles
//!
//! A [`Bubble`] certifies that a region around its center is obstacle free.
//! The region is a per-axis scaled L1 ball (a diamond in 2-D, an octahedron in
//! 3-D): a point `p` lies inside when `sum_i |p_i - c_i| / radius_i <= 1`.
//! Each axis carries its own radius, derived from how sensitive that joint is
//! to obstacle proximity.

use crate::space::Configuration;

/// Handle of a bubble inside a tree's bubble arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BubbleId(pub usize);

/// A certified free-space region around one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    center: Configuration,
    radius: Configuration,
    clearance: f64,
    /// Bubble this one was reached from; `None` for roots and unlinked bubbles
    pub parent: Option<BubbleId>,
    /// Sample index the bubble was built for; `None` for bisection mid-bubbles
    pub sample: Option<usize>,
}

impl Bubble {
    /// Create an unshrunk bubble: every radius starts unconstrained (infinite)
    pub fn new(center: Configuration, clearance: f64) -> Self {
        let radius = Configuration::from_element(center.len(), f64::INFINITY);
        Self {
            center,
            radius,
            clearance,
            parent: None,
            sample: None,
        }
    }

    /// Center configuration
    pub fn center(&self) -> &Configuration {
        &self.center
    }

    /// Per-axis radii
    pub fn radius(&self) -> &Configuration {
        &self.radius
    }

    /// Obstacle distance measured while building the bubble
    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    /// Tighten the radius of `axis` to at most `value`
    ///
    /// Negative values clamp to zero.
    pub fn shrink_axis(&mut self, axis: usize, value: f64) {
        let value = value.max(0.0);
        if value < self.radius[axis] {
            self.radius[axis] = value;
        }
    }

    /// Whether the bubble may be linked into a tree
    ///
    /// Requires a finite positive clearance and non-negative radii.
    pub fn is_valid(&self) -> bool {
        self.clearance.is_finite()
            && self.clearance > 0.0
            && self.radius.iter().all(|r| !r.is_nan() && *r >= 0.0)
    }

    /// Point where the ray from the center along `direction` leaves the bubble
    ///
    /// Returns `center + direction / S` with `S = sum_i |d_i| / radius_i`.
    /// `None` when `S` is zero or not finite: a zero direction, a direction
    /// that only touches unbounded axes, or a zero radius along a used axis.
    pub fn hull_intersection(&self, direction: &Configuration) -> Option<Configuration> {
        let scale = self.scaled_norm(direction);
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        Some(&self.center + direction / scale)
    }

    /// Hull intersection toward `target`
    pub fn hull_toward(&self, target: &Configuration) -> Option<Configuration> {
        self.hull_intersection(&(target - &self.center))
    }

    /// `sum_i |offset_i| / radius_i`, skipping axes the offset does not use
    fn scaled_norm(&self, offset: &Configuration) -> f64 {
        offset
            .iter()
            .zip(self.radius.iter())
            .filter(|(d, _)| **d != 0.0)
            .map(|(d, r)| d.abs() / r)
            .sum()
    }
}

/// Overlap test along the segment between two centers
///
/// The hull points are where each bubble stops along the segment; the segment
/// is fully covered when the two reaches together span the center distance.
pub fn reaches(
    center_a: &Configuration,
    hull_a: &Configuration,
    center_b: &Configuration,
    hull_b: &Configuration,
) -> bool {
    (hull_a - center_a).norm() + (hull_b - center_b).norm() >= (center_b - center_a).norm()
}

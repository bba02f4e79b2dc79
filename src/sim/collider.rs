//! Convex collider shapes and Separating Axis Theorem overlap tests
//!
//! Colliders are defined in actor-local space and never mutated. Queries work
//! on world-space copies produced by [`Collider::transformed`]; the geometry
//! here is stateless and knows nothing about actors or wrapping.
//!
//! Concave outlines are built by the caller from several convex colliders.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ColliderError;
use crate::rotate_deg;

/// Normals closer than this (component-wise) are treated as the same axis
const AXIS_EPSILON: f32 = 1e-6;

/// A convex collision shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    /// Convex polygon with one outward unit normal per unique edge direction
    Polygon { vertices: Vec<Vec2>, normals: Vec<Vec2> },
    /// Circle at `center` (relative to the owner)
    Circle { center: Vec2, radius: f32 },
}

impl Collider {
    /// Build a polygon, deriving its normals from the edges.
    ///
    /// Panics on invalid geometry; use [`Collider::try_polygon`] for data that
    /// did not come from a fixed shape table.
    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        Self::try_polygon(vertices).unwrap_or_else(|e| panic!("invalid polygon collider: {e}"))
    }

    pub fn try_polygon(vertices: Vec<Vec2>) -> Result<Self, ColliderError> {
        validate_vertices(&vertices)?;
        let normals = calculate_normals(&vertices);
        Ok(Collider::Polygon { vertices, normals })
    }

    /// Build a polygon with explicitly supplied separating axes
    pub fn try_polygon_with_normals(
        vertices: Vec<Vec2>,
        normals: Vec<Vec2>,
    ) -> Result<Self, ColliderError> {
        validate_vertices(&vertices)?;
        if normals.len() > vertices.len() {
            return Err(ColliderError::TooManyNormals {
                normals: normals.len(),
                vertices: vertices.len(),
            });
        }
        if let Some(i) = normals.iter().position(|n| (n.length() - 1.0).abs() > 1e-4) {
            return Err(ColliderError::NonUnitNormal(i));
        }
        Ok(Collider::Polygon { vertices, normals })
    }

    /// Build a circle. Panics if the radius is not positive.
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self::try_circle(center, radius).unwrap_or_else(|e| panic!("invalid circle collider: {e}"))
    }

    pub fn try_circle(center: Vec2, radius: f32) -> Result<Self, ColliderError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(ColliderError::InvalidRadius(radius));
        }
        Ok(Collider::Circle { center, radius })
    }

    /// World-space copy: rotated by `rotation` degrees, then moved to `position`
    pub fn transformed(&self, position: Vec2, rotation: f32) -> Self {
        match self {
            Collider::Polygon { vertices, normals } => Collider::Polygon {
                vertices: vertices.iter().map(|v| rotate_deg(*v, rotation) + position).collect(),
                normals: normals.iter().map(|n| rotate_deg(*n, rotation)).collect(),
            },
            Collider::Circle { center, radius } => Collider::Circle {
                center: rotate_deg(*center, rotation) + position,
                radius: *radius,
            },
        }
    }

    /// Copy shifted by `offset` (used for wrap ghosts)
    pub fn translated(&self, offset: Vec2) -> Self {
        match self {
            Collider::Polygon { vertices, normals } => Collider::Polygon {
                vertices: vertices.iter().map(|v| *v + offset).collect(),
                normals: normals.clone(),
            },
            Collider::Circle { center, radius } => Collider::Circle {
                center: *center + offset,
                radius: *radius,
            },
        }
    }

    /// Copy scaled about the local origin. `k` must be positive.
    pub fn scaled(&self, k: f32) -> Self {
        match self {
            Collider::Polygon { vertices, normals } => Collider::Polygon {
                vertices: vertices.iter().map(|v| *v * k).collect(),
                normals: normals.clone(),
            },
            Collider::Circle { center, radius } => Collider::Circle {
                center: *center * k,
                radius: *radius * k,
            },
        }
    }

    /// Distance from the local origin to the farthest point of the shape
    pub fn reach(&self) -> f32 {
        match self {
            Collider::Polygon { vertices, .. } => {
                vertices.iter().map(|v| v.length()).fold(0.0, f32::max)
            }
            Collider::Circle { center, radius } => center.length() + radius,
        }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Collider::Circle { .. })
    }
}

fn validate_vertices(vertices: &[Vec2]) -> Result<(), ColliderError> {
    if vertices.len() < 3 {
        return Err(ColliderError::TooFewVertices(vertices.len()));
    }
    if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
        return Err(ColliderError::NonFiniteVertex(i));
    }
    Ok(())
}

/// Derive separating axes from consecutive vertex pairs (wrapping).
///
/// Each edge is turned a quarter and normalized. Axes that repeat an existing
/// axis or its negation are dropped, so collinear and parallel edges share one
/// axis. Zero-length edges contribute nothing.
pub fn calculate_normals(vertices: &[Vec2]) -> Vec<Vec2> {
    let mut normals: Vec<Vec2> = Vec::with_capacity(vertices.len());
    for (i, v) in vertices.iter().enumerate() {
        let edge = *v - vertices[(i + 1) % vertices.len()];
        let Some(normal) = Vec2::new(-edge.y, edge.x).try_normalize() else {
            continue;
        };
        let duplicate = normals
            .iter()
            .any(|n| n.abs_diff_eq(normal, AXIS_EPSILON) || n.abs_diff_eq(-normal, AXIS_EPSILON));
        if !duplicate {
            normals.push(normal);
        }
    }
    normals
}

/// Interval overlap rule used on every axis.
///
/// Deliberately asymmetric at the boundary: an interval whose minimum sits
/// exactly on the other's maximum does not count as overlapping, so shapes
/// that only touch are reported apart.
#[inline]
pub fn intervals_overlap(min1: f32, max1: f32, min2: f32, max2: f32) -> bool {
    (min1 < max2 && min1 >= min2) || (min2 < max1 && min2 >= min1)
}

/// Project points onto an axis, returning `(min, max)`
fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    points.iter().fold((f32::MAX, f32::NEG_INFINITY), |(min, max), p| {
        let d = p.dot(axis);
        (min.min(d), max.max(d))
    })
}

/// Circle extremes along an axis
#[inline]
fn circle_extremes(center: Vec2, radius: f32, axis: Vec2) -> [Vec2; 2] {
    [center + axis * radius, center - axis * radius]
}

fn check_axis(points: &[Vec2], other: &[Vec2], axis: Vec2) -> bool {
    let (min1, max1) = project(points, axis);
    let (min2, max2) = project(other, axis);
    intervals_overlap(min1, max1, min2, max2)
}

/// SAT overlap test between two world-space colliders.
///
/// Both arguments must already be transformed into world space.
pub fn overlaps(a: &Collider, b: &Collider) -> bool {
    match (a, b) {
        (
            Collider::Polygon { vertices: va, normals: na },
            Collider::Polygon { vertices: vb, normals: nb },
        ) => na.iter().chain(nb.iter()).all(|axis| check_axis(va, vb, *axis)),
        (Collider::Circle { center, radius }, Collider::Polygon { vertices, normals })
        | (Collider::Polygon { vertices, normals }, Collider::Circle { center, radius }) => {
            circle_polygon_overlap(*center, *radius, vertices, normals)
        }
        (
            Collider::Circle { center: ca, radius: ra },
            Collider::Circle { center: cb, radius: rb },
        ) => {
            let axis = (*ca - *cb).try_normalize().unwrap_or(Vec2::X);
            check_axis(
                &circle_extremes(*ca, *ra, axis),
                &circle_extremes(*cb, *rb, axis),
                axis,
            )
        }
    }
}

fn circle_polygon_overlap(center: Vec2, radius: f32, vertices: &[Vec2], normals: &[Vec2]) -> bool {
    let on_normals = normals
        .iter()
        .all(|axis| check_axis(&circle_extremes(center, radius, *axis), vertices, *axis));
    if !on_normals {
        return false;
    }

    // Axis from the circle centre toward the nearest vertex catches the
    // corner regions polygon normals alone cannot separate.
    let nearest = vertices
        .iter()
        .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)));
    match nearest.and_then(|v| (*v - center).try_normalize()) {
        Some(axis) => check_axis(&circle_extremes(center, radius, axis), vertices, axis),
        None => true,
    }
}

/// Whether any collider of one set overlaps any collider of the other
pub fn any_overlap(a: &[Collider], b: &[Collider]) -> bool {
    a.iter().any(|ca| b.iter().any(|cb| overlaps(ca, cb)))
}

/// Farthest polygon vertex from the local origin across a collider set.
///
/// Circles are not considered, matching how the broad-phase radius has always
/// been computed for polygon outlines. See [`Collider::reach`] for the
/// circle-aware variant.
pub fn get_radius(colliders: &[Collider]) -> f32 {
    colliders
        .iter()
        .filter_map(|c| match c {
            Collider::Polygon { vertices, .. } => Some(vertices),
            Collider::Circle { .. } => None,
        })
        .flatten()
        .map(|v| v.length())
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(center: Vec2, half: f32) -> Collider {
        Collider::polygon(vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ])
        .transformed(center, 0.0)
    }

    fn circle_at(x: f32, y: f32, r: f32) -> Collider {
        Collider::circle(Vec2::new(x, y), r)
    }

    #[test]
    fn test_square_penetration_overlaps() {
        let a = square(Vec2::ZERO, 10.0);
        let b = square(Vec2::new(15.0, 0.0), 10.0);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_square_gap_does_not_overlap() {
        let a = square(Vec2::ZERO, 10.0);
        let b = square(Vec2::new(25.0, 0.0), 10.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_touching_squares_are_apart() {
        let a = square(Vec2::ZERO, 10.0);
        let b = square(Vec2::new(20.0, 0.0), 10.0);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_circle_circle_literals() {
        assert!(overlaps(&circle_at(0.0, 0.0, 5.0), &circle_at(9.0, 0.0, 5.0)));
        assert!(!overlaps(&circle_at(0.0, 0.0, 5.0), &circle_at(11.0, 0.0, 5.0)));
        // Exactly touching: projected intervals share only an endpoint
        assert!(!overlaps(&circle_at(0.0, 0.0, 5.0), &circle_at(10.0, 0.0, 5.0)));
        assert!(!overlaps(&circle_at(10.0, 0.0, 5.0), &circle_at(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_coincident_circles_overlap() {
        assert!(overlaps(&circle_at(3.0, 3.0, 1.0), &circle_at(3.0, 3.0, 2.0)));
    }

    #[test]
    fn test_interval_rule_boundaries() {
        assert!(!intervals_overlap(0.0, 10.0, 10.0, 20.0));
        assert!(intervals_overlap(0.0, 10.0, 9.0, 20.0));
        assert!(intervals_overlap(0.0, 10.0, 0.0, 10.0));
        assert!(intervals_overlap(2.0, 3.0, 0.0, 10.0));
    }

    #[test]
    fn test_circle_polygon_corner_gap() {
        // Circle diagonally off the square's corner: the face normals overlap
        // but the corner axis separates them.
        let sq = square(Vec2::ZERO, 10.0);
        let c = circle_at(14.0, 14.0, 5.0);
        assert!(!overlaps(&sq, &c));
        assert!(!overlaps(&c, &sq));
        assert!(overlaps(&sq, &circle_at(13.0, 0.0, 5.0)));
    }

    #[test]
    fn test_normals_deduplicate_parallel_edges() {
        let sq = Collider::polygon(vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]);
        let Collider::Polygon { normals, .. } = sq else {
            panic!("expected polygon");
        };
        assert_eq!(normals.len(), 2);
        for n in normals {
            assert!((n.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_normals_merge_collinear_edges() {
        // Midpoint on the bottom edge makes two collinear edges
        let verts = vec![
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_eq!(calculate_normals(&verts).len(), 3);
    }

    #[test]
    fn test_triangle_has_three_normals() {
        let verts = vec![Vec2::new(0.0, -25.0), Vec2::new(15.0, 15.0), Vec2::new(0.0, 10.0)];
        assert_eq!(calculate_normals(&verts).len(), 3);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            Collider::try_polygon(vec![Vec2::ZERO, Vec2::X]).unwrap_err(),
            ColliderError::TooFewVertices(2)
        );
        assert_eq!(
            Collider::try_circle(Vec2::ZERO, -1.0).unwrap_err(),
            ColliderError::InvalidRadius(-1.0)
        );
        assert!(Collider::try_circle(Vec2::ZERO, 0.0).is_err());
        assert!(matches!(
            Collider::try_polygon(vec![Vec2::ZERO, Vec2::X, Vec2::new(f32::NAN, 0.0)]),
            Err(ColliderError::NonFiniteVertex(2))
        ));
    }

    #[test]
    fn test_explicit_normals_validated() {
        let tri = vec![Vec2::ZERO, Vec2::X, Vec2::Y];
        assert!(matches!(
            Collider::try_polygon_with_normals(tri.clone(), vec![Vec2::X; 4]),
            Err(ColliderError::TooManyNormals { normals: 4, vertices: 3 })
        ));
        assert_eq!(
            Collider::try_polygon_with_normals(tri.clone(), vec![Vec2::new(2.0, 0.0)]).unwrap_err(),
            ColliderError::NonUnitNormal(0)
        );
        assert!(Collider::try_polygon_with_normals(tri, vec![Vec2::X, Vec2::Y]).is_ok());
    }

    #[test]
    #[should_panic(expected = "invalid polygon collider")]
    fn test_polygon_fails_fast() {
        Collider::polygon(vec![Vec2::ZERO]);
    }

    #[test]
    fn test_transform_leaves_original_untouched() {
        let local = Collider::polygon(vec![Vec2::new(0.0, -10.0), Vec2::new(10.0, 10.0), Vec2::new(-10.0, 10.0)]);
        let before = local.clone();
        let world = local.transformed(Vec2::new(100.0, 50.0), 90.0);
        assert_eq!(local, before);
        let Collider::Polygon { vertices, .. } = world else {
            panic!("expected polygon");
        };
        // (0,-10) rotated 90 degrees lands on (10, 0)
        assert!(vertices[0].abs_diff_eq(Vec2::new(110.0, 50.0), 1e-4));
    }

    #[test]
    fn test_get_radius_ignores_circles() {
        let cols = vec![
            Collider::polygon(vec![Vec2::new(3.0, 4.0), Vec2::new(-1.0, 0.0), Vec2::new(0.0, -1.0)]),
            Collider::circle(Vec2::ZERO, 50.0),
        ];
        assert_eq!(get_radius(&cols), 5.0);
        assert_eq!(cols[1].reach(), 50.0);
        assert_eq!(get_radius(&[]), 0.0);
    }

    #[test]
    fn test_any_overlap_empty_sets() {
        let sq = square(Vec2::ZERO, 10.0);
        assert!(!any_overlap(&[], &[sq.clone()]));
        assert!(!any_overlap(&[sq], &[]));
    }

    fn arb_collider() -> impl Strategy<Value = Collider> {
        let circle = (-50.0f32..50.0, -50.0f32..50.0, 0.5f32..30.0)
            .prop_map(|(x, y, r)| Collider::circle(Vec2::new(x, y), r));
        let poly = (3usize..9, 1.0f32..30.0, -50.0f32..50.0, -50.0f32..50.0, 0.0f32..360.0).prop_map(
            |(n, r, x, y, rot)| {
                // Regular n-gon is always convex
                let verts = (0..n)
                    .map(|i| Vec2::from_angle(i as f32 * std::f32::consts::TAU / n as f32) * r)
                    .collect();
                Collider::polygon(verts).transformed(Vec2::new(x, y), rot)
            },
        );
        prop_oneof![circle, poly]
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_collider(), b in arb_collider()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_radius_scales_linearly(k in 0.1f32..10.0, n in 3usize..12, r in 1.0f32..40.0) {
            let verts: Vec<Vec2> = (0..n)
                .map(|i| Vec2::from_angle(i as f32 * 0.7) * (r + i as f32))
                .collect();
            let cols = vec![Collider::polygon(verts)];
            let scaled: Vec<Collider> = cols.iter().map(|c| c.scaled(k)).collect();
            let expected = get_radius(&cols) * k;
            prop_assert!((get_radius(&scaled) - expected).abs() <= expected * 1e-5);
        }
    }
}

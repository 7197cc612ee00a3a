// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    boolean::clip_vertex::ClipArena,
    error::{BudgetExceeded, IncompleteTraversal, StepBudget},
    geometry::{point::Point2, util::polygon_signed_area},
    kernel::predicates::point_in_polygon,
    numeric::scalar::Scalar,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Intersection,
    Difference,
    ExclusiveOr,
}

/// How the two inputs sit relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonRelation {
    Crossing,
    Disjoint,
    AInsideB,
    BInsideA,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipOutcome<T: Scalar> {
    /// Counter-clockwise loops, except hole loops of a difference taken
    /// against a contained polygon, which wind clockwise.
    pub polygons: Vec<Vec<Point2<T>>>,
    pub relation: PolygonRelation,
}

impl<T: Scalar> ClipOutcome<T> {
    fn empty(relation: PolygonRelation) -> Self {
        Self {
            polygons: Vec::new(),
            relation,
        }
    }

    /// Net area: counter-clockwise loops add, clockwise loops subtract.
    pub fn signed_area(&self) -> T {
        self.polygons
            .iter()
            .fold(T::zero(), |acc, p| acc + polygon_signed_area(p))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipOptions {
    /// Vertex visits allowed across every traversal of one operation.
    pub traversal_budget: usize,
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self {
            traversal_budget: StepBudget::DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Error)]
pub enum BooleanError<T: Scalar> {
    #[error("polygon {polygon} has {count} vertices, at least 3 are required")]
    TooFewVertices { polygon: char, count: usize },
    #[error("degenerate configuration near ({x}, {y}): a vertex touches the other boundary or edges overlap")]
    Degenerate { x: f64, y: f64 },
    #[error("{0}")]
    Incomplete(IncompleteTraversal<ClipOutcome<T>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Intersection,
    Difference,
    Outline,
}

/// Boolean operations on simple polygons, implemented for point slices.
pub trait PolygonBoolean<T: Scalar> {
    fn boolean(&self, other: &Self, op: BooleanOp) -> Result<ClipOutcome<T>, BooleanError<T>>;
}

impl<T: Scalar> PolygonBoolean<T> for [Point2<T>] {
    fn boolean(&self, other: &Self, op: BooleanOp) -> Result<ClipOutcome<T>, BooleanError<T>> {
        clip(self, other, op, &ClipOptions::default())
    }
}

/// Greiner-Hormann clipping of two simple counter-clockwise polygons.
///
/// Intersection and difference come straight out of one traversal each.
/// Exclusive-or is `A - B` plus `B - A`, and union is the intersection
/// plus both differences, so the pieces tile the union without overlap.
/// See [`union_outline`] for the union as a single boundary.
#[instrument(skip_all, fields(a = a.len(), b = b.len(), op = ?op))]
pub fn clip<T: Scalar>(
    a: &[Point2<T>],
    b: &[Point2<T>],
    op: BooleanOp,
    options: &ClipOptions,
) -> Result<ClipOutcome<T>, BooleanError<T>> {
    check_sizes(a, b)?;
    let mut budget = StepBudget::new(options.traversal_budget);

    let runs: &[(bool, Mode)] = match op {
        BooleanOp::Intersection => &[(false, Mode::Intersection)],
        BooleanOp::Difference => &[(false, Mode::Difference)],
        BooleanOp::ExclusiveOr => &[(false, Mode::Difference), (true, Mode::Difference)],
        BooleanOp::Union => &[
            (false, Mode::Intersection),
            (false, Mode::Difference),
            (true, Mode::Difference),
        ],
    };

    let mut polygons = Vec::new();
    let mut relation = None;
    for &(swapped, mode) in runs {
        let (x, y) = if swapped { (b, a) } else { (a, b) };
        match run(x, y, mode, &mut budget) {
            Ok(outcome) => {
                polygons.extend(outcome.polygons);
                relation = relation.or(Some(outcome.relation));
            }
            Err(BooleanError::Incomplete(incomplete)) => {
                let relation = relation.unwrap_or(PolygonRelation::Crossing);
                return Err(BooleanError::Incomplete(incomplete.map(|partial| {
                    polygons.extend(partial.polygons);
                    ClipOutcome { polygons, relation }
                })));
            }
            Err(other) => return Err(other),
        }
    }

    let outcome = ClipOutcome {
        polygons,
        relation: relation.unwrap_or(PolygonRelation::Crossing),
    };
    debug!(loops = outcome.polygons.len(), relation = ?outcome.relation, "polygons clipped");
    Ok(outcome)
}

/// Union of two simple counter-clockwise polygons as outer boundaries
/// only: one loop when they cross, the larger one when nested, both when
/// disjoint. Pockets enclosed by both inputs are not reported.
#[instrument(skip_all, fields(a = a.len(), b = b.len()))]
pub fn union_outline<T: Scalar>(
    a: &[Point2<T>],
    b: &[Point2<T>],
    options: &ClipOptions,
) -> Result<ClipOutcome<T>, BooleanError<T>> {
    check_sizes(a, b)?;
    let mut budget = StepBudget::new(options.traversal_budget);
    run(a, b, Mode::Outline, &mut budget)
}

fn check_sizes<T: Scalar>(a: &[Point2<T>], b: &[Point2<T>]) -> Result<(), BooleanError<T>> {
    for (polygon, points) in [('A', a), ('B', b)] {
        if points.len() < 3 {
            return Err(BooleanError::TooFewVertices {
                polygon,
                count: points.len(),
            });
        }
    }
    Ok(())
}

fn run<T: Scalar>(
    a: &[Point2<T>],
    b: &[Point2<T>],
    mode: Mode,
    budget: &mut StepBudget,
) -> Result<ClipOutcome<T>, BooleanError<T>> {
    let mut arena = ClipArena::new(a, b);
    if let Err(degenerate) = arena.insert_intersections() {
        warn!("degenerate polygon configuration rejected");
        return Err(BooleanError::Degenerate {
            x: degenerate.at.x().as_f64(),
            y: degenerate.at.y().as_f64(),
        });
    }

    if !arena.has_intersections() {
        return Ok(nested_or_disjoint(a, b, mode));
    }

    arena.mark_entries();
    match traverse(&mut arena, mode, budget) {
        Ok(polygons) => Ok(ClipOutcome {
            polygons,
            relation: PolygonRelation::Crossing,
        }),
        Err((cause, polygons)) => {
            warn!(%cause, "polygon clipping stopped early");
            Err(BooleanError::Incomplete(IncompleteTraversal::new(
                cause,
                ClipOutcome {
                    polygons,
                    relation: PolygonRelation::Crossing,
                },
            )))
        }
    }
}

/// Result when the boundaries never cross.
fn nested_or_disjoint<T: Scalar>(a: &[Point2<T>], b: &[Point2<T>], mode: Mode) -> ClipOutcome<T> {
    let relation = if point_in_polygon(&a[0], b) {
        PolygonRelation::AInsideB
    } else if point_in_polygon(&b[0], a) {
        PolygonRelation::BInsideA
    } else {
        PolygonRelation::Disjoint
    };

    let mut outcome = ClipOutcome::empty(relation);
    match (mode, relation) {
        (Mode::Intersection, PolygonRelation::AInsideB) => outcome.polygons.push(a.to_vec()),
        (Mode::Intersection, PolygonRelation::BInsideA) => outcome.polygons.push(b.to_vec()),
        (Mode::Difference, PolygonRelation::BInsideA) => {
            let mut hole = b.to_vec();
            hole.reverse();
            outcome.polygons.push(a.to_vec());
            outcome.polygons.push(hole);
        }
        (Mode::Difference, PolygonRelation::Disjoint) => outcome.polygons.push(a.to_vec()),
        (Mode::Outline, PolygonRelation::AInsideB) => outcome.polygons.push(b.to_vec()),
        (Mode::Outline, PolygonRelation::BInsideA) => outcome.polygons.push(a.to_vec()),
        (Mode::Outline, PolygonRelation::Disjoint) => {
            outcome.polygons.push(a.to_vec());
            outcome.polygons.push(b.to_vec());
        }
        _ => {}
    }
    outcome
}

/// First intersection node of polygon 0 a traversal may start from.
fn next_start<T: Scalar>(arena: &ClipArena<T>, mode: Mode) -> Option<usize> {
    arena.ring(0).into_iter().find(|&i| {
        let v = &arena.vertices[i];
        let wanted = match mode {
            Mode::Intersection | Mode::Difference => v.is_entry,
            Mode::Outline => !v.is_entry,
        };
        v.is_intersection && !v.is_taken && wanted
    })
}

/// Phase three: walk from unused intersection nodes, switching lists at
/// every intersection, until each one has been taken.
fn traverse<T: Scalar>(
    arena: &mut ClipArena<T>,
    mode: Mode,
    budget: &mut StepBudget,
) -> Result<Vec<Vec<Point2<T>>>, (BudgetExceeded, Vec<Vec<Point2<T>>>)> {
    let mut result: Vec<Vec<Point2<T>>> = Vec::new();
    let mut previous: Option<usize> = None;

    while let Some(start) = next_start(arena, mode) {
        if let Some(p) = previous {
            arena.vertices[p].next_poly = Some(start);
        }
        previous = Some(start);

        let mut loop_points = Vec::new();
        let mut cur = start;
        let mut forward = mode != Mode::Difference;
        loop {
            arena.mark_taken(cur);
            loop_points.push(arena.vertices[cur].coordinate);
            loop {
                if let Err(cause) = budget.tick("polygon clip traversal") {
                    result.push(loop_points);
                    return Err((cause, result));
                }
                cur = if forward {
                    arena.vertices[cur].next
                } else {
                    arena.vertices[cur].prev
                };
                if arena.vertices[cur].is_intersection {
                    break;
                }
                loop_points.push(arena.vertices[cur].coordinate);
            }

            arena.mark_taken(cur);
            let Some(neighbor) = arena.vertices[cur].neighbor else { break };
            cur = neighbor;
            forward = match mode {
                Mode::Intersection => arena.vertices[cur].is_entry,
                Mode::Difference => !forward,
                Mode::Outline => !arena.vertices[cur].is_entry,
            };
            if cur == start || arena.vertices[cur].neighbor == Some(start) {
                break;
            }
        }

        if mode == Mode::Difference {
            loop_points.reverse();
        }
        result.push(loop_points);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::util::is_counter_clockwise;

    fn square(x0: f64, y0: f64, side: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new([x0, y0]),
            Point2::new([x0 + side, y0]),
            Point2::new([x0 + side, y0 + side]),
            Point2::new([x0, y0 + side]),
        ]
    }

    #[test]
    fn difference_loop_winds_counter_clockwise() {
        let out = clip(&square(0.0, 0.0, 1.0), &square(0.5, 0.5, 1.0), BooleanOp::Difference, &ClipOptions::default())
            .unwrap();
        assert_eq!(out.polygons.len(), 1);
        assert!(is_counter_clockwise(&out.polygons[0]));
        assert!((out.signed_area() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn tiny_budget_reports_partial() {
        let options = ClipOptions { traversal_budget: 2 };
        let err = clip(&square(0.0, 0.0, 1.0), &square(0.5, 0.5, 1.0), BooleanOp::Intersection, &options)
            .unwrap_err();
        assert!(matches!(err, BooleanError::Incomplete(_)));
    }
}

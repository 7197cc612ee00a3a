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

use std::fmt;

use thiserror::Error;

/// Structural precondition failures of the half-edge primitives.
///
/// Geometric preconditions (convexity, winding) are never checked; only the
/// cheap structural ones end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("half-edge {0} lies on the border and has no twin")]
    BorderEdge(usize),
    #[error("half-edge {0} is removed or out of range")]
    InvalidHalfEdge(usize),
    #[error("face {0} is removed or out of range")]
    InvalidFace(usize),
    #[error("vertex {0} is removed or out of range")]
    InvalidVertex(usize),
}

/// A violated half-edge invariant found by `Mesh::validate_connectivity`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("half-edge {half_edge}: next.prev does not point back")]
    NextPrevMismatch { half_edge: usize },
    #[error("half-edge {half_edge}: prev.next does not point back")]
    PrevNextMismatch { half_edge: usize },
    #[error("half-edge {half_edge}: twin.twin does not point back")]
    TwinMismatch { half_edge: usize },
    #[error("half-edge {half_edge}: twin endpoints do not match")]
    TwinGeometry { half_edge: usize },
    #[error("half-edge {half_edge}: links to a removed record")]
    DanglingLink { half_edge: usize },
    #[error("face {face}: boundary cycle is not a triangle of its own half-edges")]
    FaceCycle { face: usize },
    #[error("vertex {vertex}: representative half-edge is not outgoing")]
    VertexHalfEdge { vertex: usize },
}

/// A step budget ran dry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} exceeded its budget of {limit} steps")]
pub struct BudgetExceeded {
    pub stage: &'static str,
    pub limit: usize,
}

/// Upper bound on the number of steps a loop may take before it is cut off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepBudget {
    pub limit: usize,
    used: usize,
}

impl StepBudget {
    pub const DEFAULT_LIMIT: usize = 100_000;

    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    #[inline]
    pub fn tick(&mut self, stage: &'static str) -> Result<(), BudgetExceeded> {
        self.used += 1;
        if self.used > self.limit {
            return Err(BudgetExceeded {
                stage,
                limit: self.limit,
            });
        }
        Ok(())
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}

impl Default for StepBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

/// Outcome of an algorithm whose loop was cut off by its [`StepBudget`].
///
/// `partial` holds whatever was built before the cut. It may be structurally
/// incomplete and should be treated as best-effort.
pub struct IncompleteTraversal<P> {
    pub cause: BudgetExceeded,
    pub partial: P,
}

impl<P> IncompleteTraversal<P> {
    pub fn new(cause: BudgetExceeded, partial: P) -> Self {
        Self { cause, partial }
    }

    pub fn into_partial(self) -> P {
        self.partial
    }

    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> IncompleteTraversal<Q> {
        IncompleteTraversal {
            cause: self.cause,
            partial: f(self.partial),
        }
    }
}

impl<P> fmt::Debug for IncompleteTraversal<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncompleteTraversal")
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

impl<P> fmt::Display for IncompleteTraversal<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "incomplete traversal: {}", self.cause)
    }
}

impl<P> std::error::Error for IncompleteTraversal<P> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Collapses a budgeted outcome into its best available result.
pub trait BestEffort<P> {
    fn best_effort(self) -> P;
}

impl<P> BestEffort<P> for Result<P, IncompleteTraversal<P>> {
    fn best_effort(self) -> P {
        match self {
            Ok(value) => value,
            Err(incomplete) => incomplete.partial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_trips_after_limit() {
        let mut budget = StepBudget::new(2);
        assert!(budget.tick("test").is_ok());
        assert!(budget.tick("test").is_ok());
        let err = budget.tick("test").unwrap_err();
        assert_eq!(err.limit, 2);
        assert_eq!(err.stage, "test");
        budget.reset();
        assert_eq!(budget.used(), 0);
    }

    #[test]
    fn best_effort_returns_partial() {
        let cut: Result<Vec<u8>, IncompleteTraversal<Vec<u8>>> = Err(IncompleteTraversal::new(
            BudgetExceeded {
                stage: "walk",
                limit: 1,
            },
            vec![1, 2],
        ));
        assert_eq!(cut.best_effort(), vec![1, 2]);
    }
}

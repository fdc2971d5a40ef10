//! Acyclicity oracle over "before" constraints.
//!
//! Vertices are step indices `0..vertex_count`; an ordering `(a, b)` is the
//! directed edge `a → b` ("a before b"). A constraint set is consistent iff it
//! admits a topological order.
//!
//! Kahn's algorithm with the smallest ready vertex taken first, so the
//! linearization is deterministic for a given constraint set.

use std::collections::{BTreeSet, VecDeque};

/// An ordering constraint `(before, after)`.
pub type Ordering = (usize, usize);

/// Why a constraint set has no topological order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    /// The constraints contain a cycle; `unplaced` vertices lie on or behind it.
    #[error("ordering constraints contain a cycle through {unplaced} vertices")]
    Cycle { unplaced: usize },
    /// An edge names a vertex outside `0..vertex_count`.
    #[error("ordering ({before}, {after}) names a vertex outside 0..{vertex_count}")]
    VertexOutOfRange {
        before: usize,
        after: usize,
        vertex_count: usize,
    },
}

fn adjacency<'a>(
    orderings: impl IntoIterator<Item = &'a Ordering>,
    vertex_count: usize,
) -> Result<Vec<Vec<usize>>, CycleError> {
    let mut out = vec![Vec::new(); vertex_count];
    for &(before, after) in orderings {
        if before >= vertex_count || after >= vertex_count {
            return Err(CycleError::VertexOutOfRange {
                before,
                after,
                vertex_count,
            });
        }
        out[before].push(after);
    }
    Ok(out)
}

/// Topologically sort `0..vertex_count` under `orderings`.
///
/// Duplicate edges are allowed. A self-edge `(a, a)` is a cycle.
///
/// # Errors
///
/// [`CycleError::Cycle`] if no topological order exists,
/// [`CycleError::VertexOutOfRange`] for an edge outside the vertex range.
pub fn topological_sort<'a>(
    orderings: impl IntoIterator<Item = &'a Ordering>,
    vertex_count: usize,
) -> Result<Vec<usize>, CycleError> {
    let outgoing = adjacency(orderings, vertex_count)?;
    let mut incoming = vec![0usize; vertex_count];
    for targets in &outgoing {
        for &t in targets {
            incoming[t] += 1;
        }
    }

    let mut ready: BTreeSet<usize> = (0..vertex_count).filter(|&v| incoming[v] == 0).collect();
    let mut sorted = Vec::with_capacity(vertex_count);
    while let Some(vertex) = ready.pop_first() {
        sorted.push(vertex);
        for &t in &outgoing[vertex] {
            incoming[t] -= 1;
            if incoming[t] == 0 {
                ready.insert(t);
            }
        }
    }

    if sorted.len() < vertex_count {
        return Err(CycleError::Cycle {
            unplaced: vertex_count - sorted.len(),
        });
    }
    Ok(sorted)
}

/// Whether `orderings` over `vertex_count` vertices is acyclic.
#[must_use]
pub fn is_order_consistent<'a>(
    orderings: impl IntoIterator<Item = &'a Ordering>,
    vertex_count: usize,
) -> bool {
    topological_sort(orderings, vertex_count).is_ok()
}

/// Transitive successor sets: `reach[a][b]` iff `a` is ordered strictly before `b`.
///
/// # Errors
///
/// [`CycleError::VertexOutOfRange`] for an edge outside the vertex range.
pub fn reachability<'a>(
    orderings: impl IntoIterator<Item = &'a Ordering>,
    vertex_count: usize,
) -> Result<Vec<Vec<bool>>, CycleError> {
    let outgoing = adjacency(orderings, vertex_count)?;
    let mut reach = vec![vec![false; vertex_count]; vertex_count];
    for (source, row) in reach.iter_mut().enumerate() {
        let mut queue: VecDeque<usize> = outgoing[source].iter().copied().collect();
        while let Some(v) = queue.pop_front() {
            if row[v] {
                continue;
            }
            row[v] = true;
            queue.extend(outgoing[v].iter().copied());
        }
    }
    Ok(reach)
}

//! Deterministic edge ordering
//!
//! Callers with few incoming and many outgoing calls tend to be entry points
//! or orchestrators, so they are listed first. Degrees are the ones recorded
//! over the whole graph, including edges that were later filtered out.

use std::cmp::Ordering;

use crate::graph::EdgeRef;

/// Sort edges by caller in-degree (ascending), then caller out-degree
/// (descending)
///
/// The sort is stable: edges with equal keys keep their collection order.
pub fn sort_by_degree(edges: &mut [EdgeRef<'_>]) {
    edges.sort_by(compare_callers);
}

fn compare_callers(a: &EdgeRef<'_>, b: &EdgeRef<'_>) -> Ordering {
    a.from
        .in_degree
        .cmp(&b.from.in_degree)
        .then_with(|| b.from.out_degree.cmp(&a.from.out_degree))
}

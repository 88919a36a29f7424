use std::cmp::Ordering;

use crate::model::Tool;

/// Display-order comparator applied to every snapshot.
///
/// Two tiers: tools that both carry an explicit rank compare by rank,
/// ascending. Any pair where at least one rank is missing compares by
/// creation time, newest first. The direction flip between the tiers is
/// an observable contract (see the tests), not an accident to normalize
/// away: ranked tools read top-down in the order the user arranged, while
/// never-reordered tools float newest-first the way a fresh shelf does.
pub fn compare_tools(a: &Tool, b: &Tool) -> Ordering {
    match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => b.created_at.cmp(&a.created_at),
    }
}

/// Sort a snapshot into display order. Stable, so tools tied within a
/// tier keep their incoming relative order.
pub fn sort_tools(tools: &mut [Tool]) {
    tools.sort_by(compare_tools);
}

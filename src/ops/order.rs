use serde::Serialize;

use crate::model::Tool;

/// A single rank update destined for the store's batch write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankWrite {
    pub id: String,
    pub order: u32,
}

/// Move the tool `from_id` to the position currently held by `to_id`,
/// shifting the tools in between. Returns the sequence unchanged when the
/// two ids are equal or when either id is absent (a grab released outside
/// any valid target lands here as an absent `to_id`).
pub fn compute_move(tools: Vec<Tool>, from_id: &str, to_id: &str) -> Vec<Tool> {
    if from_id == to_id {
        return tools;
    }
    let from = tools.iter().position(|t| t.id == from_id);
    let to = tools.iter().position(|t| t.id == to_id);
    let (Some(from), Some(to)) = (from, to) else {
        return tools;
    };
    let mut tools = tools;
    let moved = tools.remove(from);
    tools.insert(to, moved);
    tools
}

/// Stamp every tool's rank with its position. Purely derived; callers
/// persist the result via [`diff_ranks`].
pub fn assign_ranks(mut tools: Vec<Tool>) -> Vec<Tool> {
    for (i, tool) in tools.iter_mut().enumerate() {
        tool.order = Some(i as u32);
    }
    tools
}

/// The minimal set of rank writes taking `old` to `new`: exactly the ids
/// whose rank *value* changed. Compared by id, not position: a move
/// shifts many positions but only the tools whose stored rank differs
/// need a write.
pub fn diff_ranks(old: &[Tool], new: &[Tool]) -> Vec<RankWrite> {
    new.iter()
        .filter_map(|tool| {
            let order = tool.order?;
            let prior = old.iter().find(|t| t.id == tool.id).and_then(|t| t.order);
            (prior != Some(order)).then(|| RankWrite {
                id: tool.id.clone(),
                order,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn tool(id: &str, order: Option<u32>) -> Tool {
        Tool {
            id: id.into(),
            name: id.into(),
            links: vec![crate::model::ToolLink::bare("https://example.com")],
            url: None,
            pr_link: None,
            tags: Vec::new(),
            owner: "ada".into(),
            order,
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    fn seq(ids: &[&str]) -> Vec<Tool> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| tool(id, Some(i as u32)))
            .collect()
    }

    fn ids(tools: &[Tool]) -> Vec<&str> {
        tools.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn move_forward_lands_on_targets_prior_position() {
        let moved = compute_move(seq(&["a", "b", "c", "d"]), "a", "c");
        assert_eq!(ids(&moved), ["b", "c", "a", "d"]);
    }

    #[test]
    fn move_backward_lands_on_targets_prior_position() {
        let moved = compute_move(seq(&["a", "b", "c", "d"]), "d", "b");
        assert_eq!(ids(&moved), ["a", "d", "b", "c"]);
    }

    #[test]
    fn move_to_self_is_a_no_op() {
        let moved = compute_move(seq(&["a", "b", "c"]), "b", "b");
        assert_eq!(ids(&moved), ["a", "b", "c"]);
    }

    #[test]
    fn missing_source_or_target_is_a_no_op() {
        let moved = compute_move(seq(&["a", "b"]), "zzz", "a");
        assert_eq!(ids(&moved), ["a", "b"]);
        let moved = compute_move(seq(&["a", "b"]), "a", "zzz");
        assert_eq!(ids(&moved), ["a", "b"]);
    }

    #[test]
    fn move_then_assign_preserves_id_set_and_renumbers() {
        let before = seq(&["a", "b", "c", "d", "e"]);
        for (from, to) in [("a", "e"), ("e", "a"), ("b", "d"), ("c", "b")] {
            let after = assign_ranks(compute_move(before.clone(), from, to));
            let mut before_ids = ids(&before);
            let mut after_ids = ids(&after);
            before_ids.sort();
            after_ids.sort();
            assert_eq!(before_ids, after_ids);
            // Moved tool sits where the target used to be
            let target_prior = before.iter().position(|t| t.id == to).unwrap();
            assert_eq!(after[target_prior].id, from);
            // Ranks are 0..len in sequence order
            for (i, t) in after.iter().enumerate() {
                assert_eq!(t.order, Some(i as u32));
            }
        }
    }

    #[test]
    fn diff_emits_only_changed_ranks() {
        let old = seq(&["a", "b", "c", "d"]);
        let new = assign_ranks(compute_move(old.clone(), "d", "b"));
        // d: 3 -> 1, b: 1 -> 2, c: 2 -> 3; a keeps 0
        let mut writes = diff_ranks(&old, &new);
        writes.sort_by(|x, y| x.id.cmp(&y.id));
        assert_eq!(
            writes,
            vec![
                RankWrite { id: "b".into(), order: 2 },
                RankWrite { id: "c".into(), order: 3 },
                RankWrite { id: "d".into(), order: 1 },
            ]
        );
    }

    #[test]
    fn diff_counts_unranked_tools_as_changed() {
        let old = vec![tool("a", None), tool("b", Some(1))];
        let new = assign_ranks(old.clone());
        let writes = diff_ranks(&old, &new);
        // a gains a rank; b's value 1 is unchanged
        assert_eq!(writes, vec![RankWrite { id: "a".into(), order: 0 }]);
    }

    #[test]
    fn applying_diff_to_old_reproduces_new_ranks() {
        let old = seq(&["a", "b", "c", "d", "e"]);
        let new = assign_ranks(compute_move(old.clone(), "b", "e"));
        let writes = diff_ranks(&old, &new);

        let mut patched = old.clone();
        for write in &writes {
            let t = patched.iter_mut().find(|t| t.id == write.id).unwrap();
            t.order = Some(write.order);
        }
        for t in &new {
            let p = patched.iter().find(|p| p.id == t.id).unwrap();
            assert_eq!(p.order, t.order);
        }
    }

    #[test]
    fn identical_sequences_diff_to_nothing() {
        let old = seq(&["a", "b", "c"]);
        assert!(diff_ranks(&old, &old).is_empty());
    }
}

use crate::model::Tool;

/// Narrow an ordered sequence to the tools matching the search text and
/// every selected tag. Order passes through unchanged; there is no
/// ranking or scoring here.
///
/// Search is a case-insensitive substring match against the name or any
/// tag. Tag selection is AND across the whole set; selecting nothing
/// admits everything.
pub fn visible_tools<'a>(
    tools: &'a [Tool],
    search: &str,
    selected_tags: &[String],
) -> Vec<&'a Tool> {
    let needle = search.to_lowercase();
    tools
        .iter()
        .filter(|tool| {
            let matches_search = tool.name.to_lowercase().contains(&needle)
                || tool.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            let matches_tags = selected_tags.iter().all(|t| tool.tags.contains(t));
            matches_search && matches_tags
        })
        .collect()
}

/// Every distinct tag across the given tools, sorted lexicographically.
/// Recomputed whenever the set changes; this feeds the filter bar.
pub fn all_tags(tools: &[Tool]) -> Vec<String> {
    let mut tags: Vec<String> = tools
        .iter()
        .flat_map(|t| t.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ToolLink;
    use chrono::{TimeZone, Utc};

    fn tool(name: &str, tags: &[&str]) -> Tool {
        Tool {
            id: name.to_lowercase(),
            name: name.into(),
            links: vec![ToolLink::bare("https://example.com")],
            url: None,
            pr_link: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            owner: "ada".into(),
            order: None,
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    fn fixture() -> Vec<Tool> {
        vec![
            tool("Figma", &["design"]),
            tool("VSCode", &["dev", "editor"]),
        ]
    }

    fn names<'a>(tools: &'a [&'a Tool]) -> Vec<&'a str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let tools = fixture();
        assert_eq!(names(&visible_tools(&tools, "code", &[])), ["VSCode"]);
    }

    #[test]
    fn search_matches_tags_too() {
        let tools = fixture();
        assert_eq!(names(&visible_tools(&tools, "desi", &[])), ["Figma"]);
    }

    #[test]
    fn single_selected_tag_filters() {
        let tools = fixture();
        let selected = vec!["design".to_string()];
        assert_eq!(names(&visible_tools(&tools, "", &selected)), ["Figma"]);
    }

    #[test]
    fn selected_tags_are_and_semantics() {
        let tools = fixture();
        let selected = vec!["design".to_string(), "dev".to_string()];
        // No tool carries both tags.
        assert!(visible_tools(&tools, "", &selected).is_empty());
    }

    #[test]
    fn empty_search_and_no_tags_admits_all() {
        let tools = fixture();
        assert_eq!(names(&visible_tools(&tools, "", &[])), ["Figma", "VSCode"]);
    }

    #[test]
    fn search_and_tags_compose() {
        let mut tools = fixture();
        tools.push(tool("CodePen", &["dev", "web"]));
        let selected = vec!["dev".to_string()];
        assert_eq!(
            names(&visible_tools(&tools, "code", &selected)),
            ["VSCode", "CodePen"]
        );
        let selected = vec!["editor".to_string()];
        assert_eq!(names(&visible_tools(&tools, "code", &selected)), ["VSCode"]);
    }

    #[test]
    fn order_is_inherited_from_input() {
        let tools = vec![
            tool("Zed", &["editor"]),
            tool("Ace", &["editor"]),
            tool("Vim", &["editor"]),
        ];
        let selected = vec!["editor".to_string()];
        assert_eq!(
            names(&visible_tools(&tools, "", &selected)),
            ["Zed", "Ace", "Vim"]
        );
    }

    #[test]
    fn tag_universe_is_distinct_and_sorted() {
        let mut tools = fixture();
        tools.push(tool("CodePen", &["web", "dev"]));
        assert_eq!(all_tags(&tools), ["design", "dev", "editor", "web"]);
    }

    #[test]
    fn tag_universe_of_empty_shelf_is_empty() {
        assert!(all_tags(&[]).is_empty());
    }
}

use crate::model::{NewTool, Tool, ToolLink};

/// Error type for tool validation
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("tool name cannot be empty")]
    EmptyName,
    #[error("tool needs at least one link with a URL")]
    NoLinks,
}

/// Prepend `https://` when the URL carries no scheme; trims first.
/// An empty or whitespace-only input stays empty (the caller drops it).
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Split a comma-separated tag field into trimmed, non-empty tags.
/// No case folding and no dedup: tags stay exactly as typed.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse one link entry: either a bare URL or `label|url`. The pipe is
/// safe as a separator because it never appears unencoded in a URL.
pub fn parse_link_entry(input: &str) -> ToolLink {
    match input.split_once('|') {
        Some((label, url)) => {
            let label = label.trim();
            ToolLink {
                label: (!label.is_empty()).then(|| label.to_string()),
                url: url.trim().to_string(),
            }
        }
        None => ToolLink::bare(input.trim()),
    }
}

/// Split a comma-separated links field into link entries (empty entries
/// dropped here; URL validation happens in [`validate`]).
pub fn parse_links(input: &str) -> Vec<ToolLink> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_link_entry)
        .collect()
}

/// Validate a create/edit payload before it goes anywhere near the store:
/// trims the name, normalizes every link URL, drops links that are empty
/// after trimming, and rejects the payload if no link survives. The PR
/// link is opaque and passes through untouched apart from empty → none.
pub fn validate(new: NewTool) -> Result<NewTool, ToolError> {
    let name = new.name.trim().to_string();
    if name.is_empty() {
        return Err(ToolError::EmptyName);
    }

    let links: Vec<ToolLink> = new
        .links
        .into_iter()
        .filter_map(|link| {
            let url = normalize_url(&link.url);
            if url.is_empty() {
                return None;
            }
            let label = link
                .label
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty());
            Some(ToolLink { label, url })
        })
        .collect();
    if links.is_empty() {
        return Err(ToolError::NoLinks);
    }

    let pr_link = new
        .pr_link
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    let tags = new
        .tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    Ok(NewTool {
        name,
        links,
        pr_link,
        tags,
    })
}

/// Rank for a newly created tool: one past the highest existing rank,
/// counting rankless tools as 0. An empty shelf starts at 1; ranks only
/// become contiguous zero-based after the first explicit reorder.
pub fn next_rank(tools: &[Tool]) -> u32 {
    tools
        .iter()
        .map(|t| t.order.unwrap_or(0))
        .max()
        .unwrap_or(0)
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, urls: &[&str]) -> NewTool {
        NewTool {
            name: name.into(),
            links: urls.iter().map(|u| ToolLink::bare(*u)).collect(),
            pr_link: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn bare_domain_gains_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
    }

    #[test]
    fn existing_schemes_pass_through() {
        assert_eq!(normalize_url("http://x.com"), "http://x.com");
        assert_eq!(normalize_url("https://x.com"), "https://x.com");
        assert_eq!(normalize_url("HTTPS://X.com"), "HTTPS://X.com");
    }

    #[test]
    fn whitespace_trims_to_empty() {
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn validate_normalizes_surviving_links() {
        let new = validate(payload("Figma", &["figma.com"])).unwrap();
        assert_eq!(new.links[0].url, "https://figma.com");
    }

    #[test]
    fn validate_drops_empty_links_before_counting() {
        let new = validate(payload("Figma", &["  ", "figma.com", ""])).unwrap();
        assert_eq!(new.links.len(), 1);
        assert_eq!(new.links[0].url, "https://figma.com");
    }

    #[test]
    fn validate_rejects_when_no_link_survives() {
        let err = validate(payload("Figma", &["  ", ""])).unwrap_err();
        assert!(matches!(err, ToolError::NoLinks));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let err = validate(payload("   ", &["figma.com"])).unwrap_err();
        assert!(matches!(err, ToolError::EmptyName));
    }

    #[test]
    fn validate_trims_name_and_tags() {
        let mut new = payload("  Figma  ", &["figma.com"]);
        new.tags = vec![" design ".into(), "".into(), "ui".into()];
        let new = validate(new).unwrap();
        assert_eq!(new.name, "Figma");
        assert_eq!(new.tags, vec!["design".to_string(), "ui".to_string()]);
    }

    #[test]
    fn validate_blanks_out_empty_labels_and_pr() {
        let mut new = payload("Figma", &["figma.com"]);
        new.links[0].label = Some("  ".into());
        new.pr_link = Some("  ".into());
        let new = validate(new).unwrap();
        assert_eq!(new.links[0].label, None);
        assert_eq!(new.pr_link, None);
    }

    #[test]
    fn pr_link_is_never_normalized() {
        let mut new = payload("Figma", &["figma.com"]);
        new.pr_link = Some("github.com/acme/ui/pull/7".into());
        let new = validate(new).unwrap();
        // Stays scheme-less: it's an opaque reference.
        assert_eq!(new.pr_link.as_deref(), Some("github.com/acme/ui/pull/7"));
    }

    #[test]
    fn tags_split_on_commas() {
        assert_eq!(
            parse_tags("react, utility , ,web"),
            vec!["react", "utility", "web"]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn link_entries_take_an_optional_label() {
        let link = parse_link_entry("Docs|https://docs.example.com");
        assert_eq!(link.label.as_deref(), Some("Docs"));
        assert_eq!(link.url, "https://docs.example.com");

        let link = parse_link_entry("example.com");
        assert_eq!(link.label, None);
        assert_eq!(link.url, "example.com");
    }

    #[test]
    fn links_field_splits_on_commas() {
        let links = parse_links("Docs|docs.x.com, x.com, ");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label.as_deref(), Some("Docs"));
        assert_eq!(links[1].label, None);
    }

    #[test]
    fn next_rank_is_one_past_the_max() {
        use chrono::{TimeZone, Utc};
        let tool = |order| Tool {
            id: "x".into(),
            name: "x".into(),
            links: vec![ToolLink::bare("https://x.com")],
            url: None,
            pr_link: None,
            tags: Vec::new(),
            owner: "ada".into(),
            order,
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
        };
        assert_eq!(next_rank(&[]), 1);
        assert_eq!(next_rank(&[tool(None)]), 1);
        assert_eq!(next_rank(&[tool(Some(4)), tool(None), tool(Some(2))]), 5);
    }
}

use std::ops::Range;

use regex::Regex;

use crate::model::Tool;

/// Which field of a tool matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Name,
    Tag,
    Label,
    Url,
    PrLink,
}

/// A search hit for a tool field
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub tool_id: String,
    pub field: MatchField,
    /// The matched text (tag, label, URL, ...) the spans index into
    pub text: String,
    pub spans: Vec<Range<usize>>,
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

fn push_hit(
    hits: &mut Vec<SearchHit>,
    re: &Regex,
    tool_id: &str,
    field: MatchField,
    text: &str,
) {
    let spans = find_matches(re, text);
    if !spans.is_empty() {
        hits.push(SearchHit {
            tool_id: tool_id.to_string(),
            field,
            text: text.to_string(),
            spans,
        });
    }
}

/// Regex search across every tool's name, tags, links, and PR reference.
/// This powers the CLI `search` command; the dashboard's live filter is
/// the plain substring projection in `ops::filter`.
pub fn search_tools(tools: &[Tool], re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for tool in tools {
        push_hit(&mut hits, re, &tool.id, MatchField::Name, &tool.name);
        for tag in &tool.tags {
            push_hit(&mut hits, re, &tool.id, MatchField::Tag, tag);
        }
        for link in tool.effective_links() {
            if let Some(label) = &link.label {
                push_hit(&mut hits, re, &tool.id, MatchField::Label, label);
            }
            push_hit(&mut hits, re, &tool.id, MatchField::Url, &link.url);
        }
        if let Some(pr) = &tool.pr_link {
            push_hit(&mut hits, re, &tool.id, MatchField::PrLink, pr);
        }
    }
    hits
}

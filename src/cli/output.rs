use serde::Serialize;

use crate::model::Tool;
use crate::ops::search::{MatchField, SearchHit};
use crate::ops::tag_style::tag_style;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct LinkJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub url: String,
}

#[derive(Serialize)]
pub struct ToolJson {
    pub id: String,
    pub name: String,
    pub links: Vec<LinkJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_link: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    pub created_at: String,
}

impl ToolJson {
    pub fn from_tool(tool: &Tool) -> Self {
        ToolJson {
            id: tool.id.clone(),
            name: tool.name.clone(),
            links: tool
                .effective_links()
                .into_iter()
                .map(|l| LinkJson {
                    label: l.label,
                    url: l.url,
                })
                .collect(),
            pr_link: tool.pr_link.clone(),
            tags: tool.tags.clone(),
            order: tool.order,
            created_at: tool.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct ToolListJson {
    pub user: String,
    pub tools: Vec<ToolJson>,
}

#[derive(Serialize)]
pub struct TagJson {
    pub tag: String,
    pub color: &'static str,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub tool_id: String,
    pub field: &'static str,
    pub text: String,
    pub spans: Vec<[usize; 2]>,
}

impl SearchHitJson {
    pub fn from_hit(hit: &SearchHit) -> Self {
        SearchHitJson {
            tool_id: hit.tool_id.clone(),
            field: field_name(hit.field),
            text: hit.text.clone(),
            spans: hit.spans.iter().map(|r| [r.start, r.end]).collect(),
        }
    }
}

pub fn field_name(field: MatchField) -> &'static str {
    match field {
        MatchField::Name => "name",
        MatchField::Tag => "tag",
        MatchField::Label => "label",
        MatchField::Url => "url",
        MatchField::PrLink => "pr_link",
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One-line listing: `t-004  Figma  https://figma.com  #design #ui`
pub fn print_tool_line(tool: &Tool) {
    let url = tool
        .effective_links()
        .first()
        .map(|l| l.url.clone())
        .unwrap_or_default();
    let tags = tool
        .tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    if tags.is_empty() {
        println!("{}  {}  {}", tool.id, tool.name, url);
    } else {
        println!("{}  {}  {}  {}", tool.id, tool.name, url, tags);
    }
}

/// Full view used by `show`
pub fn print_tool_full(tool: &Tool) {
    println!("{}  {}", tool.id, tool.name);
    for (i, link) in tool.effective_links().iter().enumerate() {
        println!("  {}. {}: {}", i + 1, link.display_label(), link.url);
    }
    if let Some(pr) = &tool.pr_link {
        println!("  pr: {pr}");
    }
    if !tool.tags.is_empty() {
        let tags = tool
            .tags
            .iter()
            .map(|t| format!("#{} ({})", t, tag_style(t).name))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  tags: {tags}");
    }
    if let Some(order) = tool.order {
        println!("  order: {order}");
    }
    println!("  created: {}", tool.created_at.format("%Y-%m-%d %H:%M"));
}

pub fn print_search_hit(hit: &SearchHit) {
    println!("{}  {}: {}", hit.tool_id, field_name(hit.field), hit.text);
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single labeled link on a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLink {
    /// Display label; rendering falls back to a generic placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Target URL, normalized to carry a scheme
    pub url: String,
}

impl ToolLink {
    /// Link with no label
    pub fn bare(url: impl Into<String>) -> Self {
        ToolLink {
            label: None,
            url: url.into(),
        }
    }

    /// Label to display for this link
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("Link")
    }
}

/// A tool document as stored and as observed through snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Store-assigned document id, immutable after creation
    pub id: String,
    /// Display name
    pub name: String,
    /// Labeled links in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<ToolLink>,
    /// Single URL from before multi-link support; stands in for the first
    /// link when `links` is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Optional pull-request reference, kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_link: Option<String>,
    /// Tags, as entered
    #[serde(default)]
    pub tags: Vec<String>,
    /// Owning user, set once at creation
    pub owner: String,
    /// Explicit rank; tools without one sort by creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Store-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Tool {
    /// The links to present: `links` when any exist, otherwise the legacy
    /// single `url` as one unlabeled link.
    pub fn effective_links(&self) -> Vec<ToolLink> {
        if !self.links.is_empty() {
            return self.links.clone();
        }
        self.url
            .as_ref()
            .map(|url| vec![ToolLink::bare(url.clone())])
            .unwrap_or_default()
    }
}

/// Fields supplied when creating a tool (and when editing, as a full
/// replacement of the mutable fields). The store assigns id, owner,
/// timestamp, and rank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewTool {
    pub name: String,
    #[serde(default)]
    pub links: Vec<ToolLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for a tool's mutable fields. `None` leaves a field
/// untouched; `pr_link: Some(None)` clears the PR reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<ToolLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_link: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ToolPatch {
    /// Full replacement of the mutable fields, as the edit form submits.
    pub fn replace(new: NewTool) -> Self {
        ToolPatch {
            name: Some(new.name),
            links: Some(new.links),
            pr_link: Some(new.pr_link),
            tags: Some(new.tags),
        }
    }

    /// Apply this patch to a tool in place.
    pub fn apply(self, tool: &mut Tool) {
        if let Some(name) = self.name {
            tool.name = name;
        }
        if let Some(links) = self.links {
            tool.links = links;
        }
        if let Some(pr_link) = self.pr_link {
            tool.pr_link = pr_link;
        }
        if let Some(tags) = self.tags {
            tool.tags = tags;
        }
    }
}

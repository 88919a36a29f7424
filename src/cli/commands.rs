use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tsf", about = concat!("[>] toolshelf v", env!("CARGO_PKG_VERSION"), " - your tools, one shelf"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different shelf root directory
    #[arg(short = 'C', long = "shelf-dir", global = true)]
    pub shelf_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new shelf in the current directory
    Init(InitArgs),
    /// List tools in display order
    List(ListArgs),
    /// Show one tool in full
    Show(ShowArgs),
    /// Add a tool
    Add(AddArgs),
    /// Edit a tool's fields
    Edit(EditArgs),
    /// Add or remove tags
    Tag(TagArgs),
    /// Manage a tool's links
    Link(LinkCmd),
    /// Set or clear the PR reference
    Pr(PrArgs),
    /// Move a tool to another tool's position
    Mv(MvArgs),
    /// Delete a tool
    Rm(RmArgs),
    /// Search tools by regex
    Search(SearchArgs),
    /// List every tag with its palette color
    Tags,
    /// Show or switch the signed-in profile
    Profile(ProfileArgs),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Shelf name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Profile user (default: "local")
    #[arg(long)]
    pub user: Option<String>,
    /// Reinitialize even if shelf/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only tools carrying this tag (repeatable; AND semantics)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Case-insensitive substring filter on name or tags
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Tool ID (e.g. t-004)
    pub id: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern (use (?i) for case-insensitive)
    pub pattern: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Tool name
    pub name: String,
    /// Link as URL or "LABEL|URL" (repeatable; at least one required)
    #[arg(long = "link", required = true)]
    pub links: Vec<String>,
    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
    /// PR reference (kept verbatim)
    #[arg(long)]
    pub pr: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Tool ID
    pub id: String,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// Replace all links (repeatable, URL or "LABEL|URL")
    #[arg(long = "link")]
    pub links: Vec<String>,
    /// Replace tags (comma-separated)
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args)]
pub struct TagArgs {
    /// Tool ID
    pub id: String,
    /// Action: "add" or "rm"
    pub action: String,
    /// Tag names
    #[arg(required = true)]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct LinkCmd {
    /// Tool ID
    pub id: String,
    #[command(subcommand)]
    pub action: LinkAction,
}

#[derive(Subcommand)]
pub enum LinkAction {
    /// Append a link (URL or "LABEL|URL")
    Add { entry: String },
    /// Remove the Nth link (1-based, as listed by `show`)
    Rm { index: usize },
}

#[derive(Args)]
pub struct PrArgs {
    /// Tool ID
    pub id: String,
    /// PR reference; omit together with --clear to remove it
    pub pr: Option<String>,
    /// Clear the PR reference
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args)]
pub struct MvArgs {
    /// Tool to move
    pub id: String,
    /// Tool whose position it should take
    pub target: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Tool ID
    pub id: String,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Switch to this user (omit to show the current profile)
    pub user: Option<String>,
}

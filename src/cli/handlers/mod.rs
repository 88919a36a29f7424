mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use regex::Regex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::model::{NewTool, Tool, ToolPatch};
use crate::ops::filter::{all_tags, visible_tools};
use crate::ops::order::{assign_ranks, compute_move, diff_ranks};
use crate::ops::search::search_tools;
use crate::ops::sort::sort_tools;
use crate::ops::tag_style::tag_style;
use crate::ops::tool_ops::{self, parse_link_entry, parse_tags};
use crate::session::{ConfigIdentity, IdentityProvider};
use crate::store::DocumentStore;
use crate::store::file::FileStore;

/// Global override for the shelf root (set by -C flag)
static SHELF_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for shelf discovery
    if let Some(ref dir) = cli.shelf_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        SHELF_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        None => {
            // No subcommand is handled in main.rs (launches the TUI)
            Ok(())
        }
        Some(cmd) => match cmd {
            // Init is handled in main.rs before shelf discovery
            Commands::Init(args) => cmd_init(args),

            // Read commands
            Commands::List(args) => cmd_list(args, json),
            Commands::Show(args) => cmd_show(args, json),
            Commands::Search(args) => cmd_search(args, json),
            Commands::Tags => cmd_tags(json),
            Commands::Profile(args) => cmd_profile(args),

            // Write commands
            Commands::Add(args) => cmd_add(args),
            Commands::Edit(args) => cmd_edit(args),
            Commands::Tag(args) => cmd_tag(args),
            Commands::Link(args) => cmd_link(args),
            Commands::Pr(args) => cmd_pr(args),
            Commands::Mv(args) => cmd_mv(args),
            Commands::Rm(args) => cmd_rm(args),
        },
    }
}

// ---------------------------------------------------------------------------
// Shared context
// ---------------------------------------------------------------------------

fn shelf_root() -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(dir) = SHELF_DIR_OVERRIDE.lock().unwrap().clone() {
        return Ok(dir);
    }
    Ok(config_io::discover_shelf(&std::env::current_dir()?)?)
}

struct ShelfCtx {
    store: FileStore,
    user: String,
}

fn open_shelf() -> Result<ShelfCtx, Box<dyn std::error::Error>> {
    let shelf_dir = shelf_root()?.join("shelf");
    let (config, _) = config_io::read_config(&shelf_dir)?;
    let user = ConfigIdentity::new(config.profile.user)
        .current()
        .unwrap_or_default();
    let store = FileStore::open(&shelf_dir)?;
    Ok(ShelfCtx { store, user })
}

impl ShelfCtx {
    /// The user's tools in display order.
    fn tools(&self) -> Result<Vec<Tool>, Box<dyn std::error::Error>> {
        let mut tools = self.store.load(&self.user)?;
        sort_tools(&mut tools);
        Ok(tools)
    }

    fn find_tool(&self, id: &str) -> Result<Tool, Box<dyn std::error::Error>> {
        self.tools()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("no tool with id {id}").into())
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    let tools = ctx.tools()?;
    let search = args.search.unwrap_or_default();
    let visible = visible_tools(&tools, &search, &args.tags);

    if json {
        let out = ToolListJson {
            user: ctx.user.clone(),
            tools: visible.iter().map(|t| ToolJson::from_tool(t)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if visible.is_empty() {
        println!("no tools found");
    } else {
        for tool in visible {
            print_tool_line(tool);
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    let tool = ctx.find_tool(&args.id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&ToolJson::from_tool(&tool))?);
    } else {
        print_tool_full(&tool);
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    let re = Regex::new(&args.pattern).map_err(|e| format!("invalid pattern: {e}"))?;
    let tools = ctx.tools()?;
    let hits = search_tools(&tools, &re);

    if json {
        let out: Vec<SearchHitJson> = hits.iter().map(SearchHitJson::from_hit).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if hits.is_empty() {
        println!("no matches");
    } else {
        for hit in &hits {
            print_search_hit(hit);
        }
    }
    Ok(())
}

fn cmd_tags(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    let tools = ctx.tools()?;
    let tags = all_tags(&tools);

    if json {
        let out: Vec<TagJson> = tags
            .iter()
            .map(|t| TagJson {
                tag: t.clone(),
                color: tag_style(t).name,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if tags.is_empty() {
        println!("no tags yet");
    } else {
        for tag in &tags {
            println!("{}  ({})", tag, tag_style(tag).name);
        }
    }
    Ok(())
}

fn cmd_profile(args: ProfileArgs) -> Result<(), Box<dyn std::error::Error>> {
    let shelf_dir = shelf_root()?.join("shelf");
    let (config, mut doc) = config_io::read_config(&shelf_dir)?;
    match args.user {
        None => println!("{}", config.profile.user),
        Some(user) => {
            config_io::set_profile(&mut doc, &user);
            config_io::write_config(&shelf_dir, &doc)?;
            println!("profile set to {user}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    let fields = tool_ops::validate(NewTool {
        name: args.name,
        links: args.links.iter().map(|s| parse_link_entry(s)).collect(),
        pr_link: args.pr,
        tags: parse_tags(&args.tags),
    })?;

    let tools = ctx.tools()?;
    let order = tool_ops::next_rank(&tools);
    let id = ctx.store.create(&ctx.user, fields.clone(), order)?;
    println!("added {}  {}", id, fields.name);
    Ok(())
}

fn cmd_edit(args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    let current = ctx.find_tool(&args.id)?;

    // Merge the given fields over the current ones, then validate the
    // whole payload so an edit can never leave the tool linkless.
    let merged = NewTool {
        name: args.name.unwrap_or(current.name),
        links: if args.links.is_empty() {
            current.links.clone()
        } else {
            args.links.iter().map(|s| parse_link_entry(s)).collect()
        },
        pr_link: current.pr_link.clone(),
        tags: match args.tags {
            Some(tags) => parse_tags(&tags),
            None => current.tags.clone(),
        },
    };
    let fields = tool_ops::validate(merged)?;
    ctx.store.update(&args.id, ToolPatch::replace(fields))?;
    println!("updated {}", args.id);
    Ok(())
}

fn cmd_tag(args: TagArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    let current = ctx.find_tool(&args.id)?;

    let mut tags = current.tags;
    match args.action.as_str() {
        "add" => {
            for tag in &args.tags {
                if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                    tags.push(tag.clone());
                }
            }
        }
        "rm" => {
            for tag in &args.tags {
                tags.retain(|t| t != tag);
            }
        }
        other => return Err(format!("unknown action \"{other}\" (use add or rm)").into()),
    }

    ctx.store.update(
        &args.id,
        ToolPatch {
            tags: Some(tags),
            ..Default::default()
        },
    )?;
    println!("tagged {}", args.id);
    Ok(())
}

fn cmd_link(args: LinkCmd) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    let current = ctx.find_tool(&args.id)?;

    // Work on the effective list so legacy single-url tools migrate to
    // the multi-link form on their first link edit.
    let mut links = current.effective_links();
    match args.action {
        LinkAction::Add { entry } => links.push(parse_link_entry(&entry)),
        LinkAction::Rm { index } => {
            if index == 0 || index > links.len() {
                return Err(format!("no link #{index} (tool has {})", links.len()).into());
            }
            links.remove(index - 1);
        }
    }

    let fields = tool_ops::validate(NewTool {
        name: current.name,
        links,
        pr_link: current.pr_link,
        tags: current.tags,
    })?;
    ctx.store.update(&args.id, ToolPatch::replace(fields))?;
    println!("updated links on {}", args.id);
    Ok(())
}

fn cmd_pr(args: PrArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    ctx.find_tool(&args.id)?;

    let pr_link = match (args.pr, args.clear) {
        (Some(pr), false) => Some(pr),
        (None, true) => None,
        _ => return Err("give a PR reference or --clear".into()),
    };
    ctx.store.update(
        &args.id,
        ToolPatch {
            pr_link: Some(pr_link),
            ..Default::default()
        },
    )?;
    println!("updated {}", args.id);
    Ok(())
}

fn cmd_mv(args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    let tools = ctx.tools()?;
    if tools.len() < 2 {
        println!("nothing to move");
        return Ok(());
    }

    let moved = compute_move(tools.clone(), &args.id, &args.target);
    let same = moved.iter().zip(&tools).all(|(a, b)| a.id == b.id);
    if same {
        println!("nothing to move");
        return Ok(());
    }

    let ranked = assign_ranks(moved);
    let writes = diff_ranks(&tools, &ranked);
    ctx.store.update_ranks(&writes)?;
    println!("moved {} ({} ranks written)", args.id, writes.len());
    Ok(())
}

fn cmd_rm(args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_shelf()?;
    let tool = ctx.find_tool(&args.id)?;
    ctx.store.delete(&args.id)?;
    println!("deleted {}  {}", tool.id, tool.name);
    Ok(())
}

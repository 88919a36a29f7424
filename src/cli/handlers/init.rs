use std::fs;

use crate::cli::commands::InitArgs;

const SHELF_TOML_TEMPLATE: &str = r##"[shelf]
name = "{name}"

# The shelf only ever shows this user's tools.
# Switch with: tsf profile <user>
[profile]
user = "{user}"

# --- UI Customization ---
# Uncomment and edit to override defaults.
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
"##;

/// `tsf init`: create shelf/shelf.toml and tools/ in the current directory.
pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let shelf_dir = cwd.join("shelf");

    if shelf_dir.join("shelf.toml").exists() && !args.force {
        return Err("shelf/ already exists here (use --force to reinitialize)".into());
    }

    let name = args.name.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("tools")
            .to_string()
    });
    let user = args.user.unwrap_or_else(|| "local".to_string());

    fs::create_dir_all(shelf_dir.join("tools"))?;
    let config = SHELF_TOML_TEMPLATE
        .replace("{name}", &name)
        .replace("{user}", &user);
    fs::write(shelf_dir.join("shelf.toml"), config)?;

    println!("initialized shelf \"{name}\" for {user}");
    Ok(())
}

//! Init command - write an example user config

use anyhow::Result;
use console::style;
use leo::config::LeoConfig;
use std::path::Path;

/// Run the init command
pub fn run(path: Option<&Path>) -> Result<()> {
    let existed = path
        .map(Path::to_path_buf)
        .or_else(LeoConfig::user_config_path)
        .is_some_and(|p| p.exists());

    let config_path = LeoConfig::init_user_config(path)?;

    if existed {
        println!(
            "{} Config already exists at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        println!(
            "  Set {} and run with {} to enable generated rewrites.",
            style("ANTHROPIC_API_KEY").bold(),
            style("--ai").bold()
        );
    }
    Ok(())
}

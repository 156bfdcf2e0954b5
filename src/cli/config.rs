//! Config command handler.

use anyhow::Result;

use super::common::AppContext;
use super::ConfigAction;

pub(crate) fn cmd_config(ctx: &AppContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&ctx.config)?);
            if !ctx.config.fixtures.enabled {
                println!();
                println!("Fixture fallback is OFF: API outages will surface as errors.");
            }
        }
        ConfigAction::Path => {
            let exists = if ctx.config_path.exists() { "" } else { " (not created yet)" };
            println!("{}{}", ctx.config_path.display(), exists);
        }
    }
    Ok(())
}

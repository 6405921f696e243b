use crate::context::ExecutionContext;
use crate::output::{Palette, print_json};
use crate::types::OutputFormat;
use anyhow::Result;
use callsnap_core::Config;
use serde_json::json;

pub fn init(ctx: &ExecutionContext) -> Result<()> {
    let path = ctx.config_path();
    let created = !path.exists();

    if created {
        Config::default().save_to(path)?;
        tracing::info!(path = %path.display(), "Wrote default configuration");
    }

    match ctx.format {
        OutputFormat::Json => print_json(&json!({
            "path": path.display().to_string(),
            "created": created,
        })),
        OutputFormat::Plain => {
            let palette = Palette::detect();
            if created {
                println!("{} {}", palette.ok("Created"), path.display());
            } else {
                println!(
                    "{}",
                    palette.dim(&format!("Config already exists at {}", path.display()))
                );
            }
            Ok(())
        }
    }
}

pub fn show(ctx: &ExecutionContext) -> Result<()> {
    let config = ctx.config();

    match ctx.format {
        OutputFormat::Json => print_json(config),
        OutputFormat::Plain => {
            let palette = Palette::detect();
            println!("{}", palette.dim(&format!("# {}", ctx.config_path().display())));
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
    }
}

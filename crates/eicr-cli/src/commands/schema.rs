use anyhow::Context;
use eicr_schema::SchemaRegistry;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::root_commands::SchemaArgs;
use crate::commands::Outcome;
use crate::output::output;

/// Handle `eicr schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    let registry = SchemaRegistry::new();

    if args.list {
        output(&registry.list(), flags.format)?;
        return Ok(Outcome::Done);
    }

    let name = args.name.as_deref().context("a schema name or --list is required")?;
    let schema = registry.get(name).with_context(|| {
        format!(
            "unknown schema '{name}' (available: {})",
            registry.list().join(", ")
        )
    })?;

    // Schemas print as JSON whatever the format; raw stays on one line.
    let rendered = if flags.format == OutputFormat::Raw {
        serde_json::to_string(schema)?
    } else {
        serde_json::to_string_pretty(schema)?
    };
    println!("{rendered}");
    Ok(Outcome::Done)
}

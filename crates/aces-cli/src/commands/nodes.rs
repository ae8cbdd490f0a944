//! Registered node listing.

use anyhow::{Context, Result};
use tracing::trace;

use aces_node::{InputKind, InputSpec};
use crate::NodesArgs;

fn describe(input: &InputSpec) -> String {
    match &input.kind {
        InputKind::Image => format!("{}: IMAGE", input.name),
        InputKind::String { default } => format!("{}: STRING = {default:?}", input.name),
        InputKind::Choice { options, default } => {
            format!("{}: [{}] = {default:?}", input.name, options.join(", "))
        }
    }
}

pub fn run(args: NodesArgs, verbose: u8) -> Result<()> {
    trace!(json = args.json, "nodes::run");
    let registry = super::registry();

    if args.json {
        let schemas: Vec<_> = registry.iter().map(|r| &r.schema).collect();
        let json = serde_json::to_string_pretty(&schemas).context("Failed to serialize schemas")?;
        println!("{json}");
        return Ok(());
    }

    for reg in registry.iter() {
        let schema = &reg.schema;
        println!("{} - {} [{}]", schema.class_name, schema.display_name, schema.category);
        if verbose > 0 {
            println!("  {}", schema.description);
        }
        println!("  required:");
        for input in &schema.required {
            println!("    {}", describe(input));
        }
        println!("  optional:");
        for input in &schema.optional {
            println!("    {}", describe(input));
        }
        println!("  returns: {}", schema.return_names.join(", "));
    }
    Ok(())
}

//! Snippet command handler

use grabar_codegen::{render, Params, StepBuilder};
use serde_json::Value;

use crate::commands::SnippetArgs;
use crate::error::{CliError, CliResult};

/// Execute the snippet command
pub fn execute_snippet(args: &SnippetArgs) -> CliResult<()> {
    println!("{}", render_snippet(args)?);
    Ok(())
}

/// Render the statement described by `args`
pub fn render_snippet(args: &SnippetArgs) -> CliResult<String> {
    let mut params = parse_params(&args.params)?;
    if args.soft {
        params.insert("soft".to_string(), Value::Bool(true));
    }
    let step = StepBuilder::from_payload(&args.kind, args.selector.as_deref(), &params)?;
    Ok(render(&step))
}

/// Parse `key=value` pairs. Values that parse as JSON (numbers, booleans,
/// arrays) keep their type; anything else is a string.
pub fn parse_params(pairs: &[String]) -> CliResult<Params> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                CliError::invalid_argument(format!("expected key=value, got '{pair}'"))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::invalid_argument(format!("empty key in '{pair}'")));
            }
            Ok((key.to_string(), parse_value(value)))
        })
        .collect()
}

fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::Bool(_) | Value::Array(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

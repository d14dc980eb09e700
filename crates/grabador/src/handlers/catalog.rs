//! Catalog command handler

use console::style;
use grabar_codegen::{catalog, CatalogEntry, Category, Family};
use regex::Regex;

use crate::commands::{CatalogArgs, OutputFormat};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Execute the catalog command
pub fn execute_catalog(config: &CliConfig, args: &CatalogArgs) -> CliResult<()> {
    let entries = select_entries(args.category.as_deref(), args.filter.as_deref())?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => print!("{}", render_text(&entries, config.color.should_color())),
    }
    Ok(())
}

/// Catalog entries matching the optional category and id/description regex
pub fn select_entries(
    category: Option<&str>,
    filter: Option<&str>,
) -> CliResult<Vec<&'static CatalogEntry>> {
    let category = category
        .map(|name| {
            Category::parse(name).ok_or_else(|| {
                let known: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
                CliError::invalid_argument(format!(
                    "unknown category '{name}' (expected one of: {})",
                    known.join(", ")
                ))
            })
        })
        .transpose()?;
    let filter = filter
        .map(|pattern| {
            Regex::new(pattern)
                .map_err(|e| CliError::invalid_argument(format!("invalid --filter: {e}")))
        })
        .transpose()?;

    Ok(catalog()
        .iter()
        .filter(|e| category.map_or(true, |c| e.category == c))
        .filter(|e| {
            filter
                .as_ref()
                .map_or(true, |re| re.is_match(e.id) || re.is_match(e.description))
        })
        .collect())
}

/// Render entries grouped by category
#[must_use]
pub fn render_text(entries: &[&CatalogEntry], color: bool) -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let group: Vec<_> = entries.iter().filter(|e| e.category == category).collect();
        if group.is_empty() {
            continue;
        }
        let heading = if color {
            style(category.as_str()).bold().to_string()
        } else {
            category.as_str().to_string()
        };
        out.push_str(&heading);
        out.push('\n');
        for entry in group {
            let family = match entry.family {
                Family::Wait => "wait",
                Family::Assert => "assert",
            };
            let id = if color {
                style(entry.id).cyan().to_string()
            } else {
                entry.id.to_string()
            };
            let params: Vec<String> = entry
                .params
                .iter()
                .map(|p| {
                    if p.required {
                        p.name.to_string()
                    } else {
                        format!("[{}]", p.name)
                    }
                })
                .collect();
            let selector = if entry.needs_selector { " <selector>" } else { "" };
            out.push_str(&format!(
                "  {id:<28} {family:<6}{selector} {}  {}\n",
                params.join(" "),
                entry.description
            ));
        }
    }
    out
}

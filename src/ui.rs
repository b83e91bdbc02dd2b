//! Terminal output and prompts.
//!
//! Formatting is kept separate from workflow logic; everything here
//! either prints or asks a single question.

use crate::boundary::BoundaryWarning;
use crate::domain::{BumpType, Version};
use crate::error::Result;
use crate::registry::ModuleRegistry;
use console::style;
use std::io::{self, Write};

/// One line of the bump plan shown before writing anything
#[derive(Debug, Clone, PartialEq)]
pub struct BumpPlanRow {
    pub module: String,
    pub current: Option<Version>,
    pub bump: BumpType,
    pub next: Option<Version>,
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// List the detected modules with their declared dependencies
pub fn display_modules(registry: &ModuleRegistry) {
    println!("{}", style("Detected modules:").bold());
    for module in registry.modules() {
        if module.dependencies.is_empty() {
            println!("  - {}", module.id);
        } else {
            let dependencies: Vec<&str> =
                module.dependencies.iter().map(|d| d.as_str()).collect();
            println!("  - {} (depends on: {})", module.id, dependencies.join(", "));
        }
    }
}

/// Show the computed bump for every module, unchanged modules dimmed
pub fn display_bump_plan(rows: &[BumpPlanRow]) {
    println!("\n{}", style("Version bump plan:").bold());
    for row in rows {
        match row.bump {
            BumpType::None => {
                println!("  {}", style(format!("{}: unchanged", row.module)).dim());
            }
            bump => {
                let current = row
                    .current
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "(none)".to_string());
                let next = row
                    .next
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "?".to_string());
                println!(
                    "  {}: {} -> {} ({})",
                    row.module,
                    style(current).red(),
                    style(next).green(),
                    bump
                );
            }
        }
    }
}

/// Ask a yes/no question, defaulting to no
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

// ava/src/commands/rules.rs
//
// USE CASE: Rule set tooling (static validation, template catalog).

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use std::path::Path;

use ava_core::AvaError;
use ava_core::domain::rules::{RuleValidator, builtin_templates};
use ava_core::infrastructure::config::read_rule_drafts;

pub fn validate(file: &Path) -> anyhow::Result<()> {
    println!("📏 Validating rules in {}", file.display());
    let drafts = read_rule_drafts(file).map_err(AvaError::from)?;

    let mut invalid = 0;
    for (idx, draft) in drafts.iter().enumerate() {
        let label = draft
            .id
            .clone()
            .or_else(|| draft.name.clone())
            .unwrap_or_else(|| format!("#{}", idx + 1));
        let validation = RuleValidator::validate_rule(draft);
        if validation.valid {
            println!("   ✅ {}", label);
        } else {
            invalid += 1;
            println!("   ❌ {}", label);
            for error in &validation.errors {
                println!("      - {}", error);
            }
        }
    }

    println!("📊 {} rule(s), {} invalid", drafts.len(), invalid);
    if invalid > 0 {
        std::process::exit(1);
    }
    Ok(())
}

pub fn templates() -> anyhow::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Name", "Category", "Type", "Example"]);

    for template in builtin_templates() {
        table.add_row(vec![
            template.id.to_string(),
            template.name.to_string(),
            template.category.to_string(),
            template.rule_type.to_string(),
            template.example_usage.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

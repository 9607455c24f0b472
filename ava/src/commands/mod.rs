// ava/src/commands/mod.rs

pub mod check;
pub mod rules;
pub mod workflow;

use std::path::Path;

use ava_core::AvaError;
use ava_core::infrastructure::fs::atomic_write;

/// Writes to `output` when given, stdout otherwise.
pub(crate) fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            atomic_write(path, content).map_err(AvaError::from)?;
            eprintln!("📄 Written to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

// ava-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::project::{ComplianceMode, ProjectConfig};
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["ava_project_conf.yaml", "ava.yaml"];

// --- LOADER ---

/// Strict loader: a missing project file is an error.
#[instrument(skip(project_dir))] // Log automatique de l'entrée/sortie de la fonction
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Découverte du fichier principal
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");

    // 2. Chargement YAML Base
    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)?;

    // 3. Override via Variables d'Environnement (Pattern 'Layering')
    // Permet de faire: AVA_COMPLIANCE_MODE=enforcement ava check
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

/// Same as `load_project_config`, but a project without configuration file
/// runs on defaults (env overrides still apply).
pub fn load_project_config_or_default(
    project_dir: &Path,
) -> Result<ProjectConfig, InfrastructureError> {
    match load_project_config(project_dir) {
        Err(InfrastructureError::ConfigNotFound(_)) => {
            info!(dir = ?project_dir, "No project configuration, using defaults");
            let mut config = ProjectConfig::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
            Ok(config)
        }
        other => other,
    }
}

pub fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

pub(crate) fn apply_env_overrides<F>(
    config: &mut ProjectConfig,
    lookup: F,
) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("AVA_RULES_PATH").filter(|v| !v.is_empty()) {
        info!(old = ?config.rules_path, new = ?val, "Overriding rules path via ENV");
        config.rules_path = val;
    }
    if let Some(val) = lookup("AVA_COMPLIANCE_MODE").filter(|v| !v.is_empty()) {
        let mode: ComplianceMode = val.parse().map_err(|e: String| {
            InfrastructureError::ConfigError(format!("AVA_COMPLIANCE_MODE: {}", e))
        })?;
        info!(old = %config.compliance_mode, new = %mode, "Overriding compliance mode via ENV");
        config.compliance_mode = mode;
    }
    Ok(())
}

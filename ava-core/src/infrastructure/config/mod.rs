pub mod project;
pub mod rules;

pub use crate::domain::project::ProjectConfig;
pub use project::{find_main_config, load_project_config, load_project_config_or_default};
pub use rules::{RuleSetSource, load_rule_set, read_rule_drafts};

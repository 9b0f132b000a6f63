use filedeck_palette::{COMMAND_HELP, COMMAND_REINDEX, COMMAND_SEARCH, COMMAND_SETTINGS};
use serde::Serialize;

/// What the host application should do after a palette command fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum HostAction {
    Search,
    Reindex,
    OpenSettings,
    ShowHelp,
    Custom(String),
}

impl HostAction {
    pub fn from_command_id(id: &str) -> Self {
        match id {
            COMMAND_SEARCH => Self::Search,
            COMMAND_REINDEX => Self::Reindex,
            COMMAND_SETTINGS => Self::OpenSettings,
            COMMAND_HELP => Self::ShowHelp,
            other => Self::Custom(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchNotice {
    Opened(String),
    NothingSelected,
    Failed { path: String, message: String },
}

impl LaunchNotice {
    pub fn message(&self) -> String {
        match self {
            Self::Opened(path) => format!("Opened {path}"),
            Self::NothingSelected => "Select a file to open".to_string(),
            Self::Failed { path, message } => format!("Failed to open {path}: {message}"),
        }
    }
}

use serde::{Deserialize, Serialize};
use shared::domain::{FileUpload, PluginArtifacts};

/// Everything the packer UI renders from.
///
/// `Default` is the state before any action has been applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub contents: FileUpload,
    pub ppk: FileUpload,
    pub plugin: PluginArtifacts,
    pub error: Option<String>,
    pub loading: bool,
}

impl AppState {
    /// A plugin bundle is loaded and no build is running. The key is optional
    /// since the builder generates one when none was uploaded.
    pub fn is_ready_to_package(&self) -> bool {
        self.contents.data.is_some() && !self.loading
    }

    pub fn has_artifacts(&self) -> bool {
        self.plugin.is_complete()
    }
}

//! The single place packer state changes.

use shared::domain::{ArtifactUrls, BlobDescriptor, FileUpload, MediaType, PluginArtifacts};

use crate::{
    action::{Action, PackagedPlugin},
    state::AppState,
};

/// Applies `action` to `state` and returns the next state.
///
/// `None` stands for "no state yet" and is replaced by [`AppState::default`]
/// before the action is applied. Fields an action does not mention are moved
/// through untouched, and [`Action::Other`] hands back the input value itself.
pub fn reduce(state: Option<AppState>, action: Action) -> AppState {
    let state = state.unwrap_or_default();
    tracing::trace!(kind = action.kind(), "reducing action");

    match action {
        Action::UploadPpk(ppk) => AppState { ppk, ..state },
        Action::UploadPluginStart => AppState {
            contents: FileUpload::default(),
            error: None,
            ..state
        },
        Action::UploadPlugin(contents) => AppState { contents, ..state },
        Action::UploadPluginFailure(error) | Action::CreatePluginZipFailure(error) => AppState {
            error: Some(error),
            loading: false,
            ..state
        },
        Action::CreatePluginZipStart => AppState {
            plugin: PluginArtifacts::default(),
            error: None,
            loading: true,
            ..state
        },
        Action::CreatePluginZip(packaged) => {
            let (ppk, plugin) = packaged_artifacts(packaged);
            AppState {
                ppk,
                plugin,
                loading: false,
                ..state
            }
        }
        Action::Reset => AppState::default(),
        Action::Other(_) => state,
    }
}

// The key file is named after the plugin id; the same key text backs both the
// stored `ppk` and its download.
fn packaged_artifacts(packaged: PackagedPlugin) -> (FileUpload, PluginArtifacts) {
    let PackagedPlugin {
        private_key,
        plugin,
        id,
    } = packaged;
    let key = private_key.into_bytes();

    let ppk = FileUpload::new(key.clone(), format!("{id}.ppk"));
    let artifacts = PluginArtifacts {
        id: Some(id),
        url: ArtifactUrls {
            contents: Some(BlobDescriptor::new(plugin, MediaType::Zip)),
            ppk: Some(BlobDescriptor::new(key, MediaType::PlainText)),
        },
    };
    (ppk, artifacts)
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;

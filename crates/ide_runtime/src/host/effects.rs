//! Effect dispatch for the IDE host boundary.

use ide_host::BackendError;
use leptos::{logging, spawn_local};

use crate::{
    host::{backend_effects, IdeHostContext},
    reducer::{IdeAction, IdeEffect},
    runtime_context::IdeRuntimeContext,
};

pub(super) fn run_effect(host: IdeHostContext, runtime: IdeRuntimeContext, effect: IdeEffect) {
    match effect {
        IdeEffect::Alert(message) => {
            if let Err(err) = host.dialog_service().alert(&message) {
                logging::warn!("alert failed: {err}; message was: {message}");
            }
        }
        IdeEffect::SaveArchive {
            file_name,
            mime_type,
            bytes,
        } => spawn_local(async move {
            if let Err(err) = host
                .download_service()
                .save_bytes(&file_name, &mime_type, &bytes)
                .await
            {
                runtime.dispatch_action(IdeAction::DownloadFailed {
                    error: BackendError::Transport(err),
                });
            }
        }),
        effect => spawn_local(async move {
            let backend = host.workspace_backend();
            if let Some(action) = backend_effects::resolve(backend.as_ref(), effect).await {
                runtime.dispatch_action(action);
            }
        }),
    }
}

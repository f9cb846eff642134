//! Host-side runtime helpers for executing reducer effects.
//!
//! The reducer stays pure; everything that touches the network or the browser runs behind the
//! service traits held by [`IdeHostContext`].

pub mod backend_effects;
mod effects;

use std::rc::Rc;

use ide_host::{BackendConfig, DialogService, DownloadService, WorkspaceBackend};
use ide_host_web::{backend_strategy_name, dialog_service, download_service, workspace_backend};

use crate::{reducer::IdeEffect, runtime_context::IdeRuntimeContext};

#[derive(Clone)]
/// Host service bundle for IDE runtime side effects.
pub struct IdeHostContext {
    backend: Rc<dyn WorkspaceBackend>,
    dialogs: Rc<dyn DialogService>,
    downloads: Rc<dyn DownloadService>,
    backend_strategy_name: &'static str,
}

impl IdeHostContext {
    /// Builds the browser service bundle for `config`.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            backend: Rc::new(workspace_backend(config)),
            dialogs: Rc::new(dialog_service()),
            downloads: Rc::new(download_service()),
            backend_strategy_name: backend_strategy_name(),
        }
    }

    /// Builds a bundle from explicit services.
    pub fn from_services(
        backend: Rc<dyn WorkspaceBackend>,
        dialogs: Rc<dyn DialogService>,
        downloads: Rc<dyn DownloadService>,
    ) -> Self {
        Self {
            backend,
            dialogs,
            downloads,
            backend_strategy_name: "custom",
        }
    }

    /// Returns the configured workspace backend.
    pub fn workspace_backend(&self) -> Rc<dyn WorkspaceBackend> {
        self.backend.clone()
    }

    /// Returns the configured dialog service.
    pub fn dialog_service(&self) -> Rc<dyn DialogService> {
        self.dialogs.clone()
    }

    /// Returns the configured download service.
    pub fn download_service(&self) -> Rc<dyn DownloadService> {
        self.downloads.clone()
    }

    /// Returns the stable name of the selected backend strategy.
    pub fn backend_strategy_name(&self) -> &'static str {
        self.backend_strategy_name
    }

    /// Asks the user for one line of text, logging dialog failures as a cancel.
    pub fn prompt(&self, message: &str) -> Option<String> {
        match self.dialogs.prompt(message) {
            Ok(answer) => answer,
            Err(err) => {
                leptos::logging::warn!("prompt failed: {err}");
                None
            }
        }
    }

    /// Executes a single [`IdeEffect`] emitted by the reducer.
    pub fn run_effect(&self, runtime: IdeRuntimeContext, effect: IdeEffect) {
        effects::run_effect(self.clone(), runtime, effect);
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use ide_host::{MemoryWorkspaceBackend, NoopDialogService, NoopDownloadService};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reducer::IdeAction;

    fn memory_host(backend: &MemoryWorkspaceBackend) -> IdeHostContext {
        IdeHostContext::from_services(
            Rc::new(backend.clone()),
            Rc::new(NoopDialogService),
            Rc::new(NoopDownloadService),
        )
    }

    #[test]
    fn injected_services_back_the_host_bundle() {
        let backend = MemoryWorkspaceBackend::default().with_file("src", "a.py", "print(1)");
        let host = memory_host(&backend);
        assert_eq!(host.backend_strategy_name(), "custom");

        let action = block_on(backend_effects::resolve(
            host.workspace_backend().as_ref(),
            IdeEffect::LoadTree,
        ));
        let Some(IdeAction::TreeLoaded { tree }) = action else {
            panic!("expected tree, got {action:?}");
        };
        assert!(tree.contains_file("src", "a.py"));
    }

    #[test]
    fn cancelled_prompt_and_silent_services_are_harmless() {
        let host = memory_host(&MemoryWorkspaceBackend::default());
        assert_eq!(host.prompt("Enter folder name:"), None);
        assert_eq!(host.dialog_service().alert("All files saved!"), Ok(()));
        assert_eq!(
            block_on(host.download_service().save_bytes(
                "project.zip",
                "application/zip",
                b"PK"
            )),
            Ok(())
        );
    }
}

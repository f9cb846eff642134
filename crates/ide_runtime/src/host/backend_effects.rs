//! Resolution of backend-bound effects into completion actions.

use ide_host::{BackendError, FileRef, FolderRequest, WorkspaceBackend};

use crate::{
    model::WorkspaceMutation,
    reducer::{IdeAction, IdeEffect},
};

/// Performs a backend-bound effect and returns the action reporting its outcome.
///
/// Returns `None` for effects that do not touch the workspace backend.
pub async fn resolve(backend: &dyn WorkspaceBackend, effect: IdeEffect) -> Option<IdeAction> {
    let action = match effect {
        IdeEffect::LoadTree => match backend.list_files().await {
            Ok(tree) => IdeAction::TreeLoaded { tree },
            Err(error) => IdeAction::TreeLoadFailed { error },
        },
        IdeEffect::ReadFile(ticket) => match backend.read_file(&ticket.file_ref()).await {
            Ok(content) => IdeAction::FileLoaded { ticket, content },
            Err(error) => IdeAction::FileLoadFailed { ticket, error },
        },
        IdeEffect::SaveFiles(requests) => {
            for request in &requests {
                if let Err(error) = backend.save_file(request).await {
                    return Some(IdeAction::SaveFailed {
                        file_name: request.file_name.clone(),
                        error,
                    });
                }
            }
            IdeAction::SaveFinished
        }
        IdeEffect::Execute(request) => match backend.execute(&request).await {
            Ok(response) => IdeAction::RunFinished { response },
            Err(error) => IdeAction::RunFailed { error },
        },
        IdeEffect::ApplyMutation(mutation) => match apply_mutation(backend, &mutation).await {
            Ok(()) => IdeAction::MutationApplied(mutation),
            Err(error) => IdeAction::MutationFailed { mutation, error },
        },
        IdeEffect::FetchArchive => match backend.download_project().await {
            Ok(archive) => IdeAction::DownloadFetched { archive },
            Err(error) => IdeAction::DownloadFailed { error },
        },
        IdeEffect::SaveArchive { .. } | IdeEffect::Alert(_) => return None,
    };
    Some(action)
}

async fn apply_mutation(
    backend: &dyn WorkspaceBackend,
    mutation: &WorkspaceMutation,
) -> Result<(), BackendError> {
    match mutation {
        WorkspaceMutation::CreateFolder { folder_name } => {
            backend
                .create_folder(&FolderRequest::new(folder_name.as_str()))
                .await
        }
        WorkspaceMutation::CreateFile { folder, file_name } => {
            backend
                .create_file(&FileRef::new(folder.as_str(), file_name.as_str()))
                .await
        }
        WorkspaceMutation::DeleteFolder { folder_name } => {
            backend
                .delete_folder(&FolderRequest::new(folder_name.as_str()))
                .await
        }
        WorkspaceMutation::DeleteFile { folder, file_name } => {
            backend
                .delete_file(&FileRef::new(folder.as_str(), file_name.as_str()))
                .await
        }
    }
}

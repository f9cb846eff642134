//! Reducer actions, side-effect intents, and transition logic for the IDE runtime.

use ide_host::{
    BackendError, ExecuteResponse, FileRequest, FileTree, ARCHIVE_FILE_NAME,
};
use thiserror::Error;

use crate::{
    model::{
        IdeState, WorkspaceMutation, ARCHIVE_MIME_TYPE, NO_FILES_TO_SAVE_MESSAGE,
        NO_FILE_OPEN_MESSAGE, RUNNING_MESSAGE, SAVED_ALL_MESSAGE,
    },
    session::{OpenOutcome, OpenTicket, SessionError},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_ide`]: UI events and completions of backend requests.
pub enum IdeAction {
    /// Reload the folder listing.
    RefreshTree,
    /// Folder listing arrived.
    TreeLoaded {
        /// New listing.
        tree: FileTree,
    },
    /// Folder listing failed.
    TreeLoadFailed {
        /// Failure cause.
        error: BackendError,
    },
    /// Expand or collapse a folder in the tree.
    ToggleFolder {
        /// Folder to toggle.
        folder: String,
    },
    /// Open a file into a tab (no-op when already open).
    OpenFile {
        /// Containing folder.
        folder: String,
        /// File name.
        name: String,
    },
    /// File content for an open request arrived.
    FileLoaded {
        /// Request identity.
        ticket: OpenTicket,
        /// Decoded file text.
        content: String,
    },
    /// File content for an open request could not be read.
    FileLoadFailed {
        /// Request identity.
        ticket: OpenTicket,
        /// Failure cause.
        error: BackendError,
    },
    /// Show an open file in the editing surface.
    ActivateTab {
        /// File to show.
        name: String,
    },
    /// Close a tab.
    CloseTab {
        /// File to close.
        name: String,
    },
    /// The editing surface text changed.
    EditorInput {
        /// Full surface text.
        text: String,
    },
    /// Save every open file.
    SaveAll,
    /// Every save of the batch succeeded.
    SaveFinished,
    /// A save failed; the rest of the batch was skipped.
    SaveFailed {
        /// File whose save failed.
        file_name: String,
        /// Failure cause.
        error: BackendError,
    },
    /// Execute the active file on the backend.
    Run,
    /// Execution finished.
    RunFinished {
        /// Backend response.
        response: ExecuteResponse,
    },
    /// Execution request failed.
    RunFailed {
        /// Failure cause.
        error: BackendError,
    },
    /// Create or delete a folder or file.
    Mutate(WorkspaceMutation),
    /// A mutation succeeded.
    MutationApplied(WorkspaceMutation),
    /// A mutation failed.
    MutationFailed {
        /// The failed mutation.
        mutation: WorkspaceMutation,
        /// Failure cause.
        error: BackendError,
    },
    /// Download the packaged project.
    Download,
    /// Archive bytes arrived.
    DownloadFetched {
        /// Archive body.
        archive: Vec<u8>,
    },
    /// Archive download failed.
    DownloadFailed {
        /// Failure cause.
        error: BackendError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_ide`] for the host layer to execute.
pub enum IdeEffect {
    /// `GET /list-files`.
    LoadTree,
    /// `GET /read-file` for an open request.
    ReadFile(OpenTicket),
    /// `POST /save-file` for each request, sequentially, stopping at the first failure.
    SaveFiles(Vec<FileRequest>),
    /// `POST /execute`.
    Execute(FileRequest),
    /// Create/delete request.
    ApplyMutation(WorkspaceMutation),
    /// `GET /download-project`.
    FetchArchive,
    /// Offer downloaded bytes to the user as a file.
    SaveArchive {
        /// Suggested file name.
        file_name: String,
        /// MIME type of the payload.
        mime_type: String,
        /// Archive body.
        bytes: Vec<u8>,
    },
    /// Blocking user-facing message.
    Alert(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum ReducerError {
    /// The session rejected the operation.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// A create/delete request is missing a required field.
    #[error("a {0} is required")]
    MissingField(&'static str),
}

/// Applies an [`IdeAction`] to the IDE state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] for actions rejected by validation; the state is left unchanged.
pub fn reduce_ide(state: &mut IdeState, action: IdeAction) -> Result<Vec<IdeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        IdeAction::RefreshTree => effects.push(IdeEffect::LoadTree),
        IdeAction::TreeLoaded { tree } => state.tree.replace(tree),
        IdeAction::TreeLoadFailed { error } => {
            state.console = format!("Error: could not load files: {error}");
        }
        IdeAction::ToggleFolder { folder } => state.tree.toggle(&folder),
        IdeAction::OpenFile { folder, name } => {
            if let OpenOutcome::Fetch(ticket) = state.session.begin_open(&folder, &name)? {
                effects.push(IdeEffect::ReadFile(ticket));
            }
        }
        IdeAction::FileLoaded { ticket, content } => {
            state.session.finish_open(&ticket, content);
        }
        IdeAction::FileLoadFailed { ticket, error } => {
            if state.session.abandon_open(&ticket) {
                state.console = format!("Error: could not open {}: {error}", ticket.name);
            }
        }
        IdeAction::ActivateTab { name } => state.session.activate(&name)?,
        IdeAction::CloseTab { name } => {
            state.session.close(&name);
        }
        IdeAction::EditorInput { text } => state.session.edit_surface(text),
        IdeAction::SaveAll => {
            let requests = state.session.save_requests();
            if requests.is_empty() {
                effects.push(IdeEffect::Alert(NO_FILES_TO_SAVE_MESSAGE.to_string()));
            } else {
                state.saving = true;
                effects.push(IdeEffect::SaveFiles(requests));
            }
        }
        IdeAction::SaveFinished => {
            state.saving = false;
            effects.push(IdeEffect::Alert(SAVED_ALL_MESSAGE.to_string()));
        }
        IdeAction::SaveFailed { file_name, error } => {
            state.saving = false;
            effects.push(IdeEffect::Alert(format!(
                "Error saving file '{file_name}': {error}"
            )));
        }
        IdeAction::Run => match state.session.execute_request() {
            Some(request) => {
                state.running = true;
                state.console = RUNNING_MESSAGE.to_string();
                effects.push(IdeEffect::Execute(request));
            }
            None => state.console = NO_FILE_OPEN_MESSAGE.to_string(),
        },
        IdeAction::RunFinished { response } => {
            state.running = false;
            state.console = response.display_text().to_string();
        }
        IdeAction::RunFailed { error } => {
            state.running = false;
            state.console = format!("Error: {error}");
        }
        IdeAction::Mutate(mutation) => {
            if let Some(field) = mutation.missing_field() {
                return Err(ReducerError::MissingField(field));
            }
            effects.push(IdeEffect::ApplyMutation(mutation));
        }
        IdeAction::MutationApplied(mutation) => {
            close_deleted_tabs(state, &mutation);
            effects.push(IdeEffect::Alert(mutation.success_message()));
            effects.push(IdeEffect::LoadTree);
        }
        IdeAction::MutationFailed { mutation, error } => {
            effects.push(IdeEffect::Alert(mutation.failure_message(&error)));
        }
        IdeAction::Download => effects.push(IdeEffect::FetchArchive),
        IdeAction::DownloadFetched { archive } => effects.push(IdeEffect::SaveArchive {
            file_name: ARCHIVE_FILE_NAME.to_string(),
            mime_type: ARCHIVE_MIME_TYPE.to_string(),
            bytes: archive,
        }),
        IdeAction::DownloadFailed { error } => {
            state.console = format!("Error: could not download project: {error}");
        }
    }
    Ok(effects)
}

fn close_deleted_tabs(state: &mut IdeState, mutation: &WorkspaceMutation) {
    let doomed: Vec<String> = match mutation {
        WorkspaceMutation::DeleteFile { folder, file_name } => state
            .session
            .get(file_name)
            .filter(|file| &file.folder == folder)
            .map(|file| vec![file.name.clone()])
            .unwrap_or_default(),
        WorkspaceMutation::DeleteFolder { folder_name } => state
            .session
            .files()
            .iter()
            .filter(|file| &file.folder == folder_name)
            .map(|file| file.name.clone())
            .collect(),
        WorkspaceMutation::CreateFolder { .. } | WorkspaceMutation::CreateFile { .. } => {
            Vec::new()
        }
    };
    for name in doomed {
        state.session.close(&name);
    }
}

pub mod components;
pub mod effect_executor;
pub mod host;
pub mod model;
pub mod reducer;
pub mod runtime_context;
pub mod session;

pub use components::{gutter_text, IdeShell, MutationCommand};
pub use host::IdeHostContext;
pub use model::{FileTreeState, IdeState, WorkspaceMutation};
pub use reducer::{reduce_ide, IdeAction, IdeEffect, ReducerError};
pub use runtime_context::{use_ide_runtime, IdeProvider, IdeRuntimeContext};
pub use session::{OpenFile, OpenOutcome, OpenTicket, Session, SessionError, TabId};

//! Runtime provider and context wiring for the IDE.
//!
//! This module owns the long-lived reducer container and effect queue. UI composition stays in
//! [`crate::components`].

use ide_host::BackendConfig;
use leptos::*;

use crate::{
    effect_executor,
    host::IdeHostContext,
    model::IdeState,
    reducer::{reduce_ide, IdeAction, IdeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading IDE state and dispatching [`IdeAction`] values.
pub struct IdeRuntimeContext {
    /// Host service bundle for executing side effects.
    pub host: StoredValue<IdeHostContext>,
    /// Reactive IDE state signal.
    pub state: RwSignal<IdeState>,
    /// Queue of effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<IdeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<IdeAction>,
}

impl IdeRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: IdeAction) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`IdeRuntimeContext`] to descendant components and loads the file tree.
pub fn IdeProvider(
    /// Backend location resolved by the entry layer.
    config: BackendConfig,
    children: Children,
) -> impl IntoView {
    let host = IdeHostContext::new(config);
    logging::log!(
        "ide runtime using {} backend strategy",
        host.backend_strategy_name()
    );
    let host = store_value(host);
    let state = create_rw_signal(IdeState::default());
    let effects = create_rw_signal(Vec::<IdeEffect>::new());

    let dispatch = Callback::new(move |action: IdeAction| {
        // Keystrokes edit the surface in place.
        let action = match action {
            IdeAction::EditorInput { text } => {
                apply_editor_input(state, text);
                return;
            }
            other => other,
        };

        let mut ide = state.get_untracked();
        let previous = ide.clone();

        match reduce_ide(&mut ide, action) {
            Ok(new_effects) => {
                if ide != previous {
                    state.set(ide);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("ide reducer error: {err}"),
        }
    });

    let runtime = IdeRuntimeContext {
        host,
        state,
        effects,
        dispatch,
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    runtime.dispatch_action(IdeAction::RefreshTree);

    children().into_view()
}

fn apply_editor_input(state: RwSignal<IdeState>, text: String) {
    if state.with_untracked(|ide| ide.session.accepts_edit(&text)) {
        state.update(|ide| ide.session.edit_surface(text));
    }
}

/// Returns the current [`IdeRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`IdeProvider`].
pub fn use_ide_runtime() -> IdeRuntimeContext {
    use_context::<IdeRuntimeContext>().expect("IdeRuntimeContext not provided")
}

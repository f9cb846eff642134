//! Effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::runtime_context::IdeRuntimeContext;

/// Installs the effect executor that drains reducer-emitted effects in order.
pub fn install(runtime: IdeRuntimeContext) {
    // Clear the queue before running so nested dispatches enqueue a fresh batch.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            runtime.host.get_value().run_effect(runtime, effect);
        }
    });
}

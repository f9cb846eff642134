use ide_host::BackendConfig;
use ide_runtime::{IdeProvider, IdeShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

/// Resolves the backend location from the build default and an optional `?backend=` override.
///
/// An invalid override is logged and ignored.
pub fn resolve_backend_config(query_override: Option<&str>) -> BackendConfig {
    let base = BackendConfig::from_build_env();
    match base.with_override(query_override) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("ignoring backend override: {err}");
            base
        }
    }
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Sandbox IDE" />
        <Meta name="description" content="Browser front-end for the sandbox code runner." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=IdeEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn IdeEntry() -> impl IntoView {
    let query = use_query_map();
    let config = query
        .with_untracked(|map| resolve_backend_config(map.get("backend").map(String::as_str)));

    view! {
        <IdeProvider config=config>
            <IdeShell />
        </IdeProvider>
    }
}

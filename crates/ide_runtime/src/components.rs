//! IDE shell composition: toolbar, file tree, tab strip, editor, and console.

use leptos::*;

use crate::{
    model::WorkspaceMutation,
    reducer::IdeAction,
    runtime_context::{use_ide_runtime, IdeRuntimeContext},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Toolbar mutation commands that collect their arguments through prompts.
pub enum MutationCommand {
    /// Create a top-level folder.
    CreateFolder,
    /// Create an empty file in a folder.
    CreateFile,
    /// Delete a folder and its files.
    DeleteFolder,
    /// Delete one file.
    DeleteFile,
}

impl MutationCommand {
    /// Toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::CreateFolder => "New Folder",
            Self::CreateFile => "New File",
            Self::DeleteFolder => "Delete Folder",
            Self::DeleteFile => "Delete File",
        }
    }

    /// Collects the command arguments through `ask`.
    ///
    /// Returns `None` as soon as a prompt is cancelled or answered with blank text.
    pub fn collect(
        self,
        mut ask: impl FnMut(&str) -> Option<String>,
    ) -> Option<WorkspaceMutation> {
        let mut answer = |message: &str| {
            ask(message)
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
        };
        Some(match self {
            Self::CreateFolder => WorkspaceMutation::CreateFolder {
                folder_name: answer("Enter folder name:")?,
            },
            Self::CreateFile => {
                let folder = answer("Enter folder name:")?;
                WorkspaceMutation::CreateFile {
                    folder,
                    file_name: answer("Enter file name:")?,
                }
            }
            Self::DeleteFolder => WorkspaceMutation::DeleteFolder {
                folder_name: answer("Enter folder name to delete:")?,
            },
            Self::DeleteFile => {
                let folder = answer("Enter folder name:")?;
                WorkspaceMutation::DeleteFile {
                    folder,
                    file_name: answer("Enter file name to delete:")?,
                }
            }
        })
    }
}

fn run_mutation_command(runtime: IdeRuntimeContext, command: MutationCommand) {
    let host = runtime.host.get_value();
    if let Some(mutation) = command.collect(|message| host.prompt(message)) {
        runtime.dispatch_action(IdeAction::Mutate(mutation));
    }
}

#[component]
/// Full IDE layout bound to the surrounding [`crate::IdeProvider`].
pub fn IdeShell() -> impl IntoView {
    view! {
        <div class="ide-shell">
            <IdeToolbar />
            <div class="ide-body">
                <FileTreePanel />
                <div class="ide-main">
                    <TabStrip />
                    <EditorPane />
                    <ConsolePanel />
                </div>
            </div>
        </div>
    }
}

#[component]
fn IdeToolbar() -> impl IntoView {
    let runtime = use_ide_runtime();
    let state = runtime.state;

    let mutation_buttons = [
        MutationCommand::CreateFolder,
        MutationCommand::CreateFile,
        MutationCommand::DeleteFolder,
        MutationCommand::DeleteFile,
    ]
    .into_iter()
    .map(|command| {
        view! {
            <button
                type="button"
                class="ide-button"
                on:click=move |_| run_mutation_command(runtime, command)
            >
                {command.label()}
            </button>
        }
    })
    .collect_view();

    view! {
        <div class="ide-toolbar" role="toolbar" aria-label="Workspace actions">
            {mutation_buttons}
            <button
                type="button"
                class="ide-button"
                on:click=move |_| runtime.dispatch_action(IdeAction::RefreshTree)
            >
                "Refresh"
            </button>
            <button
                type="button"
                class="ide-button"
                disabled=move || state.get().saving
                on:click=move |_| runtime.dispatch_action(IdeAction::SaveAll)
            >
                "Save All"
            </button>
            <button
                type="button"
                class="ide-button ide-button-primary"
                disabled=move || state.get().running
                on:click=move |_| runtime.dispatch_action(IdeAction::Run)
            >
                "Run"
            </button>
            <button
                type="button"
                class="ide-button"
                on:click=move |_| runtime.dispatch_action(IdeAction::Download)
            >
                "Download"
            </button>
        </div>
    }
}

#[component]
fn FileTreePanel() -> impl IntoView {
    let runtime = use_ide_runtime();
    let state = runtime.state;
    let folders = move || {
        state
            .get()
            .tree
            .tree
            .folders
            .into_iter()
            .collect::<Vec<(String, Vec<String>)>>()
    };

    view! {
        <nav class="ide-file-tree" aria-label="Project files">
            <Show
                when=move || state.get().tree.loaded
                fallback=|| view! { <p class="ide-muted">"Loading files..."</p> }
            >
                <ul class="ide-tree-root">
                    <For
                        each=folders
                        key=|(folder, files)| (folder.clone(), files.clone())
                        let:entry
                    >
                        {
                            let (folder, files) = entry;
                            let toggle_folder = folder.clone();
                            let expanded_folder = folder.clone();
                            let is_expanded =
                                create_memo(move |_| state.get().tree.is_expanded(&expanded_folder));
                            let file_items = files
                                .into_iter()
                                .map(|name| {
                                    let open_folder = folder.clone();
                                    let open_name = name.clone();
                                    view! {
                                        <li
                                            class="ide-tree-file"
                                            on:click=move |_| {
                                                runtime.dispatch_action(IdeAction::OpenFile {
                                                    folder: open_folder.clone(),
                                                    name: open_name.clone(),
                                                })
                                            }
                                        >
                                            {name}
                                        </li>
                                    }
                                })
                                .collect_view();
                            view! {
                                <li class="ide-tree-folder">
                                    <span
                                        class="ide-tree-folder-label"
                                        on:click=move |_| {
                                            runtime.dispatch_action(IdeAction::ToggleFolder {
                                                folder: toggle_folder.clone(),
                                            })
                                        }
                                    >
                                        {move || if is_expanded.get() { "▾ " } else { "▸ " }}
                                        {folder.clone()}
                                    </span>
                                    <ul class="ide-tree-files" class:hidden=move || !is_expanded.get()>
                                        {file_items}
                                    </ul>
                                </li>
                            }
                        }
                    </For>
                </ul>
            </Show>
        </nav>
    }
}

#[component]
fn TabStrip() -> impl IntoView {
    let runtime = use_ide_runtime();
    let state = runtime.state;

    view! {
        <div class="ide-tabstrip" role="tablist" aria-label="Open files">
            <For
                each=move || state.get().session.files().to_vec()
                key=|file| file.tab
                let:file
            >
                {
                    let active_name = file.name.clone();
                    let activate_name = file.name.clone();
                    let close_name = file.name.clone();
                    view! {
                        <div
                            class="ide-tab"
                            role="tab"
                            data-active=move || {
                                if state.get().session.active_name() == Some(active_name.as_str()) {
                                    "true"
                                } else {
                                    "false"
                                }
                            }
                            on:click=move |_| {
                                runtime.dispatch_action(IdeAction::ActivateTab {
                                    name: activate_name.clone(),
                                })
                            }
                        >
                            <span class="ide-tab-label">{file.name.clone()}</span>
                            <button
                                type="button"
                                class="ide-tab-close"
                                aria-label=format!("Close {}", file.name)
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    runtime.dispatch_action(IdeAction::CloseTab {
                                        name: close_name.clone(),
                                    });
                                }
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            </For>
        </div>
    }
}

/// Line numbers for the editor gutter, one per line of `text`.
pub fn gutter_text(text: &str) -> String {
    let lines = text.split('\n').count();
    (1..=lines)
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[component]
fn EditorPane() -> impl IntoView {
    let runtime = use_ide_runtime();
    let state = runtime.state;
    let surface = create_memo(move |_| state.with(|ide| ide.session.surface().to_string()));
    let has_active = create_memo(move |_| state.with(|ide| ide.session.active_name().is_some()));
    let gutter = create_memo(move |_| surface.with(|text| gutter_text(text)));

    view! {
        <div class="ide-editor-frame">
            <pre class="ide-gutter" aria-hidden="true">{move || gutter.get()}</pre>
            <textarea
                class="ide-editor"
                prop:value=move || surface.get()
                prop:disabled=move || !has_active.get()
                on:input=move |ev| {
                    runtime.dispatch_action(IdeAction::EditorInput {
                        text: event_target_value(&ev),
                    })
                }
                spellcheck="false"
                autocomplete="off"
                wrap="off"
                aria-label="Code editor"
            />
        </div>
    }
}

#[component]
fn ConsolePanel() -> impl IntoView {
    let state = use_ide_runtime().state;

    view! {
        <pre class="ide-console" role="log" aria-live="polite">
            {move || state.get().console}
        </pre>
    }
}

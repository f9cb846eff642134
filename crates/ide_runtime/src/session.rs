//! Open-file session tracking for the shared editing surface.
//!
//! The editor shows one buffer (the *surface*) that is multiplexed across every open file. A
//! file's tracked `content` only picks up edits at an explicit [`Session::sync_active_content`],
//! which runs on every tab switch and before any save or execute.

use std::collections::BTreeMap;

use ide_host::{FileRef, FileRequest};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Opaque handle of a tab in the tab strip. Allocated monotonically, never reused.
pub struct TabId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
/// One open file.
pub struct OpenFile {
    /// File name; unique among open files.
    pub name: String,
    /// Containing folder, fixed at open time.
    pub folder: String,
    /// Text last loaded from the backend or last synced from the surface.
    pub content: String,
    /// Tab bound to this file.
    pub tab: TabId,
}

impl OpenFile {
    /// Save/execute payload for this file's tracked content.
    pub fn to_request(&self) -> FileRequest {
        FileRequest {
            folder: self.folder.clone(),
            file_name: self.name.clone(),
            code: self.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Identity of one in-flight open request.
pub struct OpenTicket {
    /// Request id, unique per session.
    pub id: u64,
    /// Folder being read.
    pub folder: String,
    /// File being read.
    pub name: String,
}

impl OpenTicket {
    /// Backend reference of the file being read.
    pub fn file_ref(&self) -> FileRef {
        FileRef::new(self.folder.clone(), self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of [`Session::begin_open`].
pub enum OpenOutcome {
    /// The file is already open; its tab is reused and nothing is fetched.
    AlreadyOpen,
    /// An open for the same name is in flight already.
    AlreadyPending,
    /// The content must be fetched; complete with [`Session::finish_open`] or
    /// [`Session::abandon_open`].
    Fetch(OpenTicket),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejected session operations.
pub enum SessionError {
    /// Open was called without a folder.
    #[error("a folder is required to open a file")]
    MissingFolder,
    /// Open was called without a file name.
    #[error("a file name is required to open a file")]
    MissingName,
    /// Activate was called with a name that is not open.
    #[error("file is not open: {0}")]
    NotOpen(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Open files, the active-file pointer, and the shared editing surface.
pub struct Session {
    files: Vec<OpenFile>,
    active: Option<String>,
    surface: String,
    pending: BTreeMap<String, OpenTicket>,
    next_tab_id: u64,
    next_ticket_id: u64,
}

impl Session {
    /// Starts opening `name` from `folder`.
    ///
    /// Names are backend identifiers and are kept verbatim; only blank input is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingFolder`] or [`SessionError::MissingName`] for blank inputs.
    pub fn begin_open(&mut self, folder: &str, name: &str) -> Result<OpenOutcome, SessionError> {
        if folder.trim().is_empty() {
            return Err(SessionError::MissingFolder);
        }
        if name.trim().is_empty() {
            return Err(SessionError::MissingName);
        }
        if self.contains(name) {
            return Ok(OpenOutcome::AlreadyOpen);
        }
        if self.pending.contains_key(name) {
            return Ok(OpenOutcome::AlreadyPending);
        }

        self.next_ticket_id += 1;
        let ticket = OpenTicket {
            id: self.next_ticket_id,
            folder: folder.to_string(),
            name: name.to_string(),
        };
        self.pending.insert(ticket.name.clone(), ticket.clone());
        Ok(OpenOutcome::Fetch(ticket))
    }

    /// Completes an open with fetched `content` and activates the new tab.
    ///
    /// Returns `None` (and changes nothing) for stale tickets: the open was closed or superseded
    /// while in flight, or the name is already open.
    pub fn finish_open(&mut self, ticket: &OpenTicket, content: String) -> Option<TabId> {
        if !self.take_pending(ticket) || self.contains(&ticket.name) {
            return None;
        }

        self.sync_active_content();
        self.next_tab_id += 1;
        let tab = TabId(self.next_tab_id);
        self.files.push(OpenFile {
            name: ticket.name.clone(),
            folder: ticket.folder.clone(),
            content,
            tab,
        });
        self.show(&ticket.name);
        Some(tab)
    }

    /// Drops a failed open. Returns `false` when the ticket was already stale.
    pub fn abandon_open(&mut self, ticket: &OpenTicket) -> bool {
        self.take_pending(ticket)
    }

    /// Makes `name` the active file after syncing the outgoing one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotOpen`] when `name` is not open; nothing changes.
    pub fn activate(&mut self, name: &str) -> Result<(), SessionError> {
        if !self.contains(name) {
            return Err(SessionError::NotOpen(name.to_string()));
        }
        self.sync_active_content();
        self.show(name);
        Ok(())
    }

    /// Closes `name` and cancels any in-flight open for it. Returns `true` if a tab was removed.
    ///
    /// Closing the active file promotes the first remaining tab, or clears the surface.
    pub fn close(&mut self, name: &str) -> bool {
        self.pending.remove(name);
        let Some(index) = self.files.iter().position(|f| f.name == name) else {
            return false;
        };
        self.files.remove(index);

        if self.active.as_deref() == Some(name) {
            match self.files.first().map(|f| f.name.clone()) {
                Some(next) => self.show(&next),
                None => {
                    self.active = None;
                    self.surface.clear();
                }
            }
        }
        true
    }

    /// Writes the surface text back into the active file. Returns the synced file, if any.
    pub fn sync_active_content(&mut self) -> Option<&OpenFile> {
        let active = self.active.as_deref()?;
        let file = self.files.iter_mut().find(|f| f.name == active)?;
        if file.content != self.surface {
            file.content.clone_from(&self.surface);
        }
        Some(&*file)
    }

    /// Replaces the surface text (editor input). File records are untouched until the next sync.
    ///
    /// Ignored while no file is active; the surface stays empty then.
    pub fn edit_surface(&mut self, text: String) {
        if self.active.is_some() {
            self.surface = text;
        }
    }

    /// Returns `true` when [`Session::edit_surface`] with `text` would change the surface.
    pub fn accepts_edit(&self, text: &str) -> bool {
        self.active.is_some() && self.surface != text
    }

    /// Text currently shown in the editing surface.
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Open files in tab order.
    pub fn files(&self) -> &[OpenFile] {
        &self.files
    }

    /// Looks up an open file by name.
    pub fn get(&self, name: &str) -> Option<&OpenFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Returns `true` when `name` is open.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns `true` while an open for `name` is in flight.
    pub fn is_pending(&self, name: &str) -> bool {
        self.pending.contains_key(name)
    }

    /// Name of the active file.
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active file record.
    pub fn active_file(&self) -> Option<&OpenFile> {
        self.active.as_deref().and_then(|name| self.get(name))
    }

    /// Syncs, then returns the save payload of every open file in tab order.
    pub fn save_requests(&mut self) -> Vec<FileRequest> {
        self.sync_active_content();
        self.files.iter().map(OpenFile::to_request).collect()
    }

    /// Syncs, then returns the execute payload of the active file.
    pub fn execute_request(&mut self) -> Option<FileRequest> {
        self.sync_active_content().map(OpenFile::to_request)
    }

    fn show(&mut self, name: &str) {
        if let Some(file) = self.files.iter().find(|f| f.name == name) {
            self.surface.clone_from(&file.content);
            self.active = Some(file.name.clone());
        }
    }

    fn take_pending(&mut self, ticket: &OpenTicket) -> bool {
        match self.pending.get(&ticket.name) {
            Some(current) if current.id == ticket.id => {
                self.pending.remove(&ticket.name);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn ticket(outcome: OpenOutcome) -> OpenTicket {
        match outcome {
            OpenOutcome::Fetch(ticket) => ticket,
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    fn open(session: &mut Session, folder: &str, name: &str, content: &str) -> TabId {
        let ticket = ticket(session.begin_open(folder, name).expect("begin open"));
        session
            .finish_open(&ticket, content.to_string())
            .expect("finish open")
    }

    fn tab_names(session: &Session) -> Vec<&str> {
        session.files().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn opening_an_open_file_again_reuses_its_tab() {
        let mut session = Session::default();
        let tab = open(&mut session, "src", "a.py", "print('a')");
        session.edit_surface("edited".to_string());

        assert_eq!(
            session.begin_open("src", "a.py"),
            Ok(OpenOutcome::AlreadyOpen)
        );
        assert_eq!(session.files().len(), 1);
        assert_eq!(session.files()[0].tab, tab);
        assert_eq!(session.surface(), "edited");
    }

    #[test]
    fn second_open_while_in_flight_does_not_fetch_twice() {
        let mut session = Session::default();
        let first = ticket(session.begin_open("src", "a.py").expect("open"));
        assert_eq!(
            session.begin_open("src", "a.py"),
            Ok(OpenOutcome::AlreadyPending)
        );
        assert!(session.is_pending("a.py"));
        session.finish_open(&first, "a".to_string()).expect("finish");
        assert!(!session.is_pending("a.py"));
        assert_eq!(tab_names(&session), vec!["a.py"]);
    }

    #[test]
    fn blank_inputs_are_rejected() {
        let mut session = Session::default();
        assert_eq!(
            session.begin_open("  ", "a.py"),
            Err(SessionError::MissingFolder)
        );
        assert_eq!(session.begin_open("src", ""), Err(SessionError::MissingName));
        assert_eq!(session, Session::default());
    }

    #[test]
    fn names_with_surrounding_whitespace_are_kept_verbatim() {
        let mut session = Session::default();
        let pending = ticket(session.begin_open(" src", " notes.py").expect("open"));
        assert_eq!(pending.file_ref(), FileRef::new(" src", " notes.py"));

        session
            .finish_open(&pending, "n".to_string())
            .expect("finish");
        assert_eq!(tab_names(&session), vec![" notes.py"]);
        assert!(!session.contains("notes.py"));
        assert_eq!(
            session.begin_open("src", " notes.py"),
            Ok(OpenOutcome::AlreadyOpen)
        );

        assert!(session.close(" notes.py"));
        assert!(session.files().is_empty());
    }

    #[test]
    fn accepts_edit_only_for_changes_to_an_active_file() {
        let mut session = Session::default();
        assert!(!session.accepts_edit("x"));
        open(&mut session, "src", "a.py", "a");
        assert!(!session.accepts_edit("a"));
        assert!(session.accepts_edit("a!"));
    }

    #[test]
    fn close_of_non_active_tab_keeps_active_file() {
        let mut session = Session::default();
        open(&mut session, "src", "a.py", "a");
        open(&mut session, "src", "b.py", "b");
        session.edit_surface("b edited".to_string());

        assert!(session.close("a.py"));
        assert_eq!(session.active_name(), Some("b.py"));
        assert_eq!(session.surface(), "b edited");
    }

    #[test]
    fn closing_active_promotes_first_remaining_tab() {
        let mut session = Session::default();
        open(&mut session, "src", "a.py", "a");
        open(&mut session, "src", "b.py", "b");
        open(&mut session, "src", "c.py", "c");
        assert_eq!(session.active_name(), Some("c.py"));

        assert!(session.close("c.py"));
        assert_eq!(session.active_name(), Some("a.py"));
        assert_eq!(session.surface(), "a");
    }

    #[test]
    fn closing_last_file_clears_surface() {
        let mut session = Session::default();
        open(&mut session, "src", "a.py", "a");
        session.edit_surface("unsaved".to_string());

        assert!(session.close("a.py"));
        assert_eq!(session.active_name(), None);
        assert_eq!(session.surface(), "");
        assert!(session.files().is_empty());
    }

    #[test]
    fn closing_unknown_file_is_noop() {
        let mut session = Session::default();
        open(&mut session, "src", "a.py", "a");
        let before = session.clone();
        assert!(!session.close("missing.py"));
        assert_eq!(session, before);
    }

    #[test]
    fn open_two_then_close_first_shows_second() {
        let mut session = Session::default();
        open(&mut session, "src", "a.py", "print('a')");
        open(&mut session, "src", "b.py", "print('b')");
        session.close("a.py");

        assert_eq!(tab_names(&session), vec!["b.py"]);
        assert_eq!(session.active_name(), Some("b.py"));
        assert_eq!(session.surface(), "print('b')");
    }

    #[test]
    fn failed_open_leaves_session_empty() {
        let mut session = Session::default();
        let ticket = ticket(session.begin_open("src", "a.py").expect("open"));
        assert!(session.abandon_open(&ticket));

        assert!(session.files().is_empty());
        assert_eq!(session.active_name(), None);
        assert!(!session.is_pending("a.py"));
        assert_eq!(session.surface(), "");
    }

    #[test]
    fn switching_tabs_syncs_outgoing_edits() {
        let mut session = Session::default();
        open(&mut session, "src", "a.py", "a");
        open(&mut session, "src", "b.py", "b");
        session.activate("a.py").expect("activate a");
        session.edit_surface("a edited".to_string());

        session.activate("b.py").expect("activate b");
        assert_eq!(session.get("a.py").expect("a").content, "a edited");
        assert_eq!(session.surface(), "b");

        session.activate("a.py").expect("activate a again");
        assert_eq!(session.surface(), "a edited");
    }

    #[test]
    fn opening_a_new_file_syncs_outgoing_edits() {
        let mut session = Session::default();
        open(&mut session, "src", "a.py", "a");
        session.edit_surface("a edited".to_string());
        open(&mut session, "src", "b.py", "b");

        assert_eq!(session.get("a.py").expect("a").content, "a edited");
        assert_eq!(session.surface(), "b");
    }

    #[test]
    fn activating_missing_file_is_rejected_without_change() {
        let mut session = Session::default();
        open(&mut session, "src", "a.py", "a");
        session.edit_surface("pending edit".to_string());
        let before = session.clone();

        assert_eq!(
            session.activate("ghost.py"),
            Err(SessionError::NotOpen("ghost.py".to_string()))
        );
        assert_eq!(session, before);
    }

    #[test]
    fn late_response_after_close_is_ignored() {
        let mut session = Session::default();
        let stale = ticket(session.begin_open("src", "a.py").expect("open"));
        assert!(!session.close("a.py"));
        assert!(!session.is_pending("a.py"));

        assert_eq!(session.finish_open(&stale, "late".to_string()), None);
        assert!(session.files().is_empty());
    }

    #[test]
    fn reopen_after_close_replaces_stale_ticket() {
        let mut session = Session::default();
        let stale = ticket(session.begin_open("src", "a.py").expect("open"));
        session.close("a.py");
        let fresh = ticket(session.begin_open("src", "a.py").expect("reopen"));
        assert_ne!(stale.id, fresh.id);

        assert_eq!(session.finish_open(&stale, "old".to_string()), None);
        assert!(!session.abandon_open(&stale));
        session.finish_open(&fresh, "new".to_string()).expect("fresh");
        assert_eq!(session.surface(), "new");
        assert_eq!(tab_names(&session), vec!["a.py"]);
    }

    #[test]
    fn completions_apply_in_arrival_order() {
        let mut session = Session::default();
        let a = ticket(session.begin_open("src", "a.py").expect("a"));
        let b = ticket(session.begin_open("lib", "b.py").expect("b"));

        session.finish_open(&b, "b".to_string()).expect("b first");
        session.finish_open(&a, "a".to_string()).expect("a second");

        assert_eq!(tab_names(&session), vec!["b.py", "a.py"]);
        assert_eq!(session.active_name(), Some("a.py"));
        assert_eq!(session.get("b.py").expect("b").folder, "lib");
    }

    #[test]
    fn activating_sole_remaining_file_after_closes() {
        let mut session = Session::default();
        open(&mut session, "src", "a.py", "a");
        open(&mut session, "src", "b.py", "b");
        open(&mut session, "src", "c.py", "c");
        session.close("a.py");
        session.close("c.py");

        session.activate("b.py").expect("activate");
        assert_eq!(tab_names(&session), vec!["b.py"]);
        assert_eq!(session.surface(), "b");
    }

    #[test]
    fn save_and_execute_requests_use_synced_content() {
        let mut session = Session::default();
        open(&mut session, "src", "a.py", "a");
        open(&mut session, "src", "b.py", "b");
        session.edit_surface("b edited".to_string());

        let saves = session.save_requests();
        assert_eq!(
            saves.iter().map(|r| r.code.as_str()).collect::<Vec<_>>(),
            vec!["a", "b edited"]
        );
        let run = session.execute_request().expect("active file");
        assert_eq!(run.file_name, "b.py");
        assert_eq!(run.code, "b edited");

        session.close("a.py");
        session.close("b.py");
        assert_eq!(session.execute_request(), None);
    }

    #[test]
    fn edits_without_active_file_are_dropped() {
        let mut session = Session::default();
        session.edit_surface("typed into nothing".to_string());
        assert_eq!(session.surface(), "");
    }

    #[test]
    fn tab_ids_are_never_reused() {
        let mut session = Session::default();
        let first = open(&mut session, "src", "a.py", "a");
        session.close("a.py");
        let second = open(&mut session, "src", "a.py", "a");
        assert!(second > first);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Open(usize),
        Close(usize),
        Activate(usize),
        Edit(String),
    }

    const NAMES: [&str; 4] = ["a.py", "b.py", "c.java", "d.txt"];

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..NAMES.len()).prop_map(Op::Open),
            (0..NAMES.len()).prop_map(Op::Close),
            (0..NAMES.len()).prop_map(Op::Activate),
            "[a-z]{0,6}".prop_map(Op::Edit),
        ]
    }

    #[derive(Debug, Clone)]
    enum FlightOp {
        Begin(usize),
        Complete(usize),
        Fail(usize),
        Close(usize),
    }

    fn flight_op_strategy() -> impl Strategy<Value = FlightOp> {
        prop_oneof![
            (0..NAMES.len()).prop_map(FlightOp::Begin),
            (0..8usize).prop_map(FlightOp::Complete),
            (0..8usize).prop_map(FlightOp::Fail),
            (0..NAMES.len()).prop_map(FlightOp::Close),
        ]
    }

    proptest! {
        #[test]
        fn open_keys_track_opened_minus_closed(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let mut session = Session::default();
            let mut expected = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Open(i) => {
                        if let OpenOutcome::Fetch(ticket) = session.begin_open("src", NAMES[i]).expect("open") {
                            session.finish_open(&ticket, format!("content of {}", NAMES[i]));
                        }
                        expected.insert(NAMES[i]);
                    }
                    Op::Close(i) => {
                        session.close(NAMES[i]);
                        expected.remove(NAMES[i]);
                    }
                    Op::Activate(i) => {
                        let result = session.activate(NAMES[i]);
                        prop_assert_eq!(result.is_ok(), expected.contains(NAMES[i]));
                    }
                    Op::Edit(text) => session.edit_surface(text),
                }

                let names: BTreeSet<&str> = session.files().iter().map(|f| f.name.as_str()).collect();
                prop_assert_eq!(names.len(), session.files().len());
                prop_assert_eq!(&names, &expected);
                match session.active_name() {
                    Some(active) => prop_assert!(expected.contains(active)),
                    None => {
                        prop_assert!(expected.is_empty());
                        prop_assert_eq!(session.surface(), "");
                    }
                }
            }
        }

        #[test]
        fn in_flight_opens_honor_latest_ticket(ops in proptest::collection::vec(flight_op_strategy(), 0..60)) {
            let mut session = Session::default();
            let mut held: Vec<OpenTicket> = Vec::new();
            let mut expected_open: Vec<&str> = Vec::new();
            let mut expected_pending: BTreeMap<String, u64> = BTreeMap::new();

            for op in ops {
                match op {
                    FlightOp::Begin(i) => {
                        let name = NAMES[i];
                        let outcome = session.begin_open("src", name).expect("begin");
                        if expected_open.contains(&name) {
                            prop_assert_eq!(outcome, OpenOutcome::AlreadyOpen);
                        } else if expected_pending.contains_key(name) {
                            prop_assert_eq!(outcome, OpenOutcome::AlreadyPending);
                        } else {
                            let ticket = ticket(outcome);
                            expected_pending.insert(name.to_string(), ticket.id);
                            held.push(ticket);
                        }
                    }
                    FlightOp::Complete(k) if !held.is_empty() => {
                        let ticket = held[k % held.len()].clone();
                        let current = expected_pending.get(&ticket.name) == Some(&ticket.id);
                        let tab = session.finish_open(&ticket, format!("v{}", ticket.id));
                        prop_assert_eq!(tab.is_some(), current);
                        if current {
                            expected_pending.remove(&ticket.name);
                            let name = NAMES.iter().copied().find(|n| *n == ticket.name).expect("known name");
                            expected_open.push(name);
                            prop_assert_eq!(session.active_name(), Some(name));
                            prop_assert_eq!(session.surface(), format!("v{}", ticket.id));
                        }
                    }
                    FlightOp::Fail(k) if !held.is_empty() => {
                        let ticket = held[k % held.len()].clone();
                        let current = expected_pending.get(&ticket.name) == Some(&ticket.id);
                        let before = session.files().to_vec();
                        prop_assert_eq!(session.abandon_open(&ticket), current);
                        if current {
                            expected_pending.remove(&ticket.name);
                        }
                        prop_assert_eq!(session.files(), before.as_slice());
                    }
                    FlightOp::Complete(_) | FlightOp::Fail(_) => {}
                    FlightOp::Close(i) => {
                        let name = NAMES[i];
                        prop_assert_eq!(session.close(name), expected_open.contains(&name));
                        expected_open.retain(|open| *open != name);
                        expected_pending.remove(name);
                    }
                }

                prop_assert_eq!(tab_names(&session), expected_open.clone());
                for name in NAMES {
                    prop_assert_eq!(session.is_pending(name), expected_pending.contains_key(name));
                    prop_assert!(!(session.contains(name) && session.is_pending(name)));
                }
                match session.active_name() {
                    Some(active) => prop_assert!(expected_open.contains(&active)),
                    None => prop_assert!(expected_open.is_empty()),
                }
            }
        }
    }
}

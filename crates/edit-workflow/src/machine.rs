//! The edit-record workflow as a value-level state machine.
//!
//! [`EditWorkflow::apply`] consumes the workflow and an event and returns the
//! next workflow plus at most one [`Command`] for the caller to run. Commands
//! that call out to the store carry a [`RequestHandle`]; the completion event
//! must echo it back, and completions for a handle that is no longer current
//! are dropped.

use crate::error::StoreError;
use crate::record::{CategoryFields, CategoryRecord};
use crate::state::{DEFAULT_SUBMIT_ERROR, EditDraft, EditState, NOT_FOUND_MESSAGE, ReadyState};

/// Ticket for one outstanding store call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestHandle(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Retrieve {
        handle: RequestHandle,
        slug: String,
    },
    Update {
        handle: RequestHandle,
        id: String,
        fields: CategoryFields,
    },
    Navigate,
}

#[derive(Clone, Debug)]
pub enum EditEvent {
    /// The page was opened (or re-opened) for a route key.
    Mount(String),
    Retrieved {
        handle: RequestHandle,
        outcome: Result<Option<CategoryRecord>, StoreError>,
    },
    TitleChanged(String),
    DescriptionChanged(String),
    Submit,
    Updated {
        handle: RequestHandle,
        outcome: Result<(), StoreError>,
    },
    /// The page went away; anything still in flight is abandoned.
    Unmount,
}

#[derive(Clone, Debug)]
pub struct EditWorkflow {
    route_key: Option<String>,
    state: EditState,
    next_handle: u64,
    in_flight: Option<RequestHandle>,
}

impl Default for EditWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl EditWorkflow {
    pub fn new() -> Self {
        Self {
            route_key: None,
            state: EditState::Loading,
            next_handle: 0,
            in_flight: None,
        }
    }

    pub fn route_key(&self) -> Option<&str> {
        self.route_key.as_deref()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn into_state(self) -> EditState {
        self.state
    }

    /// The handle of the store call the workflow is waiting on, if any.
    pub fn in_flight(&self) -> Option<RequestHandle> {
        self.in_flight
    }

    pub fn apply(self, event: EditEvent) -> (Self, Option<Command>) {
        match event {
            EditEvent::Mount(route_key) => self.mount(route_key),
            EditEvent::Retrieved { handle, outcome } => (self.retrieved(handle, outcome), None),
            EditEvent::TitleChanged(title) => {
                let state = self.state.on_title_change(title);
                (Self { state, ..self }, None)
            }
            EditEvent::DescriptionChanged(description) => {
                let state = self.state.on_description_change(description);
                (Self { state, ..self }, None)
            }
            EditEvent::Submit => self.submit(),
            EditEvent::Updated { handle, outcome } => self.updated(handle, outcome),
            EditEvent::Unmount => (
                Self {
                    route_key: None,
                    in_flight: None,
                    ..self
                },
                None,
            ),
        }
    }

    fn issue_handle(&mut self) -> RequestHandle {
        let handle = RequestHandle(self.next_handle);
        self.next_handle += 1;
        self.in_flight = Some(handle);
        handle
    }

    fn is_current(&self, handle: RequestHandle) -> bool {
        self.in_flight == Some(handle)
    }

    fn mount(mut self, route_key: String) -> (Self, Option<Command>) {
        if self.route_key.as_deref() == Some(route_key.as_str()) {
            return (self, None);
        }

        let handle = self.issue_handle();
        self.state = EditState::Loading;
        self.route_key = Some(route_key.clone());

        (
            self,
            Some(Command::Retrieve {
                handle,
                slug: route_key,
            }),
        )
    }

    fn retrieved(
        mut self,
        handle: RequestHandle,
        outcome: Result<Option<CategoryRecord>, StoreError>,
    ) -> Self {
        if !self.is_current(handle) || !self.state.is_loading() {
            tracing::debug!(?handle, "ignoring stale category retrieval");
            return self;
        }
        self.in_flight = None;

        self.state = match outcome {
            Ok(Some(record)) => {
                metrics::counter!("category_edit_loads_total", "outcome" => "ready").increment(1);
                let draft = EditDraft::from_record(&record);
                EditState::Ready(ReadyState::new(Some(record.id), draft))
            }
            Ok(None) | Err(StoreError::NotFound) => {
                metrics::counter!("category_edit_loads_total", "outcome" => "not_found")
                    .increment(1);
                EditState::Error(NOT_FOUND_MESSAGE.to_string())
            }
            Err(err) => {
                metrics::counter!("category_edit_loads_total", "outcome" => "error").increment(1);
                tracing::warn!("category retrieval failed: {}", err);
                EditState::Error(err.to_string())
            }
        };

        self
    }

    fn submit(mut self) -> (Self, Option<Command>) {
        // Dropped unless the form is idle and the id has loaded; a second
        // submit while one is in flight lands here too.
        let request = match &self.state {
            EditState::Ready(ready) if !ready.saving => ready
                .id()
                .map(|id| (id.to_string(), ready.draft.to_fields())),
            _ => None,
        };
        let Some((id, fields)) = request else {
            tracing::debug!("submit ignored");
            return (self, None);
        };

        let handle = self.issue_handle();
        if let EditState::Ready(ready) = &mut self.state {
            ready.saving = true;
            ready.submit_error = None;
        }

        (self, Some(Command::Update { handle, id, fields }))
    }

    fn updated(
        mut self,
        handle: RequestHandle,
        outcome: Result<(), StoreError>,
    ) -> (Self, Option<Command>) {
        if !self.is_current(handle) {
            tracing::debug!(?handle, "ignoring stale category update");
            return (self, None);
        }
        self.in_flight = None;

        let mut ready = match self.state {
            EditState::Ready(ready) => ready,
            other => {
                self.state = other;
                return (self, None);
            }
        };

        match outcome {
            Ok(()) => {
                metrics::counter!("category_edit_updates_total", "outcome" => "saved")
                    .increment(1);
                self.state = EditState::Saved;
                (self, Some(Command::Navigate))
            }
            Err(err) => {
                metrics::counter!("category_edit_updates_total", "outcome" => "failed")
                    .increment(1);
                let message = err.to_string();
                ready.saving = false;
                ready.submit_error = Some(if message.trim().is_empty() {
                    DEFAULT_SUBMIT_ERROR.to_string()
                } else {
                    message
                });
                self.state = EditState::Ready(ready);
                (self, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::derive_slug;

    fn plumbing() -> CategoryRecord {
        CategoryRecord {
            id: "42".to_string(),
            slug: "plumbing".to_string(),
            title: "Plumbing".to_string(),
            description: Some("Pipes".to_string()),
        }
    }

    fn retrieve_handle(command: Option<Command>) -> RequestHandle {
        match command {
            Some(Command::Retrieve { handle, .. }) => handle,
            other => panic!("expected retrieve command, got {other:?}"),
        }
    }

    fn loaded(record: CategoryRecord) -> EditWorkflow {
        let (workflow, command) = EditWorkflow::new().apply(EditEvent::Mount(record.slug.clone()));
        let handle = retrieve_handle(command);
        let (workflow, command) = workflow.apply(EditEvent::Retrieved {
            handle,
            outcome: Ok(Some(record)),
        });
        assert!(command.is_none());
        workflow
    }

    #[test]
    fn test_initial_state_is_loading() {
        let workflow = EditWorkflow::new();
        assert!(workflow.state().is_loading());
        assert_eq!(workflow.in_flight(), None);
    }

    #[test]
    fn test_mount_requests_retrieval_once_per_key() {
        let (workflow, command) = EditWorkflow::new().apply(EditEvent::Mount("plumbing".into()));
        assert!(matches!(
            command,
            Some(Command::Retrieve { ref slug, .. }) if slug == "plumbing"
        ));

        let (workflow, command) = workflow.apply(EditEvent::Mount("plumbing".into()));
        assert!(command.is_none());

        let (_, command) = workflow.apply(EditEvent::Mount("roofing".into()));
        assert!(matches!(
            command,
            Some(Command::Retrieve { ref slug, .. }) if slug == "roofing"
        ));
    }

    #[test]
    fn test_successful_load_seeds_draft() {
        let workflow = loaded(plumbing());
        let ready = workflow.state().ready().expect("ready");
        assert_eq!(ready.id(), Some("42"));
        assert_eq!(ready.draft().title(), "Plumbing");
        assert_eq!(ready.draft().slug(), "plumbing");
        assert_eq!(ready.draft().description(), "Pipes");
        assert!(!ready.is_saving());
        assert_eq!(ready.submit_error(), None);
    }

    #[test]
    fn test_not_found_load_is_error() {
        let (workflow, command) = EditWorkflow::new().apply(EditEvent::Mount("missing".into()));
        let handle = retrieve_handle(command);
        let (workflow, _) = workflow.apply(EditEvent::Retrieved {
            handle,
            outcome: Ok(None),
        });
        assert_eq!(workflow.state().load_error(), Some(NOT_FOUND_MESSAGE));
        assert!(workflow.state().ready().is_none());
    }

    #[test]
    fn test_failed_load_surfaces_message() {
        let (workflow, command) = EditWorkflow::new().apply(EditEvent::Mount("plumbing".into()));
        let handle = retrieve_handle(command);
        let (workflow, _) = workflow.apply(EditEvent::Retrieved {
            handle,
            outcome: Err(StoreError::unavailable("database is locked")),
        });
        assert_eq!(workflow.state().load_error(), Some("database is locked"));
    }

    #[test]
    fn test_stale_retrieval_after_key_change_is_ignored() {
        let (workflow, command) = EditWorkflow::new().apply(EditEvent::Mount("plumbing".into()));
        let stale = retrieve_handle(command);
        let (workflow, command) = workflow.apply(EditEvent::Mount("roofing".into()));
        let current = retrieve_handle(command);

        let (workflow, _) = workflow.apply(EditEvent::Retrieved {
            handle: stale,
            outcome: Ok(Some(plumbing())),
        });
        assert!(workflow.state().is_loading());

        let roofing = CategoryRecord {
            id: "7".into(),
            slug: "roofing".into(),
            title: "Roofing".into(),
            description: None,
        };
        let (workflow, _) = workflow.apply(EditEvent::Retrieved {
            handle: current,
            outcome: Ok(Some(roofing)),
        });
        assert_eq!(workflow.state().ready().unwrap().id(), Some("7"));
    }

    #[test]
    fn test_completion_after_unmount_is_ignored() {
        let (workflow, command) = EditWorkflow::new().apply(EditEvent::Mount("plumbing".into()));
        let handle = retrieve_handle(command);
        let (workflow, _) = workflow.apply(EditEvent::Unmount);
        let (workflow, command) = workflow.apply(EditEvent::Retrieved {
            handle,
            outcome: Ok(Some(plumbing())),
        });
        assert!(command.is_none());
        assert!(workflow.state().is_loading());
    }

    fn update_handle(command: Option<Command>) -> RequestHandle {
        match command {
            Some(Command::Update { handle, .. }) => handle,
            other => panic!("expected update command, got {other:?}"),
        }
    }

    #[test]
    fn test_update_completion_after_unmount_is_ignored() {
        let (workflow, command) = loaded(plumbing()).apply(EditEvent::Submit);
        let handle = update_handle(command);
        let (workflow, _) = workflow.apply(EditEvent::Unmount);
        let before = workflow.state().clone();

        for outcome in [Ok(()), Err(StoreError::rejected("slug already exists"))] {
            let (next, command) = workflow.clone().apply(EditEvent::Updated { handle, outcome });
            assert!(command.is_none());
            assert_eq!(next.state(), &before);
            assert_eq!(next.in_flight(), None);
        }
    }

    #[test]
    fn test_update_completion_after_key_change_is_ignored() {
        let (workflow, command) = loaded(plumbing()).apply(EditEvent::Submit);
        let stale = update_handle(command);
        let (workflow, command) = workflow.apply(EditEvent::Mount("roofing".into()));
        let current = retrieve_handle(command);

        let (workflow, command) = workflow.apply(EditEvent::Updated {
            handle: stale,
            outcome: Ok(()),
        });
        assert!(command.is_none());
        assert!(workflow.state().is_loading());
        assert_eq!(workflow.in_flight(), Some(current));
        assert_eq!(workflow.route_key(), Some("roofing"));
    }

    #[test]
    fn test_title_change_keeps_slug_in_sync() {
        let mut workflow = loaded(plumbing());
        for title in ["Plumbing & Heating", "  Drains ", "Café & Bar!", ""] {
            let (next, _) = workflow.apply(EditEvent::TitleChanged(title.to_string()));
            let draft = next.state().ready().unwrap().draft();
            assert_eq!(draft.slug(), derive_slug(draft.title()));
            workflow = next;
        }

        let (workflow, _) = workflow.apply(EditEvent::TitleChanged("Plumbing & Heating".into()));
        let draft = workflow.state().ready().unwrap().draft();
        assert_eq!(draft.title(), "Plumbing & Heating");
        assert_eq!(draft.slug(), "plumbing_heating");
        assert_eq!(draft.description(), "Pipes");
    }

    #[test]
    fn test_submit_issues_update_with_id_and_fields() {
        let workflow = loaded(plumbing());
        let (workflow, command) = workflow.apply(EditEvent::Submit);

        let Some(Command::Update { handle, id, fields }) = command else {
            panic!("expected update command");
        };
        assert_eq!(id, "42");
        assert_eq!(
            fields,
            CategoryFields {
                title: "Plumbing".into(),
                slug: "plumbing".into(),
                description: "Pipes".into(),
            }
        );
        assert_eq!(workflow.in_flight(), Some(handle));
        let ready = workflow.state().ready().unwrap();
        assert!(ready.is_saving());
        assert_eq!(ready.submit_label(), "Saving...");

        let (workflow, command) = workflow.apply(EditEvent::Updated {
            handle,
            outcome: Ok(()),
        });
        assert_eq!(command, Some(Command::Navigate));
        assert_eq!(workflow.state(), &EditState::Saved);
    }

    #[test]
    fn test_double_submit_while_saving_is_dropped() {
        let workflow = loaded(plumbing());
        let (workflow, first) = workflow.apply(EditEvent::Submit);
        assert!(matches!(first, Some(Command::Update { .. })));

        let before = workflow.state().clone();
        let (workflow, second) = workflow.apply(EditEvent::Submit);
        assert!(second.is_none());
        assert_eq!(workflow.state(), &before);
    }

    #[test]
    fn test_failed_update_keeps_draft_and_reports_message() {
        let workflow = loaded(plumbing());
        let (workflow, _) = workflow.apply(EditEvent::TitleChanged("Plumbing & Heating".into()));
        let (workflow, command) = workflow.apply(EditEvent::Submit);
        let Some(Command::Update { handle, .. }) = command else {
            panic!("expected update command");
        };

        let (workflow, command) = workflow.apply(EditEvent::Updated {
            handle,
            outcome: Err(StoreError::rejected("slug already exists")),
        });
        assert!(command.is_none());

        let ready = workflow.state().ready().unwrap();
        assert!(!ready.is_saving());
        assert_eq!(ready.submit_error(), Some("slug already exists"));
        assert_eq!(ready.draft().title(), "Plumbing & Heating");
        assert_eq!(ready.draft().slug(), "plumbing_heating");

        // The operator can resubmit, which clears the old error.
        let (workflow, command) = workflow.apply(EditEvent::Submit);
        assert!(matches!(command, Some(Command::Update { .. })));
        assert_eq!(workflow.state().ready().unwrap().submit_error(), None);
    }

    #[test]
    fn test_blank_failure_message_falls_back_to_default() {
        let workflow = loaded(plumbing());
        let (workflow, command) = workflow.apply(EditEvent::Submit);
        let Some(Command::Update { handle, .. }) = command else {
            panic!("expected update command");
        };
        let (workflow, _) = workflow.apply(EditEvent::Updated {
            handle,
            outcome: Err(StoreError::rejected("")),
        });
        assert_eq!(
            workflow.state().ready().unwrap().submit_error(),
            Some(DEFAULT_SUBMIT_ERROR)
        );
    }

    #[test]
    fn test_submit_without_id_is_a_no_op() {
        let record = CategoryRecord {
            id: String::new(),
            ..plumbing()
        };
        let workflow = loaded(record);
        let before = workflow.state().clone();

        let (workflow, command) = workflow.apply(EditEvent::Submit);
        assert!(command.is_none());
        assert_eq!(workflow.state(), &before);
        assert_eq!(workflow.in_flight(), None);
    }

    #[test]
    fn test_submit_while_loading_is_a_no_op() {
        let (workflow, _) = EditWorkflow::new().apply(EditEvent::Mount("plumbing".into()));
        let handle = workflow.in_flight();
        let (workflow, command) = workflow.apply(EditEvent::Submit);
        assert!(command.is_none());
        assert!(workflow.state().is_loading());
        assert_eq!(workflow.in_flight(), handle);
    }
}

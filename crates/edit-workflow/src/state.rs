use crate::record::{CategoryFields, CategoryRecord};
use crate::slug::derive_slug;

pub const NOT_FOUND_MESSAGE: &str = "Category not found.";
pub const DEFAULT_SUBMIT_ERROR: &str = "Failed to update category.";

/// In-memory copy of a category's editable fields.
///
/// The slug has no setter; it is recomputed from the title on every change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditDraft {
    title: String,
    slug: String,
    description: String,
}

impl EditDraft {
    /// Seed a draft from a stored record, keeping the stored slug as-is.
    pub fn from_record(record: &CategoryRecord) -> Self {
        Self {
            title: record.title.clone(),
            slug: record.slug.clone(),
            description: record.description.clone().unwrap_or_default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = derive_slug(&title);
        Self {
            title,
            slug,
            ..self
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    pub fn to_fields(&self) -> CategoryFields {
        CategoryFields {
            title: self.title.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
        }
    }
}

/// The form while it is editable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadyState {
    pub(crate) id: Option<String>,
    pub(crate) draft: EditDraft,
    pub(crate) saving: bool,
    pub(crate) submit_error: Option<String>,
}

impl ReadyState {
    pub fn new(id: Option<String>, draft: EditDraft) -> Self {
        Self {
            id,
            draft,
            saving: false,
            submit_error: None,
        }
    }

    /// The stable id used as the update key, if it is known yet.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn draft(&self) -> &EditDraft {
        &self.draft
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Attach an error found outside the workflow, such as a stale form.
    pub fn with_submit_error(mut self, message: impl Into<String>) -> Self {
        self.submit_error = Some(message.into());
        self
    }

    pub fn submit_label(&self) -> &'static str {
        if self.saving {
            "Saving..."
        } else {
            "Save Changes"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditState {
    Loading,
    /// The record could not be loaded; the form is not shown.
    Error(String),
    Ready(ReadyState),
    /// The update succeeded and the workflow has handed off to navigation.
    Saved,
}

impl EditState {
    pub fn ready(&self) -> Option<&ReadyState> {
        match self {
            EditState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, EditState::Loading)
    }

    pub fn load_error(&self) -> Option<&str> {
        match self {
            EditState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Update the title and its derived slug in one step.
    pub fn on_title_change(self, title: impl Into<String>) -> Self {
        match self {
            EditState::Ready(ready) => EditState::Ready(ReadyState {
                draft: ready.draft.with_title(title),
                ..ready
            }),
            other => other,
        }
    }

    pub fn on_description_change(self, description: impl Into<String>) -> Self {
        match self {
            EditState::Ready(ready) => EditState::Ready(ReadyState {
                draft: ready.draft.with_description(description),
                ..ready
            }),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plumbing() -> CategoryRecord {
        CategoryRecord {
            id: "42".to_string(),
            slug: "plumbing".to_string(),
            title: "Plumbing".to_string(),
            description: Some("Pipes".to_string()),
        }
    }

    #[test]
    fn test_draft_from_record_defaults_missing_description() {
        let record = CategoryRecord {
            description: None,
            ..plumbing()
        };
        let draft = EditDraft::from_record(&record);
        assert_eq!(draft.description(), "");
        assert_eq!(draft.slug(), "plumbing");
    }

    #[test]
    fn test_title_change_updates_slug_together() {
        let state = EditState::Ready(ReadyState::new(
            Some("42".into()),
            EditDraft::from_record(&plumbing()),
        ));

        let state = state.on_title_change("Plumbing & Heating");
        let ready = state.ready().unwrap();
        assert_eq!(ready.draft().title(), "Plumbing & Heating");
        assert_eq!(ready.draft().slug(), "plumbing_heating");
        assert_eq!(ready.draft().description(), "Pipes");
    }

    #[test]
    fn test_description_change_leaves_slug_alone() {
        let state = EditState::Ready(ReadyState::new(
            Some("42".into()),
            EditDraft::from_record(&plumbing()),
        ));

        let state = state.on_description_change("Pipes and drains");
        let draft = state.ready().unwrap().draft();
        assert_eq!(draft.description(), "Pipes and drains");
        assert_eq!(draft.slug(), "plumbing");
        assert_eq!(draft.title(), "Plumbing");
    }

    #[test]
    fn test_edits_outside_ready_are_ignored() {
        assert_eq!(EditState::Loading.on_title_change("x"), EditState::Loading);
        assert_eq!(
            EditState::Error("nope".into()).on_description_change("x"),
            EditState::Error("nope".into())
        );
    }

    #[test]
    fn test_empty_id_counts_as_missing() {
        let ready = ReadyState::new(Some(String::new()), EditDraft::default());
        assert_eq!(ready.id(), None);
    }

    #[test]
    fn test_submit_label() {
        let mut ready = ReadyState::new(None, EditDraft::default());
        assert_eq!(ready.submit_label(), "Save Changes");
        ready.saving = true;
        assert_eq!(ready.submit_label(), "Saving...");
    }
}

//! Edit workflow for service categories
//!
//! Slug derivation plus the load/edit/submit state machine behind the
//! category edit page, independent of storage and rendering.

pub mod error;
pub mod machine;
pub mod record;
pub mod session;
pub mod slug;
pub mod state;
pub mod store;

pub use error::StoreError;
pub use machine::{Command, EditEvent, EditWorkflow, RequestHandle};
pub use record::{CategoryFields, CategoryRecord};
pub use session::EditSession;
pub use slug::derive_slug;
pub use state::{DEFAULT_SUBMIT_ERROR, EditDraft, EditState, NOT_FOUND_MESSAGE, ReadyState};
pub use store::{CategoryStore, Navigator};

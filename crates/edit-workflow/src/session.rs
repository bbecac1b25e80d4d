use crate::machine::{Command, EditEvent, EditWorkflow};
use crate::state::EditState;
use crate::store::{CategoryStore, Navigator};

/// Runs an [`EditWorkflow`] against a store and a navigator.
///
/// Each public method feeds one operator event through the machine and then
/// executes the resulting commands until the machine settles.
pub struct EditSession<S, N> {
    store: S,
    navigator: N,
    workflow: EditWorkflow,
}

impl<S, N> EditSession<S, N>
where
    S: CategoryStore,
    N: Navigator,
{
    pub fn new(store: S, navigator: N) -> Self {
        Self {
            store,
            navigator,
            workflow: EditWorkflow::new(),
        }
    }

    pub fn state(&self) -> &EditState {
        self.workflow.state()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn into_state(self) -> EditState {
        self.workflow.into_state()
    }

    pub async fn mount(&mut self, route_key: &str) -> anyhow::Result<()> {
        self.dispatch(EditEvent::Mount(route_key.to_string())).await
    }

    pub fn change_title(&mut self, title: impl Into<String>) {
        self.apply_local(EditEvent::TitleChanged(title.into()));
    }

    pub fn change_description(&mut self, description: impl Into<String>) {
        self.apply_local(EditEvent::DescriptionChanged(description.into()));
    }

    pub async fn submit(&mut self) -> anyhow::Result<()> {
        self.dispatch(EditEvent::Submit).await
    }

    pub fn unmount(&mut self) {
        self.apply_local(EditEvent::Unmount);
    }

    fn apply_local(&mut self, event: EditEvent) {
        let (workflow, command) = std::mem::take(&mut self.workflow).apply(event);
        debug_assert!(command.is_none(), "local edits never produce commands");
        self.workflow = workflow;
    }

    async fn dispatch(&mut self, event: EditEvent) -> anyhow::Result<()> {
        let mut next = Some(event);
        while let Some(event) = next.take() {
            let (workflow, command) = std::mem::take(&mut self.workflow).apply(event);
            self.workflow = workflow;
            if let Some(command) = command {
                next = self.run(command).await?;
            }
        }
        Ok(())
    }

    async fn run(&self, command: Command) -> anyhow::Result<Option<EditEvent>> {
        match command {
            Command::Retrieve { handle, slug } => {
                tracing::debug!(%slug, "retrieving category");
                let outcome = self.store.retrieve_category(&slug).await;
                Ok(Some(EditEvent::Retrieved { handle, outcome }))
            }
            Command::Update { handle, id, fields } => {
                tracing::info!(%id, slug = %fields.slug, "updating category");
                let outcome = self.store.update_category(&id, &fields).await;
                Ok(Some(EditEvent::Updated { handle, outcome }))
            }
            Command::Navigate => {
                self.navigator.navigate_to_listing().await?;
                Ok(None)
            }
        }
    }
}

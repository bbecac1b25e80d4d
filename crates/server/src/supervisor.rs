use std::future::Future;

use anyhow::{Error, Result};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

/// Owns the long-running tasks of the admin server and shuts them all down
/// when one fails or the process receives Ctrl-C.
pub struct Supervisor {
    shutdown: CancellationToken,
    tasks: JoinSet<(&'static str, Result<()>)>,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            shutdown: CancellationToken::new(),
            tasks: JoinSet::new(),
        }
    }

    /// A token cancelled when the supervisor begins shutting down.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn spawn<F, Fut>(&mut self, name: &'static str, factory: F)
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let shutdown = self.shutdown.child_token();
        self.tasks.spawn(async move {
            let result = factory(shutdown).await;
            (name, result)
        });
    }

    pub async fn run(mut self) -> Result<()> {
        let mut first_err: Option<Error> = None;

        while !self.tasks.is_empty() {
            tokio::select! {
                Some(outcome) = self.tasks.join_next() => {
                    self.handle_task_outcome(&mut first_err, outcome);
                }
                _ = tokio::signal::ctrl_c(), if !self.shutdown.is_cancelled() => {
                    tracing::info!("received Ctrl-C, shutting down");
                    self.shutdown.cancel();
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn handle_task_outcome(
        &self,
        first_err: &mut Option<Error>,
        outcome: std::result::Result<(&'static str, Result<()>), JoinError>,
    ) {
        let err = match outcome {
            Ok((name, Ok(()))) => {
                tracing::info!("task `{name}` exited gracefully");
                return;
            }
            Ok((name, Err(err))) => {
                tracing::error!("task `{name}` exited with error: {err:#}");
                err
            }
            Err(join_err) => {
                tracing::error!("task panicked: {join_err:?}");
                join_err.into()
            }
        };

        if first_err.is_none() {
            *first_err = Some(err);
        }
        if !self.shutdown.is_cancelled() {
            tracing::warn!("supervisor shutting down");
            self.shutdown.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_returns_ok_when_tasks_finish() {
        let mut supervisor = Supervisor::new();
        supervisor.spawn("noop", |_| async { Ok(()) });
        assert!(supervisor.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_task_cancels_siblings() {
        let mut supervisor = Supervisor::new();
        supervisor.spawn("waits", |shutdown| async move {
            shutdown.cancelled().await;
            Ok(())
        });
        supervisor.spawn("fails", |_| async { Err(anyhow::anyhow!("boom")) });

        let err = supervisor.run().await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}

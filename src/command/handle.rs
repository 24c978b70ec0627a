//! Async handle to a [`CommandEngine`] running on its own task.
//!
//! Requests go through one mpsc queue, so concurrent callers are applied one
//! at a time in arrival order and the undo history stays linear.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::command::engine::{CommandEngine, NothingToUndo};
use crate::command::{ApplyResult, Command};
use crate::constants::async_tasks;
use crate::error::{Error, Result};
use crate::model::Presentation;

enum Request {
    Apply(Command, oneshot::Sender<ApplyResult>),
    Undo(oneshot::Sender<std::result::Result<Presentation, NothingToUndo>>),
    Redo(oneshot::Sender<std::result::Result<Presentation, NothingToUndo>>),
    Snapshot(oneshot::Sender<(Presentation, usize)>),
    Replace(Presentation, oneshot::Sender<()>),
}

/// Cloneable sender side of the engine task.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Request>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Apply(command, _) => command.name(),
            Self::Undo(_) => "undo",
            Self::Redo(_) => "redo",
            Self::Snapshot(_) => "snapshot",
            Self::Replace(..) => "replace",
        };
        f.write_str(name)
    }
}

impl EngineHandle {
    /// Move `engine` onto a new tokio task and return a handle to it.
    ///
    /// The task ends when the last handle is dropped.
    pub fn spawn(engine: CommandEngine) -> Self {
        let (tx, rx) = mpsc::channel(async_tasks::CHANNEL_BUFFER_SIZE);
        tokio::spawn(run(engine, rx));
        Self { tx }
    }

    /// Queue a command and wait for its result.
    pub async fn apply(&self, command: Command) -> Result<ApplyResult> {
        self.request(|reply| Request::Apply(command, reply)).await
    }

    /// Undo the most recent successful apply.
    pub async fn undo(&self) -> Result<std::result::Result<Presentation, NothingToUndo>> {
        self.request(Request::Undo).await
    }

    /// Redo the most recently undone apply.
    pub async fn redo(&self) -> Result<std::result::Result<Presentation, NothingToUndo>> {
        self.request(Request::Redo).await
    }

    /// Current presentation and slide index.
    pub async fn snapshot(&self) -> Result<(Presentation, usize)> {
        self.request(Request::Snapshot).await
    }

    /// Start over with a new presentation, clearing history.
    pub async fn replace(&self, presentation: Presentation) -> Result<()> {
        self.request(|reply| Request::Replace(presentation, reply)).await
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Request) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx.send(build(reply)).await.map_err(|_| Error::EngineClosed)?;
        response.await.map_err(|_| Error::EngineClosed)
    }
}

async fn run(mut engine: CommandEngine, mut rx: mpsc::Receiver<Request>) {
    while let Some(request) = rx.recv().await {
        debug!(?request, "Engine request");
        // A caller that stopped waiting is not an error for the engine.
        match request {
            Request::Apply(command, reply) => {
                let _ = reply.send(engine.apply(&command));
            }
            Request::Undo(reply) => {
                let _ = reply.send(engine.undo().cloned());
            }
            Request::Redo(reply) => {
                let _ = reply.send(engine.redo().cloned());
            }
            Request::Snapshot(reply) => {
                let _ = reply.send((engine.presentation().clone(), engine.current_slide()));
            }
            Request::Replace(presentation, reply) => {
                engine.replace(presentation);
                let _ = reply.send(());
            }
        }
    }
    debug!("Engine task finished");
}

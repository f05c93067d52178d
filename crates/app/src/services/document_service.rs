//! Document service: a single task that owns the persisted document.
//!
//! Every reader and writer talks to the task through a [`DocumentHandle`]:
//! readers get a snapshot, writers send a mutation that runs inside the task
//! and is saved before the caller gets its answer. Nothing else holds a
//! mutable reference to the document.

use std::future::Future;

use playhook_domain::document::Document;
use playhook_domain::error::PlayhookError;
use playhook_domain::log::LogEntry;
use playhook_domain::notification::Notification;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::executors::describe;
use crate::ports::{ActionRecorder, DocumentStore, Notifier};

/// Pending requests beyond this many make callers wait.
const COMMAND_QUEUE_CAPACITY: usize = 64;

/// The document task has stopped.
#[derive(Debug, thiserror::Error)]
#[error("document service is not running")]
pub struct ServiceStopped;

impl From<ServiceStopped> for PlayhookError {
    fn from(err: ServiceStopped) -> Self {
        Self::Storage(Box::new(err))
    }
}

type Completion = Box<dyn FnOnce(Result<(), PlayhookError>) + Send>;
type Mutation = Box<dyn FnOnce(&mut Document) -> Option<Completion> + Send>;

enum Command {
    Snapshot(oneshot::Sender<Document>),
    Mutate(Mutation),
    AppendLog(LogEntry, oneshot::Sender<Result<(), PlayhookError>>),
    Flush(oneshot::Sender<Result<(), PlayhookError>>),
    Shutdown(oneshot::Sender<Result<(), PlayhookError>>),
}

/// Load the stored document, degrading to the default one.
///
/// A missing document is normal on first start. An unreadable one is
/// reported once through `notifier` and replaced by the default.
pub async fn load_or_default<S, N>(store: &S, notifier: &N) -> Document
where
    S: DocumentStore,
    N: Notifier,
{
    match store.load().await {
        Ok(Some(document)) => document,
        Ok(None) => {
            tracing::info!("no stored document, starting empty");
            Document::default()
        }
        Err(err) => {
            let reason = describe(&err);
            tracing::error!(error = %reason, "stored document unreadable, starting empty");
            notifier.notify(Notification::error(format!(
                "Saved profiles could not be read and were reset: {reason}"
            )));
            Document::default()
        }
    }
}

/// Cloneable access to the document task.
#[derive(Clone)]
pub struct DocumentHandle {
    sender: mpsc::Sender<Command>,
}

impl DocumentHandle {
    /// Start the task owning `document`, persisting through `store`.
    pub fn spawn<S>(store: S, document: Document) -> (Self, JoinHandle<()>)
    where
        S: DocumentStore + 'static,
    {
        let (sender, receiver) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let actor = DocumentActor { store, document };
        let task = tokio::spawn(actor.run(receiver));
        (Self { sender }, task)
    }

    /// A copy of the current document.
    ///
    /// # Errors
    ///
    /// Returns [`PlayhookError::Storage`] if the task has stopped.
    pub async fn snapshot(&self) -> Result<Document, PlayhookError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        response.await.map_err(|_| ServiceStopped.into())
    }

    /// Apply `change` to the document and save it.
    ///
    /// The change runs on a working copy. It is committed only if it returns
    /// `Ok` and the save succeeds; otherwise the document is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `change`, a storage error from the save,
    /// or [`PlayhookError::Storage`] if the task has stopped.
    pub async fn mutate<T, F>(&self, change: F) -> Result<T, PlayhookError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Document) -> Result<T, PlayhookError> + Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let mutation: Mutation = Box::new(move |document: &mut Document| match change(document) {
            Ok(value) => Some(Box::new(move |saved: Result<(), PlayhookError>| {
                let _ = reply.send(saved.map(|()| value));
            }) as Completion),
            Err(err) => {
                let _ = reply.send(Err(err));
                None
            }
        });
        self.send(Command::Mutate(mutation)).await?;
        response.await.map_err(|_| ServiceStopped)?
    }

    /// Append to the action log, honouring the configured cap, and save.
    ///
    /// The entry is kept in memory even if the save fails.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the save, or [`PlayhookError::Storage`]
    /// if the task has stopped.
    pub async fn append_log(&self, entry: LogEntry) -> Result<(), PlayhookError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::AppendLog(entry, reply)).await?;
        response.await.map_err(|_| ServiceStopped)?
    }

    /// Save the current document.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the save, or [`PlayhookError::Storage`]
    /// if the task has stopped.
    pub async fn flush(&self) -> Result<(), PlayhookError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Flush(reply)).await?;
        response.await.map_err(|_| ServiceStopped)?
    }

    /// Save the document and stop the task. Later calls fail.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the final save, or
    /// [`PlayhookError::Storage`] if the task had already stopped.
    pub async fn shutdown(&self) -> Result<(), PlayhookError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Shutdown(reply)).await?;
        response.await.map_err(|_| ServiceStopped)?
    }

    async fn send(&self, command: Command) -> Result<(), PlayhookError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| ServiceStopped.into())
    }
}

impl ActionRecorder for DocumentHandle {
    fn record(&self, entry: LogEntry) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        self.append_log(entry)
    }
}

struct DocumentActor<S> {
    store: S,
    document: Document,
}

impl<S: DocumentStore> DocumentActor<S> {
    async fn run(mut self, mut receiver: mpsc::Receiver<Command>) {
        while let Some(command) = receiver.recv().await {
            match command {
                Command::Snapshot(reply) => {
                    let _ = reply.send(self.document.clone());
                }
                Command::Mutate(mutation) => self.mutate(mutation).await,
                Command::AppendLog(entry, reply) => {
                    self.document.append_log(entry);
                    let _ = reply.send(self.save().await);
                }
                Command::Flush(reply) => {
                    let _ = reply.send(self.save().await);
                }
                Command::Shutdown(reply) => {
                    let _ = reply.send(self.save().await);
                    tracing::info!("document service stopped");
                    return;
                }
            }
        }
        // Every handle was dropped without an explicit shutdown.
        let _ = self.save().await;
        tracing::info!("document service stopped");
    }

    async fn mutate(&mut self, mutation: Mutation) {
        let mut working = self.document.clone();
        let Some(complete) = mutation(&mut working) else {
            return;
        };
        working
            .action_log
            .truncate(working.settings.max_log_entries);
        let saved = self.store.save(&working).await;
        match &saved {
            Ok(()) => self.document = working,
            Err(err) => tracing::error!(error = %describe(err), "could not save document, change discarded"),
        }
        complete(saved);
    }

    async fn save(&self) -> Result<(), PlayhookError> {
        let result = self.store.save(&self.document).await;
        if let Err(err) = &result {
            tracing::error!(error = %describe(err), "could not save document");
        }
        result
    }
}

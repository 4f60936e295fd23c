//! Background worker
//!
//! egui draws from a synchronous loop, so every remote call runs on a tokio
//! runtime owned here and reports back as a `UiEvent` over a std channel that
//! the frame loop drains with `try_recv`.

use std::future::Future;
use std::sync::mpsc::{self, Receiver, Sender};

use tokio::runtime::Runtime;

use crate::egui_app::screens::FetchTicket;
use crate::shared::{Product, ProductId, Session, StoreError};

/// Result of a background task, applied on the UI thread
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    InitialSession(Option<Session>),
    SignedIn(Result<(), StoreError>),
    SignedUp(Result<(), StoreError>),
    SignedOut(Result<(), StoreError>),
    ProductsLoaded {
        ticket: FetchTicket,
        result: Result<Vec<Product>, StoreError>,
    },
    ProductDeleted {
        id: ProductId,
        result: Result<(), StoreError>,
    },
    ProductSaved(Result<Product, StoreError>),
}

pub struct Worker {
    runtime: Runtime,
    sender: Sender<UiEvent>,
    receiver: Receiver<UiEvent>,
}

impl Worker {
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("storefront-worker")
            .enable_all()
            .build()?;
        let (sender, receiver) = mpsc::channel();
        Ok(Self {
            runtime,
            sender,
            receiver,
        })
    }

    /// Run `task` in the background; its output arrives through `drain`
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = UiEvent> + Send + 'static,
    {
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let event = task.await;
            if sender.send(event).is_err() {
                tracing::debug!("[WORKER] UI gone, dropping event");
            }
        });
    }

    /// Everything delivered since the last frame
    pub fn drain(&self) -> Vec<UiEvent> {
        self.receiver.try_iter().collect()
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_spawned_event_is_drained() {
        let worker = Worker::new().unwrap();
        worker.spawn(async { UiEvent::SignedOut(Ok(())) });

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while events.is_empty() && Instant::now() < deadline {
            events = worker.drain();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(events, vec![UiEvent::SignedOut(Ok(()))]);
        assert!(worker.drain().is_empty());
    }
}

//! Pollable asynchronous operation holder.
//!
//! `AsyncOperation` is the read side: status flags plus result/error access,
//! suitable for polling once per frame from an engine loop. The single
//! `OperationCompleter` is the write side. Clones of the read side observe
//! the same state.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

/// Lifecycle of an operation. `Pending` is the only non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Pending,
    Succeeded,
    Faulted,
    Canceled,
}

/// Misuse of an operation's result accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidResultAccess {
    #[error("operation result accessed before completion")]
    NotCompleted,

    #[error("operation faulted and has no result")]
    Faulted,

    #[error("operation was canceled and has no result")]
    Canceled,
}

enum State<T, E> {
    Pending,
    Succeeded(T),
    Faulted(Arc<E>),
    Canceled,
}

impl<T, E> State<T, E> {
    fn status(&self) -> OperationStatus {
        match self {
            State::Pending => OperationStatus::Pending,
            State::Succeeded(_) => OperationStatus::Succeeded,
            State::Faulted(_) => OperationStatus::Faulted,
            State::Canceled => OperationStatus::Canceled,
        }
    }
}

/// Read side of an asynchronous operation.
pub struct AsyncOperation<T, E> {
    rx: watch::Receiver<State<T, E>>,
}

impl<T, E> AsyncOperation<T, E> {
    /// Create a pending operation and the handle that completes it.
    pub fn pending() -> (Self, OperationCompleter<T, E>) {
        let (tx, rx) = watch::channel(State::Pending);
        (Self { rx }, OperationCompleter { tx })
    }

    /// Create an operation that is already completed with `result`.
    pub fn from_result(result: Result<T, E>) -> Self {
        let (operation, completer) = Self::pending();
        match result {
            Ok(value) => completer.try_set_result(value),
            Err(err) => completer.try_set_error(err),
        };
        operation
    }

    pub fn status(&self) -> OperationStatus {
        self.rx.borrow().status()
    }

    /// True once the operation finished, successfully or not.
    pub fn is_completed(&self) -> bool {
        self.status() != OperationStatus::Pending
    }

    pub fn is_completed_successfully(&self) -> bool {
        self.status() == OperationStatus::Succeeded
    }

    pub fn is_faulted(&self) -> bool {
        self.status() == OperationStatus::Faulted
    }

    pub fn is_canceled(&self) -> bool {
        self.status() == OperationStatus::Canceled
    }

    /// The error that ended the operation, `None` unless faulted.
    pub fn error(&self) -> Option<Arc<E>> {
        match &*self.rx.borrow() {
            State::Faulted(err) => Some(Arc::clone(err)),
            _ => None,
        }
    }

    /// Suspend until the operation leaves `Pending` and return the final status.
    pub async fn wait(&self) -> OperationStatus {
        let mut rx = self.rx.clone();
        // Err means the completer is gone; its drop already left a terminal
        // state behind.
        let _ = rx.wait_for(|state| !matches!(state, State::Pending)).await;
        self.status()
    }
}

impl<T: Clone, E> AsyncOperation<T, E> {
    /// The stored result. Every call after completion returns the same value.
    pub fn result(&self) -> Result<T, InvalidResultAccess> {
        match &*self.rx.borrow() {
            State::Pending => Err(InvalidResultAccess::NotCompleted),
            State::Succeeded(value) => Ok(value.clone()),
            State::Faulted(_) => Err(InvalidResultAccess::Faulted),
            State::Canceled => Err(InvalidResultAccess::Canceled),
        }
    }
}

impl<T, E> Clone for AsyncOperation<T, E> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T, E> fmt::Debug for AsyncOperation<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncOperation")
            .field("status", &self.status())
            .finish()
    }
}

/// Write side of an asynchronous operation. The first completion wins.
///
/// Dropping a completer that never completed cancels the operation, so
/// pollers never wait on an abandoned operation.
pub struct OperationCompleter<T, E> {
    tx: watch::Sender<State<T, E>>,
}

impl<T, E> OperationCompleter<T, E> {
    pub fn try_set_result(&self, value: T) -> bool {
        self.complete(State::Succeeded(value))
    }

    pub fn try_set_error(&self, err: E) -> bool {
        self.complete(State::Faulted(Arc::new(err)))
    }

    pub fn try_set_canceled(&self) -> bool {
        self.complete(State::Canceled)
    }

    fn complete(&self, next: State<T, E>) -> bool {
        let mut next = Some(next);
        self.tx.send_if_modified(|state| {
            if !matches!(state, State::Pending) {
                return false;
            }
            match next.take() {
                Some(value) => {
                    *state = value;
                    true
                }
                None => false,
            }
        })
    }
}

impl<T, E> Drop for OperationCompleter<T, E> {
    fn drop(&mut self) {
        if self.try_set_canceled() {
            #[cfg(feature = "tracing")]
            tracing::debug!("operation completer dropped while pending; marked canceled");
        }
    }
}

impl<T, E> fmt::Debug for OperationCompleter<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationCompleter")
            .field("status", &self.tx.borrow().status())
            .finish()
    }
}

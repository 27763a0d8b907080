//! Background solving on a dedicated thread.
//!
//! The worker owns the solver and its link structure. Progress and the
//! final outcome reach the controlling thread only as messages on a
//! channel; the controlling thread stops the search through the shared
//! [`CancelToken`].

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::error::Error;
use crate::solver::{CancelToken, Progress, SolveOptions, SolveOutcome, Solver};

/// A message from the worker thread.
#[derive(Debug, Clone)]
pub enum SolveEvent {
    Progress(Progress),
    /// Sent once, after which the worker exits.
    Finished(SolveOutcome),
}

/// Handle to a solve running in the background.
///
/// Dropping the handle cancels the search.
#[derive(Debug)]
pub struct SolveHandle {
    cancel: CancelToken,
    receiver: mpsc::Receiver<SolveEvent>,
    thread: Option<JoinHandle<()>>,
}

/// Starts `solver` on a new thread.
pub fn spawn(solver: Solver, options: SolveOptions) -> SolveHandle {
    let cancel = CancelToken::new();
    let (sender, receiver) = mpsc::channel();

    let worker_cancel = cancel.clone();
    let thread = thread::spawn(move || {
        let progress_sender = sender.clone();
        let outcome = solver.solve_with_progress(&options, &worker_cancel, |progress| {
            // the receiver may already be gone; the search stops via the token
            let _ = progress_sender.send(SolveEvent::Progress(progress));
        });
        debug!("worker finished with {:?}", outcome.status);
        let _ = sender.send(SolveEvent::Finished(outcome));
    });

    SolveHandle {
        cancel,
        receiver,
        thread: Some(thread),
    }
}

impl SolveHandle {
    /// Asks the worker to stop; already accepted solutions are still reported.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns the next event if one is waiting.
    pub fn try_recv(&self) -> Result<Option<SolveEvent>, Error> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(Error::WorkerDisconnected),
        }
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<SolveEvent>, Error> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(Error::WorkerDisconnected),
        }
    }

    /// Blocks until the worker finishes, discarding progress events.
    pub fn wait(mut self) -> Result<SolveOutcome, Error> {
        loop {
            match self.receiver.recv() {
                Ok(SolveEvent::Progress(_)) => {}
                Ok(SolveEvent::Finished(outcome)) => {
                    self.join();
                    return Ok(outcome);
                }
                Err(mpsc::RecvError) => return Err(Error::WorkerDisconnected),
            }
        }
    }

    /// Waits for the worker thread to exit.
    pub fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for SolveHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

//! process wide cancellation and the signals that trigger it

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::error::Error;

/// Fires at most once and stays fired.
///
/// Can be polled with [`Cancellation::is_cancelled`] or waited on in a
/// `select!` through [`Cancellation::closed`], which disconnects when the
/// token is cancelled.
#[derive(Debug, Clone)]
pub struct Cancellation {
    cancelled: Arc<AtomicBool>,
    trigger: Arc<Mutex<Option<Sender<()>>>>,
    closed: Receiver<()>,
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

impl Cancellation {
    #[must_use]
    pub fn new() -> Self {
        let (trigger, closed) = bounded(0);
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            trigger: Arc::new(Mutex::new(Some(trigger))),
            closed,
        }
    }

    /// returns true only for the call that actually cancelled
    pub fn cancel(&self) -> bool {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return false;
        }
        // dropping the only sender wakes every `closed` receiver
        // a poisoned lock still holds the sender, so take it anyway
        let mut trigger = match self.trigger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        trigger.take();
        true
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// never receives a message, only disconnects once cancelled
    #[must_use]
    pub const fn closed(&self) -> &Receiver<()> {
        &self.closed
    }
}

/// Routes SIGINT and SIGTERM into a channel the coordinator can select on.
///
/// # Errors
/// if a handler is already installed for this process
pub fn listen_for_termination() -> Result<Receiver<()>, Error> {
    let (tx, rx) = bounded(1);
    ctrlc::set_handler(move || match tx.try_send(()) {
        Ok(()) => log::info!("termination requested"),
        Err(TrySendError::Full(())) => log::debug!("termination already requested"),
        Err(TrySendError::Disconnected(())) => {}
    })?;
    Ok(rx)
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use crossbeam_channel::{select, RecvError};

    use super::*;

    #[test]
    fn starts_uncancelled() {
        let cancel = Cancellation::new();
        assert!(!cancel.is_cancelled());
        assert!(cancel.closed().try_recv().is_err());
    }

    #[test]
    fn cancel_is_one_shot() {
        let cancel = Cancellation::new();
        assert!(cancel.cancel());
        assert!(!cancel.cancel());
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn clones_observe_cancellation() {
        let cancel = Cancellation::new();
        let other = cancel.clone();
        other.cancel();
        assert!(cancel.is_cancelled());
        assert_eq!(cancel.closed().recv(), Err(RecvError));
    }

    #[test]
    fn wakes_a_blocked_select() {
        let cancel = Cancellation::new();
        let waiter = {
            let cancel = cancel.clone();
            thread::spawn(move || {
                let (_keep, never) = bounded::<()>(0);
                select! {
                    recv(never) -> _ => false,
                    recv(cancel.closed()) -> _ => true,
                }
            })
        };
        thread::sleep(Duration::from_millis(20));
        cancel.cancel();
        assert!(waiter.join().unwrap());
    }
}

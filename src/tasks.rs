use std::thread::{self, JoinHandle};

use crate::error::Error;

/// keeps track of every thread a session starts so shutdown can wait on them
#[derive(Debug, Default)]
pub struct TaskGroup {
    handles: Vec<JoinHandle<()>>,
}

impl TaskGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// if the os refuses to start the thread
    pub fn spawn<F>(&mut self, name: &'static str, f: F) -> Result<(), Error>
    where
        F: FnOnce() + Send + 'static,
    {
        // finished sessions shouldn't pile up over a long run
        self.reap()?;
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(f)
            .map_err(|e| Error::Spawn(name, e))?;
        self.handles.push(handle);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    fn reap(&mut self) -> Result<(), Error> {
        let (done, running): (Vec<_>, Vec<_>) =
            self.handles.drain(..).partition(JoinHandle::is_finished);
        self.handles = running;
        join(done)
    }

    /// Waits for every tracked thread.
    ///
    /// # Errors
    /// if any of them panicked, after all of them have been joined
    pub fn join_all(&mut self) -> Result<(), Error> {
        log::debug!("waiting for {} task(s)", self.handles.len());
        join(std::mem::take(&mut self.handles))
    }
}

fn join(handles: Vec<JoinHandle<()>>) -> Result<(), Error> {
    let mut result = Ok(());
    for handle in handles {
        let name = handle.thread().name().unwrap_or("unnamed").to_string();
        if handle.join().is_err() {
            log::error!("{name} thread panicked");
            result = Err(Error::Panicked(name));
        }
    }
    result
}

use std::{
    io::{self, BufRead},
    thread,
};

use crossbeam_channel::{select, unbounded, Receiver, Sender};

use crate::{error::Error, shutdown::Cancellation};

/// Starts the one thread that reads standard input and forwards every line.
///
/// The channel disconnects when standard input reaches end of file. The
/// thread is never joined since a blocking read can't be interrupted.
///
/// # Errors
/// if the thread can't be spawned
pub fn spawn_console_reader() -> Result<Receiver<String>, Error> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("console".to_string())
        .spawn(move || forward_lines(io::stdin().lock(), &tx))
        .map_err(|e| Error::Spawn("console", e))?;
    Ok(rx)
}

fn forward_lines(input: impl BufRead, lines: &Sender<String>) {
    for line in input.lines() {
        match line {
            Ok(line) => {
                if lines.send(line).is_err() {
                    return;
                }
            }
            Err(e) => {
                log::warn!("couldn't read from stdin: {e}");
                return;
            }
        }
    }
    log::debug!("stdin closed");
}

/// throws away lines typed while no alarm was ringing
pub fn discard_pending(lines: &Receiver<String>) -> usize {
    lines.try_iter().count()
}

/// Waits for any line (even an empty one) and then stops the session.
///
/// Returns early without stopping anything once `cancel` fires.
pub fn watch_for_answer(
    session_id: u64,
    lines: &Receiver<String>,
    stop: &Sender<()>,
    cancel: &Cancellation,
) {
    select! {
        recv(lines) -> line => {
            if line.is_ok() {
                log::info!("session {session_id} answered");
                // the playback side may already be gone on shutdown
                let _ = stop.send(());
                return;
            }
            log::warn!("stdin closed, session {session_id} can only end on shutdown");
            let _ = cancel.closed().recv();
        }
        recv(cancel.closed()) -> _ => {}
    }
    log::debug!("session {session_id} watcher cancelled");
}

use std::thread;

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::{
    audio::Player,
    communication::{Message, MessageType},
    shutdown::Cancellation,
};

/// Plays the sound back to back until `stop` fires or the process is
/// cancelled, then reports why it ended on `events`.
///
/// Both signals are checked before every playback, so stopping takes at
/// most one playback of the sound.
pub fn play_until_stopped(
    session_id: u64,
    player: &dyn Player,
    stop: &Receiver<()>,
    cancel: &Cancellation,
    events: &Sender<Message>,
) {
    let _guard = PanicGuard { session_id, events };
    let kind = loop {
        if cancel.is_cancelled() {
            break MessageType::Cancelled;
        }
        match stop.try_recv() {
            Ok(()) => break MessageType::Stopped,
            // the watcher only hangs up without stopping us on shutdown
            Err(TryRecvError::Disconnected) => break MessageType::Cancelled,
            Err(TryRecvError::Empty) => {}
        }
        if let Err(e) = player.play_once() {
            log::error!("session {session_id}: {e}");
            break MessageType::Failed(e);
        }
    };
    log::info!("session {session_id} ended: {kind:?}");
    // the coordinator is gone only if it already bailed out
    let _ = events.send(Message::new(kind, session_id));
}

/// tells the coordinator the session died if the player panics
struct PanicGuard<'a> {
    session_id: u64,
    events: &'a Sender<Message>,
}

impl Drop for PanicGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            log::error!("session {} panicked while playing", self.session_id);
            let _ = self
                .events
                .send(Message::new(MessageType::Panicked, self.session_id));
        }
    }
}

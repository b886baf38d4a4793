use crate::error::AudioError;

/// what a playback session tells the coordinator when it ends
#[derive(Debug)]
pub struct Message {
    pub kind: MessageType,
    pub session_id: u64,
}

impl Message {
    #[must_use]
    pub const fn new(kind: MessageType, session_id: u64) -> Self {
        Self { kind, session_id }
    }
}

#[derive(Debug)]
pub enum MessageType {
    /// someone answered the alarm
    Stopped,
    /// the process is shutting down
    Cancelled,
    /// the sound couldn't be played, nothing else should run after this
    Failed(AudioError),
    /// the playback thread panicked, also fatal
    Panicked,
}

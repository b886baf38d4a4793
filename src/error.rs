use std::{io, path::PathBuf};

/// something went wrong playing the alarm sound
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("couldn't open sound file {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("couldn't decode sound file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
    #[error("couldn't open audio output: {0}")]
    Output(#[from] rodio::StreamError),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error("couldn't install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("couldn't start {0} thread: {1}")]
    Spawn(&'static str, io::Error),
    #[error("{0} thread panicked")]
    Panicked(String),
}

use std::{fs::File, io::BufReader, path::PathBuf};

use rodio::{Decoder, OutputStreamBuilder, Sink};

use crate::error::AudioError;

/// plays the alarm sound once, returning only when it has finished
pub trait Player: Send + Sync {
    /// # Errors
    /// if the sound can't be loaded or the output device can't be used
    fn play_once(&self) -> Result<(), AudioError>;
}

/// a sound file on disk, reopened on every playback
#[derive(Debug, Clone)]
pub struct SoundFile {
    path: PathBuf,
    volume: f32,
}

impl SoundFile {
    /// `volume` is a percentage like the alarm volume sliders use
    #[must_use]
    pub fn new(path: PathBuf, volume: f32) -> Self {
        Self { path, volume }
    }

    fn decode(&self) -> Result<Decoder<BufReader<File>>, AudioError> {
        let file = File::open(&self.path).map_err(|source| AudioError::Open {
            path: self.path.clone(),
            source,
        })?;
        Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}

impl Player for SoundFile {
    fn play_once(&self) -> Result<(), AudioError> {
        // decode before touching the device so a bad file fails fast
        let source = self.decode()?;
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        stream.log_on_drop(false);
        let sink = Sink::connect_new(stream.mixer());
        sink.set_volume(self.volume / 100.0);
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

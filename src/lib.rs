#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use std::sync::Arc;

use audio::SoundFile;
use config::Settings;
use coordinator::Coordinator;
use error::Error;

pub mod audio;
pub mod communication;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod input;
pub mod playback;
pub mod shutdown;
pub mod tasks;

/// Rings every `settings.interval` until the process is told to stop.
///
/// # Errors
/// if the signal handler can't be installed, the sound can't be played or
/// one of the alarm's threads fails
pub fn run(settings: &Settings) -> Result<(), Error> {
    let quit = shutdown::listen_for_termination()?;
    let lines = input::spawn_console_reader()?;
    let player = Arc::new(SoundFile::new(settings.sound.clone(), settings.volume));
    log::info!(
        "ringing {} every {}",
        settings.sound.display(),
        settings.interval
    );
    Coordinator::new(player, lines).run(&coordinator::ticker(settings.interval), &quit)
}

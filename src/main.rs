use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use nag_clock::config::{Interval, Settings, DEFAULT_SOUND};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// minutes between alarms
    interval: Interval,
    /// sound to play when the alarm goes off
    #[clap(long, short, default_value = DEFAULT_SOUND)]
    sound: PathBuf,
    /// volume in percent
    #[clap(long, short, default_value_t = 100.0, value_parser = parse_volume)]
    volume: f32,
}

fn parse_volume(s: &str) -> Result<f32, String> {
    let volume: f32 = s.parse().map_err(|_| format!("{s:?} isn't a number"))?;
    if (0.0..=100.0).contains(&volume) {
        Ok(volume)
    } else {
        Err("volume must be between 0 and 100".to_string())
    }
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self::new(args.interval)
            .with_sound(args.sound)
            .with_volume(args.volume)
    }
}

fn main() -> ExitCode {
    // initilize the logger
    simple_file_logger::init_logger!("nag_clock").expect("couldn't initialize logger");

    let settings = Settings::from(Args::parse());
    println!("alarm set to go off every {}", settings.interval);

    match nag_clock::run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

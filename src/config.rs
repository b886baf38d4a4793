use std::{fmt, num::NonZeroU64, path::PathBuf, str::FromStr, time::Duration};

/// file played when no `--sound` is given, relative to the working directory
pub const DEFAULT_SOUND: &str = "sound.mp3";

/// time between two alarms, in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval(NonZeroU64);

impl Interval {
    #[must_use]
    pub const fn from_minutes(minutes: NonZeroU64) -> Self {
        Self(minutes)
    }

    #[must_use]
    pub const fn minutes(self) -> u64 {
        self.0.get()
    }

    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0.get().saturating_mul(60))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minutes() {
            1 => write!(f, "1 minute"),
            n => write!(f, "{n} minutes"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    #[error("interval must be a whole number of minutes, got {0:?}")]
    NotANumber(String),
    #[error("interval must be at least one minute")]
    NotPositive,
    #[error("interval of {0} minutes is too large")]
    TooLarge(String),
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let minutes: i128 = trimmed
            .parse()
            .map_err(|_| IntervalError::NotANumber(s.to_string()))?;
        if minutes <= 0 {
            return Err(IntervalError::NotPositive);
        }
        u64::try_from(minutes)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| IntervalError::TooLarge(trimmed.to_string()))
    }
}

/// everything the alarm needs to run, fixed at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub interval: Interval,
    pub sound: PathBuf,
    /// percent, 0 to 100
    pub volume: f32,
}

impl Settings {
    #[must_use]
    pub fn new(interval: Interval) -> Self {
        Self {
            interval,
            sound: PathBuf::from(DEFAULT_SOUND),
            volume: 100.0,
        }
    }

    #[must_use]
    pub fn with_sound(mut self, sound: PathBuf) -> Self {
        self.sound = sound;
        self
    }

    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 100.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_minutes() {
        let interval: Interval = "5".parse().unwrap();
        assert_eq!(interval.minutes(), 5);
        assert_eq!(interval.as_duration(), Duration::from_secs(300));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(" 12 ".parse::<Interval>().unwrap().minutes(), 12);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert_eq!("0".parse::<Interval>(), Err(IntervalError::NotPositive));
        assert_eq!("-3".parse::<Interval>(), Err(IntervalError::NotPositive));
    }

    #[test]
    fn accepts_the_whole_u64_range() {
        let max = u64::MAX.to_string();
        assert_eq!(max.parse::<Interval>().unwrap().minutes(), u64::MAX);
        let past_i64 = (u64::try_from(i64::MAX).unwrap() + 1).to_string();
        assert!(past_i64.parse::<Interval>().is_ok());
    }

    #[test]
    fn reports_out_of_range_by_sign() {
        let too_big = (u128::from(u64::MAX) + 1).to_string();
        assert!(matches!(
            too_big.parse::<Interval>(),
            Err(IntervalError::TooLarge(_))
        ));
        let very_negative = (i128::from(i64::MIN) - 1).to_string();
        assert_eq!(
            very_negative.parse::<Interval>(),
            Err(IntervalError::NotPositive)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "ten".parse::<Interval>(),
            Err(IntervalError::NotANumber(_))
        ));
        assert!(matches!(
            "1.5".parse::<Interval>(),
            Err(IntervalError::NotANumber(_))
        ));
        assert!(matches!(
            "".parse::<Interval>(),
            Err(IntervalError::NotANumber(_))
        ));
    }

    #[test]
    fn display_pluralizes() {
        assert_eq!("1".parse::<Interval>().unwrap().to_string(), "1 minute");
        assert_eq!("10".parse::<Interval>().unwrap().to_string(), "10 minutes");
    }

    #[test]
    fn settings_default_to_bundled_sound() {
        let settings = Settings::new("3".parse().unwrap());
        assert_eq!(settings.sound, PathBuf::from(DEFAULT_SOUND));
        assert!((settings.volume - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn volume_is_clamped() {
        let settings = Settings::new("3".parse().unwrap()).with_volume(250.0);
        assert!((settings.volume - 100.0).abs() < f32::EPSILON);
    }
}

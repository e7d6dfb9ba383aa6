//! Simulated traveler clock.
//!
//! A [`ClockTime`] counts seconds from midnight of the day the route starts.
//! Values past 24:00 mean the traveler is on a later day; deadlines are plain
//! times of day (`< 24:00`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SECONDS_PER_DAY: u64 = 24 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time {0:?}, expected HH:MM or HH:MM:SS")]
pub struct ParseClockError(String);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns `None` unless `hours < 24`, `minutes < 60` and `seconds < 60`.
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Option<Self> {
        if hours >= 24 || minutes >= 60 || seconds >= 60 {
            return None;
        }
        Some(Self(hours * 3600 + minutes * 60 + seconds))
    }

    pub fn as_seconds(&self) -> u64 {
        self.0
    }

    /// Whole days elapsed since midnight of the start day.
    pub fn day(&self) -> u64 {
        self.0 / SECONDS_PER_DAY
    }

    /// The same instant folded back onto the start day.
    pub fn time_of_day(&self) -> ClockTime {
        ClockTime(self.0 % SECONDS_PER_DAY)
    }

    pub fn plus_seconds(self, seconds: u64) -> ClockTime {
        ClockTime(self.0.saturating_add(seconds))
    }
}

impl FromStr for ClockTime {
    type Err = ParseClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseClockError(s.to_string());
        let mut parts = s.trim().split(':').map(|part| part.parse::<u64>());
        let hours = parts.next().ok_or_else(err)?.map_err(|_| err())?;
        let minutes = parts.next().ok_or_else(err)?.map_err(|_| err())?;
        let seconds = match parts.next() {
            Some(value) => value.map_err(|_| err())?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(err());
        }
        ClockTime::from_hms(hours, minutes, seconds).ok_or_else(err)
    }
}

/// `HH:MM:SS` of the time of day; later days get a `(+N day)` suffix.
impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tod = self.time_of_day().0;
        write!(f, "{:02}:{:02}:{:02}", tod / 3600, (tod % 3600) / 60, tod % 60)?;
        match self.day() {
            0 => Ok(()),
            1 => write!(f, " (+1 day)"),
            days => write!(f, " (+{days} days)"),
        }
    }
}

use serde::{Deserialize, Serialize};

use super::validate::ValidationError;

/// Whether the field renders hours on a 12-hour clock with an AM/PM cell
/// or on a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HourMode {
    Hour12,
    Hour24,
}

/// A validated wall-clock time.
///
/// Always stored on the 24-hour clock regardless of how the field displays
/// it. Values can only be produced through validation or the wrapping
/// arithmetic below, so hour/minute/second are always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTime")]
pub struct TimeValue {
    hour: u8,
    minute: u8,
    second: u8,
}

#[derive(Deserialize)]
struct RawTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TryFrom<RawTime> for TimeValue {
    type Error = ValidationError;

    fn try_from(raw: RawTime) -> Result<Self, Self::Error> {
        TimeValue::new(raw.hour, raw.minute, raw.second)
    }
}

impl TimeValue {
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::HourRange);
        }
        if minute > 59 {
            return Err(ValidationError::MinuteRange);
        }
        if second > 59 {
            return Err(ValidationError::SecondRange);
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    pub fn midnight() -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// Render the display string for the given mode.
    ///
    /// 24-hour mode is always `hh:mm:ss` with zero-padded hours. 12-hour
    /// mode blank-pads single-digit hours (`" 9:05:00 AM"`) and maps the
    /// 0/12 boundaries so midnight renders as 12 AM and noon as 12 PM.
    pub fn render(&self, mode: HourMode) -> String {
        match mode {
            HourMode::Hour24 => format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second),
            HourMode::Hour12 => {
                let (display_hour, meridiem) = match self.hour {
                    0 => (12, "AM"),
                    h @ 1..=11 => (h, "AM"),
                    12 => (12, "PM"),
                    h => (h - 12, "PM"),
                };
                format!(
                    "{:>2}:{:02}:{:02} {}",
                    display_hour, self.minute, self.second, meridiem
                )
            }
        }
    }

    /// Add `delta` hours, wrapping within the day. Minutes and seconds are
    /// untouched.
    pub fn offset_hours(self, delta: i32) -> Self {
        Self {
            hour: wrap(self.hour, delta, 24),
            ..self
        }
    }

    /// Add `delta` minutes, wrapping within the hour without carrying.
    pub fn offset_minutes(self, delta: i32) -> Self {
        Self {
            minute: wrap(self.minute, delta, 60),
            ..self
        }
    }

    /// Add `delta` seconds, wrapping within the minute without carrying.
    pub fn offset_seconds(self, delta: i32) -> Self {
        Self {
            second: wrap(self.second, delta, 60),
            ..self
        }
    }

    /// Flip AM to PM or back by shifting the hour twelve hours.
    pub fn toggle_meridiem(self) -> Self {
        let hour = if self.hour < 12 {
            self.hour + 12
        } else {
            self.hour - 12
        };
        Self { hour, ..self }
    }
}

fn wrap(value: u8, delta: i32, modulus: i32) -> u8 {
    (value as i32 + delta).rem_euclid(modulus) as u8
}

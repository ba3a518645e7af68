use std::fmt;

use super::time::{HourMode, TimeValue};

/// Why a candidate string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Not 8 (`hh:mm:ss`) or 11 (`hh:mm:ss xM`) characters.
    Length,
    /// A colon or the meridiem space is missing or misplaced.
    Separator,
    HourRange,
    MinuteRange,
    SecondRange,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => write!(f, "time string must be 8 or 11 characters"),
            Self::Separator => write!(f, "expected ':' separators and a space before AM/PM"),
            Self::HourRange => write!(f, "hour out of range"),
            Self::MinuteRange => write!(f, "minute out of range"),
            Self::SecondRange => write!(f, "second out of range"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a full candidate display string and produce its canonical
/// 24-hour value.
///
/// The string's length decides which format is expected: 8 characters is
/// 24-hour, 11 is 12-hour with an uppercase `AM`/`PM` token. 12-hour hours
/// may blank-pad the tens place (`" 9"`) and must be 1 through 12; 24-hour
/// hours must be two digits, 00 through 23.
pub fn validate(candidate: &str) -> Result<TimeValue, ValidationError> {
    let bytes = candidate.as_bytes();
    let mode = match bytes.len() {
        8 => HourMode::Hour24,
        11 => HourMode::Hour12,
        _ => return Err(ValidationError::Length),
    };

    if bytes[2] != b':' || bytes[5] != b':' {
        return Err(ValidationError::Separator);
    }
    if mode == HourMode::Hour12 && bytes[8] != b' ' {
        return Err(ValidationError::Separator);
    }

    let hour = match mode {
        HourMode::Hour24 => {
            let tens = digit(bytes[0]).ok_or(ValidationError::HourRange)?;
            let ones = digit(bytes[1]).ok_or(ValidationError::HourRange)?;
            let hour = tens * 10 + ones;
            if hour > 23 {
                return Err(ValidationError::HourRange);
            }
            hour
        }
        HourMode::Hour12 => {
            let tens = match bytes[0] {
                b' ' => 0,
                b => digit(b).ok_or(ValidationError::HourRange)?,
            };
            let ones = digit(bytes[1]).ok_or(ValidationError::HourRange)?;
            let clock_hour = tens * 10 + ones;
            if !(1..=12).contains(&clock_hour) {
                return Err(ValidationError::HourRange);
            }
            match &candidate[9..11] {
                "AM" => clock_hour % 12,
                "PM" => clock_hour % 12 + 12,
                _ => return Err(ValidationError::HourRange),
            }
        }
    };

    let minute = two_digits(bytes[3], bytes[4]).ok_or(ValidationError::MinuteRange)?;
    if minute > 59 {
        return Err(ValidationError::MinuteRange);
    }
    let second = two_digits(bytes[6], bytes[7]).ok_or(ValidationError::SecondRange)?;
    if second > 59 {
        return Err(ValidationError::SecondRange);
    }

    TimeValue::new(hour, minute, second)
}

fn digit(b: u8) -> Option<u8> {
    b.is_ascii_digit().then(|| b - b'0')
}

fn two_digits(tens: u8, ones: u8) -> Option<u8> {
    Some(digit(tens)? * 10 + digit(ones)?)
}

//! Timestamp display in the user's time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a timestamp as `YYYY-MM-DD HH:MM` in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(TimeZone::system()).strftime("%Y-%m-%d %H:%M")
        )
    }
}

/// Formats only the calendar date of a timestamp, in the system time zone.
pub struct LocalDate<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(TimeZone::system()).strftime("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_have_fixed_shape() {
        let ts = Timestamp::from_second(1_700_000_000).unwrap();
        let full = LocalDateTime(&ts).to_string();
        let date = LocalDate(&ts).to_string();
        assert_eq!(full.len(), "2023-11-14 22:13".len());
        assert_eq!(date.len(), "2023-11-14".len());
        assert!(full.starts_with(&date));
    }
}

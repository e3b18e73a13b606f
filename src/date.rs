//! The `CCYYMMDD` date stored in a SAUCE header.
//!
//! Calendar validity is not checked: art scene tools wrote all kinds of
//! dates, and the viewer only displays them. With the `chrono` feature the
//! date converts to and from `chrono::NaiveDate`, which does validate.
//!
//! ```
//! use ansiview::SauceDate;
//! let d = SauceDate::from_bytes(b"19961231").unwrap();
//! assert_eq!(d.to_string(), "1996/12/31");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SauceDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for SauceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl SauceDate {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        SauceDate { year, month, day }
    }

    /// Parse the 8 ASCII digits of the wire format.
    ///
    /// Returns `None` for anything that is not exactly eight digits.
    ///
    /// ```
    /// use ansiview::SauceDate;
    /// assert!(SauceDate::from_bytes(b"2025110").is_none());
    /// assert!(SauceDate::from_bytes(b"2025 1 8").is_none());
    /// ```
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != crate::limits::DATE_LENGTH || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let number = |digits: &[u8]| {
            digits
                .iter()
                .fold(0i32, |acc, &d| acc * 10 + i32::from(d - b'0'))
        };
        Some(SauceDate {
            year: number(&bytes[0..4]),
            month: number(&bytes[4..6]) as u8,
            day: number(&bytes[6..8]) as u8,
        })
    }

    /// The wire representation, `YYYYMMDD`.
    ///
    /// Years outside `0..=9999` cannot be represented and are clamped.
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut out = [b'0'; 8];
        let text = format!(
            "{:04}{:02}{:02}",
            self.year.clamp(0, 9999),
            self.month.min(99),
            self.day.min(99)
        );
        out.copy_from_slice(text.as_bytes());
        out
    }

    /// Whether the date was left empty (all zero) by the writer.
    pub fn is_empty(&self) -> bool {
        *self == SauceDate::default()
    }

    #[cfg(feature = "chrono")]
    pub fn to_naive_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::from_ymd_opt(self.year, u32::from(self.month), u32::from(self.day))
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for SauceDate {
    fn from(d: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        SauceDate::new(d.year(), d.month() as u8, d.day() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_zero_padded() {
        assert_eq!(&SauceDate::new(1994, 3, 7).to_bytes(), b"19940307");
        assert_eq!(&SauceDate::default().to_bytes(), b"00000000");
    }

    #[test]
    fn out_of_range_year_is_clamped_on_write() {
        assert_eq!(&SauceDate::new(12_345, 1, 2).to_bytes(), b"99990102");
    }
}

//! Fixed-capacity label text.

use core::fmt::Write;
use heapless::String;

/// Big enough for `"99999:59"`.
pub type TimeLabel = String<8>;

/// `m:ss` - minutes unpadded, seconds zero-padded.
pub fn time_label(secs: u32) -> TimeLabel {
    let mut out = TimeLabel::new();
    // Minutes are clamped so the write always fits.
    let minutes = (secs / 60).min(99_999);
    let _ = write!(out, "{}:{:02}", minutes, secs % 60);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(time_label(0).as_str(), "0:00");
        assert_eq!(time_label(9).as_str(), "0:09");
        assert_eq!(time_label(173).as_str(), "2:53");
        assert_eq!(time_label(3_600).as_str(), "60:00");
    }
}

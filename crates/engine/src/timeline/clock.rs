use std::sync::LazyLock;

use regex::Regex;

/// Clock token inside free text: "5:32", "5:32 p.m.", "9:48pm", "1:47 a. m.".
static CLOCK_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}:\d{2}(?:\s*[ap]\.?\s?m\b\.?)?").unwrap()
});

/// Normalized clock string: hours, minutes, optional meridiem.
static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(am|pm)?$").unwrap());

/// A parsed clock value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockReading {
    /// Minutes since midnight, or within an unlabelled 12-hour cycle when
    /// `ambiguous` is set.
    pub minutes: u32,
    /// No am/pm marker was present. Only usable for relative ordering.
    pub ambiguous: bool,
}

/// Parse "H:MM" with an optional am/pm marker in any of its usual spellings.
///
/// 12am is midnight and 12pm stays noon. Without a marker the value lives
/// in an ambiguous 12-hour cycle where 12 wraps to 0. Anything unparseable
/// is `None`.
pub fn parse_clock_to_minutes(clock: &str) -> Option<ClockReading> {
    let normalized: String = clock
        .trim()
        .to_lowercase()
        .replace('.', "")
        .split_whitespace()
        .collect();
    let caps = CLOCK_RE.captures(&normalized)?;

    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    if minutes > 59 {
        return None;
    }

    match caps.get(3).map(|m| m.as_str()) {
        Some(meridiem) => {
            if !(1..=12).contains(&hours) {
                return None;
            }
            let base = hours % 12;
            let hours24 = if meridiem == "pm" { base + 12 } else { base };
            Some(ClockReading {
                minutes: hours24 * 60 + minutes,
                ambiguous: false,
            })
        }
        None => {
            if hours > 12 {
                return None;
            }
            Some(ClockReading {
                minutes: (hours % 12) * 60 + minutes,
                ambiguous: true,
            })
        }
    }
}

/// First clock token in `text`, verbatim. Tokens running into further
/// digits ("5:321") are not clocks.
pub fn find_clock_token(text: &str) -> Option<&str> {
    CLOCK_TOKEN_RE
        .find_iter(text)
        .find(|m| {
            !text[m.end()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
        })
        .map(|m| m.as_str().trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(s: &str) -> Option<u32> {
        parse_clock_to_minutes(s).map(|r| r.minutes)
    }

    #[test]
    fn test_meridiem_spellings() {
        assert_eq!(minutes("5:32 p.m."), Some(17 * 60 + 32));
        assert_eq!(minutes("9:48pm"), Some(21 * 60 + 48));
        assert_eq!(minutes("1:47 a.m."), Some(60 + 47));
        assert_eq!(minutes("1:47 AM"), Some(60 + 47));
        assert_eq!(minutes("7:05 a. m."), Some(7 * 60 + 5));
    }

    #[test]
    fn test_twelve_hour_wraparound() {
        assert_eq!(minutes("12:15 am"), Some(15));
        assert_eq!(minutes("12:15 pm"), Some(12 * 60 + 15));
    }

    #[test]
    fn test_no_meridiem_is_ambiguous() {
        let r = parse_clock_to_minutes("12:30").unwrap();
        assert_eq!(r.minutes, 30);
        assert!(r.ambiguous);
        assert_eq!(minutes("4:10"), Some(4 * 60 + 10));
        assert!(!parse_clock_to_minutes("4:10 pm").unwrap().ambiguous);
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(minutes(""), None);
        assert_eq!(minutes("noon"), None);
        assert_eq!(minutes("17:45"), None);
        assert_eq!(minutes("0:30 am"), None);
        assert_eq!(minutes("13:00 pm"), None);
        assert_eq!(minutes("5:75"), None);
    }

    #[test]
    fn test_find_clock_token() {
        assert_eq!(
            find_clock_token("On Monday at 5:32 p.m. she was last seen."),
            Some("5:32 p.m.")
        );
        assert_eq!(find_clock_token("left at 9:48pm"), Some("9:48pm"));
        assert_eq!(find_clock_token("at 5:32 amid the noise"), Some("5:32"));
        assert_eq!(find_clock_token("ratio 5:321"), None);
        assert_eq!(find_clock_token("no clock here"), None);
    }
}

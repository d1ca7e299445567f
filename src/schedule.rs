//! Parser for the portal's hidden schedule encoding.
//!
//! The registration page stores each section's meeting pattern in a hidden
//! input using a token mini-language:
//!
//! - `@t` introduces a time range,
//! - `@r` introduces the room/location,
//! - `@n` separates meeting blocks,
//! - single digits `1`–`7` before a `@t` are weekday codes (1 = Sunday).
//!
//! Example: `1 3 @t 08:00 ص - 09:40 ص @r B-12` means Sunday and Tuesday,
//! 08:00–09:40, room B-12.
//!
//! The parser is deterministic and side-effect-free; both extraction paths
//! call it on the raw field verbatim.

use crate::model::UNSPECIFIED;

/// Placeholder the portal writes into the hidden field for sections with no
/// scheduled hours.
const HOURS_SENTINEL: &str = "--hours--";

/// Join marker between day/time entries. The viewer renders the schedule text
/// as HTML, so this is a literal `<br>`.
pub const LINE_BREAK: &str = "<br>";

/// Schedule text and location decoded from one hidden field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSchedule {
    /// `"{day}: {time}"` entries joined with [`LINE_BREAK`], or the raw input
    /// verbatim when no `@t` token was present.
    pub times: String,
    /// Room/location text, [`UNSPECIFIED`] when absent.
    pub location: String,
}

impl ParsedSchedule {
    fn unspecified() -> Self {
        Self {
            times: UNSPECIFIED.to_owned(),
            location: UNSPECIFIED.to_owned(),
        }
    }
}

/// Map a weekday digit code to its Arabic day name.
///
/// Unrecognized codes pass through verbatim — the portal has been seen
/// emitting literal day names in this position.
pub fn day_name(code: &str) -> &str {
    match code {
        "1" => "الأحد",
        "2" => "الاثنين",
        "3" => "الثلاثاء",
        "4" => "الأربعاء",
        "5" => "الخميس",
        "6" => "الجمعة",
        "7" => "السبت",
        other => other,
    }
}

/// Decode one raw hidden-field value into schedule text and location.
///
/// Empty, whitespace-only, or `--hours--` sentinel input yields the
/// unspecified pair. Input without any `@t` token is echoed verbatim as the
/// time field (the portal occasionally writes free-form text here), paired
/// with whatever location was found.
pub fn parse(raw: &str) -> ParsedSchedule {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == HOURS_SENTINEL {
        return ParsedSchedule::unspecified();
    }

    // Location: content after the first `@r`, up to the next `@n`, `@t`, or
    // end of string. Later `@r` tokens belong to other blocks and never win.
    let location = match trimmed.split_once("@r") {
        Some((_, rest)) => {
            let end = [rest.find("@n"), rest.find("@t")]
                .into_iter()
                .flatten()
                .min()
                .unwrap_or(rest.len());
            let text = rest[..end].trim();
            if text.is_empty() {
                UNSPECIFIED.to_owned()
            } else {
                text.to_owned()
            }
        }
        None => UNSPECIFIED.to_owned(),
    };

    if !trimmed.contains("@t") {
        // Malformed-input fallback: echo the input verbatim.
        return ParsedSchedule {
            times: raw.to_owned(),
            location,
        };
    }

    let mut entries = Vec::new();
    for block in trimmed.split("@n") {
        let Some((days, rest)) = block.split_once("@t") else {
            continue;
        };
        let time = rest.split("@r").next().unwrap_or_default().trim();
        for code in days.split_whitespace() {
            entries.push(format!("{}: {}", day_name(code), time));
        }
    }

    ParsedSchedule {
        times: entries.join(LINE_BREAK),
        location,
    }
}

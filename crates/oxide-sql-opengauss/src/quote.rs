//! Identifier quoting.
//!
//! openGauss delimits identifiers with `"` and escapes an embedded quote by
//! doubling it. Names may be qualified (`schema.table`, `table.column`);
//! each dot-separated segment is quoted on its own and the dots stay
//! outside the quotes.
//!
//! Callers sometimes hand over names that are already quoted or escaped.
//! The quoter accepts those without escaping them twice:
//!
//! - a pair of consecutive quotes is an escaped quote and is copied once,
//! - a segment that opens with a single quote is self-quoted: that quote
//!   becomes the opening delimiter, the next unpaired quote followed by a
//!   `.` or the end of input becomes the closing one, and dots in between
//!   belong to the identifier.

/// Scanner state within the current segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing of the segment has been written.
    SegmentStart,
    /// The segment opened with one quote; nothing written yet.
    LeadingQuote,
    /// The opening quote is written and no quote is pending.
    InSegment { self_quoted: bool },
    /// One quote is pending. The next character decides whether it starts
    /// an escaped pair, closes the segment, or is an embedded quote.
    AfterQuoteRun { self_quoted: bool },
}

/// Appends `name`, quoted, to `out`.
pub fn quote_to(out: &mut String, name: &str) {
    let mut state = State::SegmentStart;

    for c in name.chars() {
        state = match (state, c) {
            (State::SegmentStart, '"') => State::LeadingQuote,
            (State::SegmentStart, '.') => {
                out.push_str("\"\".");
                State::SegmentStart
            }
            (State::SegmentStart, c) => {
                out.push('"');
                out.push(c);
                State::InSegment { self_quoted: false }
            }

            (State::LeadingQuote, '"') => {
                out.push_str("\"\"\"");
                State::InSegment { self_quoted: false }
            }
            (State::LeadingQuote, '.') => {
                out.push_str("\"\"\"\".");
                State::SegmentStart
            }
            (State::LeadingQuote, c) => {
                out.push('"');
                out.push(c);
                State::InSegment { self_quoted: true }
            }

            (State::InSegment { self_quoted }, '"') => State::AfterQuoteRun { self_quoted },
            (State::InSegment { self_quoted: false }, '.') => {
                out.push_str("\".");
                State::SegmentStart
            }
            (State::InSegment { self_quoted }, c) => {
                out.push(c);
                State::InSegment { self_quoted }
            }

            (State::AfterQuoteRun { self_quoted }, '"') => {
                out.push_str("\"\"");
                State::InSegment { self_quoted }
            }
            (State::AfterQuoteRun { self_quoted }, '.') => {
                if !self_quoted {
                    out.push_str("\"\"");
                }
                out.push_str("\".");
                State::SegmentStart
            }
            (State::AfterQuoteRun { self_quoted }, c) => {
                out.push_str("\"\"");
                out.push(c);
                State::InSegment { self_quoted }
            }
        };
    }

    match state {
        State::SegmentStart => out.push_str("\"\""),
        State::LeadingQuote => out.push_str("\"\"\"\""),
        State::InSegment { .. } | State::AfterQuoteRun { self_quoted: true } => out.push('"'),
        State::AfterQuoteRun { self_quoted: false } => out.push_str("\"\"\""),
    }
}

/// Quotes `name` into a new string.
#[must_use]
pub fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    quote_to(&mut out, name);
    out
}

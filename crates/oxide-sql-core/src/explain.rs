//! Human-readable rendering of bound statements.
//!
//! Used for logging only: the output inlines bound values as literals and
//! must never be sent to a server.

use regex::{Captures, Regex};

use crate::builder::value::SqlValue;

/// Replaces the placeholders in `sql` with the literal form of `vars`.
///
/// With a `placeholder` pattern, its first capture group must hold the
/// 1-based parameter index (as in `\$(\d+)`); matches whose index has no
/// value are left untouched. Without a pattern, every `?` takes the next
/// value in order.
#[must_use]
pub fn explain_sql(
    sql: &str,
    placeholder: Option<&Regex>,
    escaper: char,
    vars: &[SqlValue],
) -> String {
    match placeholder {
        Some(pattern) => pattern
            .replace_all(sql, |caps: &Captures<'_>| {
                caps.get(1)
                    .and_then(|m| m.as_str().parse::<usize>().ok())
                    .and_then(|position| position.checked_sub(1))
                    .and_then(|idx| vars.get(idx))
                    .map_or_else(|| caps[0].to_string(), |v| v.to_sql_inline(escaper))
            })
            .into_owned(),
        None => {
            let mut out = String::with_capacity(sql.len());
            let mut values = vars.iter().peekable();
            for c in sql.chars() {
                match (c, values.next_if(|_| c == '?')) {
                    (_, Some(v)) => out.push_str(&v.to_sql_inline(escaper)),
                    (c, None) => out.push(c),
                }
            }
            out
        }
    }
}

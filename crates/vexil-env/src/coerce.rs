//! Scalar and list coercions.
//!
//! None of these functions allocate unless they must return an owned list,
//! and none of them can fail.

/// Values that [`coerce_bool`] reads as `true`. Matching is exact and
/// case-sensitive.
pub const TRUTHY_TOKENS: &[&str] = &["true", "1", "t"];

/// Whitespace skipped before a leading integer: tab, line feed, vertical
/// tab, form feed, carriage return, the Unicode space separators, the line
/// and paragraph separators, and the byte-order mark. `U+0085` is not in
/// the set.
fn is_leading_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Extract a base-10 integer from the start of `raw`.
///
/// Leading whitespace is skipped, then one optional `+` or `-`, then the
/// longest run of ASCII digits. Anything after the digits is ignored, so
/// `"42px"` yields `42` and `"1e3"` yields `1`. Returns `None` when no digit
/// follows the optional sign.
///
/// Digit runs that do not fit in an `i64` saturate at `i64::MAX` or
/// `i64::MIN`.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let rest = raw.trim_start_matches(is_leading_space);
    let (negative, digits) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    let mut saturated = false;

    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        if saturated {
            continue;
        }
        let digit = i64::from(byte.wrapping_sub(b'0'));
        // Accumulate towards the sign so i64::MIN stays representable.
        let next = value.checked_mul(10).and_then(|v| {
            if negative {
                v.checked_sub(digit)
            } else {
                v.checked_add(digit)
            }
        });
        match next {
            Some(v) => value = v,
            None => {
                value = if negative { i64::MIN } else { i64::MAX };
                saturated = true;
            },
        }
    }

    seen_digit.then_some(value)
}

/// Coerce `raw` to an integer, returning `fallback` when it is absent, empty
/// or has no leading integer.
///
/// ```rust
/// use vexil_env::coerce_int;
///
/// assert_eq!(coerce_int(Some("-5"), 0), -5);
/// assert_eq!(coerce_int(Some("abc"), 7), 7);
/// assert_eq!(coerce_int(None, 7), 7);
/// ```
#[must_use]
pub fn coerce_int(raw: Option<&str>, fallback: i64) -> i64 {
    match raw {
        Some(s) if !s.is_empty() => parse_leading_int(s).unwrap_or(fallback),
        _ => fallback,
    }
}

/// Coerce `raw` to a boolean.
///
/// Absent or empty input yields `fallback`. Any other value yields `true`
/// only if it is one of [`TRUTHY_TOKENS`]; everything else, including
/// `"TRUE"` and `"yes"`, yields `false` rather than the fallback.
#[must_use]
pub fn coerce_bool(raw: Option<&str>, fallback: bool) -> bool {
    match raw {
        Some(s) if !s.is_empty() => TRUTHY_TOKENS.contains(&s),
        _ => fallback,
    }
}

/// Coerce `raw` to a list of comma-separated tokens.
///
/// Absent input yields `fallback` untouched. Present input, even `""`, is
/// split on `,`, each token trimmed, and empty tokens dropped. Order and
/// duplicates are kept.
#[must_use]
pub fn coerce_string_list(raw: Option<&str>, fallback: Vec<String>) -> Vec<String> {
    let Some(s) = raw else {
        return fallback;
    };

    s.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

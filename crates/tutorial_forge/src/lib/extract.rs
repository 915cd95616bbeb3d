//! Recovery of an embedded JSON value from free-form model output.
//!
//! The model is asked for pure JSON but routinely wraps it in prose or code
//! fences, so the reply is scanned for the first JSON value instead of being
//! decoded as-is.

/// Returns the first balanced JSON object or array embedded in `s`.
///
/// The scan starts at the earliest `{` or `[` and tracks bracket depth,
/// skipping over string literals and escape sequences. Returns an empty
/// string when no opening bracket exists or balance is never reached;
/// decoding the empty result upstream reports the extraction failure.
pub fn extract_json(s: &str) -> &str {
    let Some(start) = s.find(['{', '[']) else {
        return "";
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in s.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return &s[start..=i];
                }
            }
            _ => {}
        }
    }

    ""
}

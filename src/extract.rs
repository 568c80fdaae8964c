//! Verification-code extraction from message bodies.

use std::sync::LazyLock;

use regex::Regex;

/// One extraction rule: a pattern and the capture group holding the code.
struct CodePattern {
    regex: Regex,
    group: usize,
}

/// Patterns tried in priority order; the first usable match wins. The tail
/// entries are heuristics with increasing false-positive risk, which is why
/// explicit phrasings come first.
static CODE_PATTERNS: LazyLock<Vec<CodePattern>> = LazyLock::new(|| {
    // The bare-run rule must reject runs preceded by `#`/`&` (HTML entities,
    // anchors) or embedded in longer digit runs. The regex crate has no
    // lookbehind, so both exclusions are spelled out as bounded context.
    [
        (r"(?i)Verification code:?\s*(\d{6})", 1),
        (r"(?i)code is\s*(\d{6})", 1),
        (r"代码为[:：]?\s*(\d{6})", 1),
        (r"验证码[:：]?\s*(\d{6})", 1),
        (r">\s*(\d{6})\s*<", 1),
        (r"(?:^|[^#&0-9])(\d{6})(?:[^0-9]|$)", 1),
    ]
    .into_iter()
    .map(|(pattern, group)| CodePattern {
        regex: Regex::new(pattern).expect("static pattern must compile"),
        group,
    })
    .collect()
});

/// Codes that some pattern technically matches but that are known false
/// positives; a match on one of these falls through to the next pattern.
const EXCLUDED_CODES: &[&str] = &["177010"];

/// Extract a 6-digit verification code from a message body.
///
/// Tries each pattern in priority order and returns the first capture that
/// is not a known false positive. Returns `None` when nothing matches; it
/// never fails, and the same body always yields the same result.
///
/// # Examples
/// ```
/// use mailfly_client::extract_code;
///
/// assert_eq!(
///     extract_code("Verification code: 482913"),
///     Some("482913".to_string())
/// );
/// assert_eq!(extract_code("no digits here"), None);
/// ```
pub fn extract_code(body: &str) -> Option<String> {
    for pattern in CODE_PATTERNS.iter() {
        let Some(captures) = pattern.regex.captures(body) else {
            continue;
        };
        let Some(code) = captures.get(pattern.group) else {
            continue;
        };
        if EXCLUDED_CODES.contains(&code.as_str()) {
            continue;
        }
        return Some(code.as_str().to_string());
    }
    None
}

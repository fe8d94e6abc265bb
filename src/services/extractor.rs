//! Fenced code block extraction from generator responses.

/// Extract the interior of the first ```` ```<tag> ```` fenced block.
///
/// The tag must be followed by whitespace (or the end of input), so
/// `java` never matches a `javascript` fence. Returns `None` when no
/// opening fence matches, when no closing fence follows it, or when the
/// interior is blank. Only the first matching region is considered; a
/// well-behaved generator emits exactly one.
pub fn extract_fenced_block(response: &str, tag: &str) -> Option<String> {
    let opening = format!("```{tag}");
    let mut from = 0;
    loop {
        let start = response[from..].find(&opening)? + from + opening.len();
        match response[start..].chars().next() {
            // A longer tag sharing this prefix; keep looking.
            Some(c) if !c.is_whitespace() => {
                from = start;
                continue;
            }
            _ => {
                let end = response[start..].find("```")? + start;
                let interior = response[start..end].trim();
                return if interior.is_empty() {
                    None
                } else {
                    Some(interior.to_string())
                };
            }
        }
    }
}

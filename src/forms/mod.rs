pub mod media_properties;
pub mod products;
pub mod tags;

/// Trim, collapse inner whitespace runs to one space and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line, strip leading/trailing blank lines and keep at most one blank line in a row.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut previous_empty = false;

    for line in input.lines().map(sanitize_inline_text) {
        if line.is_empty() {
            if result.is_empty() || previous_empty {
                continue;
            }
            previous_empty = true;
        } else {
            previous_empty = false;
        }
        result.push(line);
    }

    while matches!(result.last(), Some(line) if line.is_empty()) {
        result.pop();
    }

    result.join("\n")
}

//! Repair of near-JSON emitted by the text model.
//!
//! The model sometimes puts raw newlines, tabs or shell-style escapes
//! (`` \` ``, `\$`) inside string values. This pass rewrites them inside
//! string values only, leaving everything between strings untouched.

/// Rewrite control characters and stray escapes inside JSON string values.
///
/// A string value is closed by a `"` whose preceding character is not `\`.
/// Its content is buffered and fixed when that quote is reached.
pub fn normalize_json_text(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut buf = String::new();
    let mut in_string = false;
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            output.push(c);
        } else if c == '"' && prev != Some('\\') {
            output.push_str(&fix_string_body(&buf));
            output.push(c);
            buf.clear();
            in_string = false;
        } else {
            buf.push(c);
        }
        prev = Some(c);
    }

    // unterminated string: keep what was read
    if !buf.is_empty() {
        output.push_str(&fix_string_body(&buf));
    }

    output
}

fn fix_string_body(body: &str) -> String {
    body.replace("\\`", "`")
        .replace("\\$", "$")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}

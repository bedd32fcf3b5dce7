/// Quotes `field` for use as one CSV cell.
///
/// A field containing a comma is wrapped in double quotes. A field containing
/// a double quote is wrapped too, with every embedded quote doubled. Anything
/// else is returned unchanged.
pub fn quote_csv(field: &str) -> String {
    if field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else if field.contains(',') {
        format!("\"{}\"", field)
    } else {
        field.to_string()
    }
}

/// Quotes `s` as a double-quoted string literal.
///
/// `"` and `\` are backslash-escaped. Control characters use `\n`-style
/// escapes where one exists, `\xNN` below 0x80 and `\uNNNN` above. Spaces
/// other than U+0020 and invisible format characters are escaped the same
/// way. Everything else is written as is.
pub fn quote_string(s: &str) -> String {
    quote_with(s, false)
}

/// Like [`quote_string`], but every non-ASCII character is escaped as
/// `\uNNNN` or `\UNNNNNNNN`.
pub fn quote_ascii(s: &str) -> String {
    quote_with(s, true)
}

fn quote_with(s: &str, ascii_only: bool) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ if is_printable(c) && (c.is_ascii() || !ascii_only) => out.push(c),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            _ if c < ' ' || c == '\u{7F}' => out.push_str(&format!("\\x{:02x}", c as u32)),
            _ if (c as u32) < 0x10000 => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }
    out.push('"');
    out
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control() || c.is_whitespace() || is_format(c))
}

fn is_format(c: char) -> bool {
    matches!(
        c,
        '\u{AD}'
            | '\u{600}'..='\u{605}'
            | '\u{61C}'
            | '\u{6DD}'
            | '\u{70F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    )
}

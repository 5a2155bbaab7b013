//! Decoding of Java string literals and text blocks.
//!
//! The decoder undoes every escape Java allows in a string literal, which makes it
//! the inverse of [`escape_java`](crate::descriptor::escape_java).

const TEXT_BLOCK_DELIMITER: &str = "\"\"\"";

/// Decode a string literal exactly as written in source, quotes included.
///
/// Accepts both `"..."` literals and `"""` text blocks.
///
/// # Errors
///
/// Returns a message describing the problem when the literal is not quoted, has
/// an invalid escape, or decodes to an unpaired UTF-16 surrogate.
pub fn decode_string_literal(raw: &str) -> Result<String, String> {
    if let Some(body) = raw
        .strip_prefix(TEXT_BLOCK_DELIMITER)
        .and_then(|rest| rest.strip_suffix(TEXT_BLOCK_DELIMITER))
    {
        return decode_text_block(body);
    }

    let body = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| format!("not a string literal: {raw}"))?;
    unescape(body)
}

/// Text block content: everything after the opening delimiter line.
///
/// Incidental indentation is the smallest indentation of the non-blank lines
/// and of the closing delimiter line. Trailing spaces are stripped from each line
/// before escapes are processed.
fn decode_text_block(body: &str) -> Result<String, String> {
    let (opening, content) = body
        .split_once('\n')
        .ok_or_else(|| "text block must start with a line break".to_string())?;
    if !opening.trim().is_empty() {
        return Err("text block opening delimiter must be followed by a line break".to_string());
    }

    let content = content.replace("\r\n", "\n");
    let lines: Vec<&str> = content.split('\n').collect();
    let last = lines.len() - 1;

    let indent = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| *i == last || !line.trim().is_empty())
        .map(|(_, line)| line.chars().take_while(|c| *c == ' ' || *c == '\t').count())
        .min()
        .unwrap_or(0);

    let stripped: Vec<String> = lines
        .iter()
        .map(|line| {
            let without_indent: String = line.chars().skip(indent).collect();
            without_indent.trim_end_matches([' ', '\t']).to_string()
        })
        .collect();

    unescape(&stripped.join("\n"))
}

/// Process Java escape sequences.
fn unescape(body: &str) -> Result<String, String> {
    let mut units: Vec<u16> = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            let mut buf = [0u16; 2];
            units.extend_from_slice(ch.encode_utf16(&mut buf));
            continue;
        }

        let escape = chars.next().ok_or_else(|| "dangling backslash".to_string())?;
        match escape {
            'b' => units.push(0x08),
            't' => units.push(0x09),
            'n' => units.push(0x0a),
            'f' => units.push(0x0c),
            'r' => units.push(0x0d),
            's' => units.push(0x20),
            '"' => units.push(0x22),
            '\'' => units.push(0x27),
            '\\' => units.push(0x5c),
            // Line continuation inside text blocks
            '\n' => {}
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return Err(format!("truncated unicode escape \\u{hex}"));
                }
                let unit = u16::from_str_radix(&hex, 16)
                    .map_err(|_| format!("invalid unicode escape \\u{hex}"))?;
                units.push(unit);
            }
            '0'..='7' => {
                // Up to three digits when the first is 0-3, otherwise up to two
                let max_digits = if escape <= '3' { 3 } else { 2 };
                let mut value = escape.to_digit(8).unwrap_or(0);
                let mut digits = 1;
                while digits < max_digits {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                            digits += 1;
                        }
                        None => break,
                    }
                }
                units.push(value as u16);
            }
            other => return Err(format!("invalid escape sequence \\{other}")),
        }
    }

    String::from_utf16(&units).map_err(|_| "unpaired surrogate in unicode escape".to_string())
}

//! HTML escaping

/// Escape element text: `&`, `<`, `>` and both quote characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
///
/// Addresses and icon data are written verbatim apart from the quote, which
/// keeps query strings such as `?a=1&b=2` byte-identical to browser exports.
pub fn escape_attr(s: &str) -> String {
    s.replace('"', "&quot;")
}

/// Decode character references. Unknown or unterminated references are kept
/// as written.
pub fn unescape_html(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        match decode_reference(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Decode the reference at the start of `s` (which begins with `&`),
/// returning the character and the number of bytes consumed.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    // Longest reference we understand is `&#x10FFFF;`.
    let semi = s.bytes().take(12).position(|b| b == b';')?;
    let body = &s[1..semi];

    let ch = if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => '\u{a0}',
            _ => return None,
        }
    };

    Some((ch, semi + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("some & title < multiple > parts"),
            "some &amp; title &lt; multiple &gt; parts"
        );
        assert_eq!(escape_html("it's \"quoted\""), "it&#x27;s &quot;quoted&quot;");
    }

    #[test]
    fn test_unescape_restores_escaped_text() {
        let original = "a & b < c > d \"e\" 'f'";
        assert_eq!(unescape_html(&escape_html(original)), original);
    }

    #[test]
    fn test_unescape_numeric_references() {
        assert_eq!(unescape_html("&#39;&#x27;&#X41;"), "''A");
    }

    #[test]
    fn test_unescape_keeps_bare_ampersands() {
        assert_eq!(
            unescape_html("https://example.com/?a=1&b=2&"),
            "https://example.com/?a=1&b=2&"
        );
        assert_eq!(unescape_html("&unknown; &#xZZ;"), "&unknown; &#xZZ;");
    }

    #[test]
    fn test_escape_attr_only_touches_quotes() {
        assert_eq!(escape_attr("https://x/?q=\"a\"&b"), "https://x/?q=&quot;a&quot;&b");
    }
}

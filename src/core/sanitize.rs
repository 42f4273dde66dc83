// src/core/sanitize.rs
use crate::error::{Result, TrackerError};

/// Decode character references in one pass: a few named ones plus any
/// numeric `&#N;` / `&#xH;`. Unknown or broken references stay as written.
pub fn normalize_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        match decode_entity(tail) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// `tail` starts at '&'. Returns the decoded char and the reference length.
fn decode_entity(tail: &str) -> Option<(char, usize)> {
    let end = tail
        .char_indices()
        .take(12)
        .find(|&(_, c)| c == ';')
        .map(|(i, _)| i)?;
    let body = &tail[1..end];

    let ch = match body {
        "nbsp" => ' ',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "lt" => '<',
        "gt" => '>',
        _ => {
            let num = body.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None if num.bytes().all(|b| b.is_ascii_digit()) => num.parse().ok()?,
                None => return None,
            };
            match char::from_u32(code)? {
                '\u{a0}' => ' ',
                c => c,
            }
        }
    };
    Some((ch, end + 1))
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// "$1,299.99" → 1299.99. Ranges ("$10.99 - $24.99", "$5 to $9",
/// "12.50-15.00") keep the first bound.
pub fn parse_price(raw: &str) -> Result<f64> {
    let cleaned = raw.replace(['$', ','], "");
    let mut text = cleaned.trim();

    let lower = text.to_ascii_lowercase();
    let cut = [lower.find("to"), text.find('-')].into_iter().flatten().min();
    if let Some(cut) = cut {
        let first = text[..cut].trim();
        if !first.is_empty() {
            text = first;
        }
    }

    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(TrackerError::Parse { text: s!(text) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_prices() {
        assert_eq!(parse_price("$19.99").unwrap(), 19.99);
        assert_eq!(parse_price(" $1,299.00 ").unwrap(), 1299.0);
        assert_eq!(parse_price("42").unwrap(), 42.0);
    }

    #[test]
    fn ranges_take_first_bound() {
        assert_eq!(parse_price("$10.99 - $24.99").unwrap(), 10.99);
        assert_eq!(parse_price("$5.00 to $9.00").unwrap(), 5.0);
        assert_eq!(parse_price("12.50-15.00").unwrap(), 12.5);
        assert_eq!(parse_price("$3.00 TO $4.00").unwrap(), 3.0);
    }

    #[test]
    fn garbage_is_parse_error() {
        match parse_price("Currently unavailable") {
            Err(TrackerError::Parse { text }) => assert_eq!(text, "Currently unavailable"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(parse_price("").is_err());
        assert!(parse_price("inf").is_err());
    }

    #[test]
    fn entities_and_ws() {
        assert_eq!(normalize_entities("a&nbsp;&amp;&#36;b"), "a &$b");
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }

    #[test]
    fn numeric_references_decode() {
        assert_eq!(normalize_entities("Pro &#8211; 2 Pack"), "Pro \u{2013} 2 Pack");
        assert_eq!(normalize_entities("Kid&#x27;s &#X2122;"), "Kid's \u{2122}");
        assert_eq!(normalize_entities("a&#160;b"), "a b");
        // Decoded once only.
        assert_eq!(normalize_entities("&amp;#39;"), "&#39;");
    }

    #[test]
    fn broken_references_stay_literal() {
        assert_eq!(normalize_entities("AT&T"), "AT&T");
        assert_eq!(normalize_entities("&#xZZ; &#; &bogus; &#99999999;"), "&#xZZ; &#; &bogus; &#99999999;");
        assert_eq!(normalize_entities("R&D; 5 & 6"), "R&D; 5 & 6");
    }
}

// src/core/html.rs
//
// Tolerant, case-insensitive tag scanning. Not a DOM: just enough to find an
// element by id / class and take the text inside it.

/// Elements that never have content or a closing tag.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "source", "track", "wbr",
];

/// Elements whose body is raw text (skip over, never scan inside).
const RAW_TEXT: &[&str] = &["script", "style"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub attrs: &'a str,
    /// Byte offset of '<'
    pub start: usize,
    /// Byte offset just past '>'
    pub end: usize,
    pub closing: bool,
    pub self_closing: bool,
}

impl<'a> Tag<'a> {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        attr_value(self.attrs, name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|v| v.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn is_void(&self) -> bool {
        VOID.iter().any(|v| self.is(v))
    }
}

/// Find the '>' that ends a tag starting at `from`, ignoring '>' inside quotes.
fn tag_end(b: &[u8], from: usize) -> Option<usize> {
    let mut in_s = false; // '
    let mut in_d = false; // "
    let mut i = from;
    while i < b.len() {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Next opening/closing tag at or after `from`. Comments, doctypes and the
/// bodies of `<script>`/`<style>` are skipped.
pub fn next_tag(doc: &str, from: usize) -> Option<Tag<'_>> {
    let b = doc.as_bytes();
    let mut i = from;
    while i < b.len() {
        let lt = i + doc.get(i..)?.find('<')?;
        let rest = &doc[lt..];

        if rest.starts_with("<!--") {
            i = match rest.find("-->") { Some(e) => lt + e + 3, None => return None };
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            i = lt + rest.find('>')? + 1;
            continue;
        }

        let closing = rest.as_bytes().get(1) == Some(&b'/');
        let name_start = lt + if closing { 2 } else { 1 };
        let name_len = b[name_start..]
            .iter()
            .take_while(|c| c.is_ascii_alphanumeric())
            .count();
        if name_len == 0 || !b[name_start].is_ascii_alphabetic() {
            i = lt + 1;
            continue;
        }
        let name_end = name_start + name_len;
        let gt = tag_end(b, name_end)?;
        let raw_attrs = &doc[name_end..gt];
        let self_closing = raw_attrs.trim_end().ends_with('/');

        let tag = Tag {
            name: &doc[name_start..name_end],
            attrs: raw_attrs.trim().trim_end_matches('/'),
            start: lt,
            end: gt + 1,
            closing,
            self_closing,
        };
        return Some(tag);
    }
    None
}

/// Iterator over tags in document order, stepping over raw-text bodies.
pub struct Tags<'a> {
    doc: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        let tag = next_tag(self.doc, self.pos)?;
        self.pos = tag.end;
        if !tag.closing && RAW_TEXT.iter().any(|r| tag.is(r)) {
            let close = format!("</{}", tag.name);
            self.pos = find_ci(self.doc, &close, tag.end).unwrap_or(self.doc.len());
        }
        Some(tag)
    }
}

pub fn tags(doc: &str) -> Tags<'_> {
    Tags { doc, pos: 0 }
}

/// Case-insensitive substring search starting at `from` (ASCII needles).
pub fn find_ci(hay: &str, needle: &str, from: usize) -> Option<usize> {
    let h = hay.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || from > h.len() || h.len() - from < n.len() {
        return None;
    }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Raw HTML between an opening tag and its matching close (nesting-aware).
/// Unterminated elements run to end of document.
pub fn inner_html<'a>(doc: &'a str, open: &Tag<'a>) -> &'a str {
    if open.closing || open.self_closing || open.is_void() {
        return "";
    }
    let mut depth = 0usize;
    for t in (Tags { doc, pos: open.end }) {
        if !t.is(open.name) {
            continue;
        }
        if t.closing {
            if depth == 0 {
                return &doc[open.end..t.start];
            }
            depth -= 1;
        } else if !t.self_closing {
            depth += 1;
        }
    }
    &doc[open.end..]
}

/// Parse `name=value` pairs; values may be double-, single- or un-quoted.
pub fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let b = attrs.as_bytes();
    let mut i = 0usize;
    while i < b.len() {
        while i < b.len() && (b[i].is_ascii_whitespace() || b[i] == b'/') { i += 1; }
        let key_start = i;
        while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'=' { i += 1; }
        let key = &attrs[key_start..i];
        while i < b.len() && b[i].is_ascii_whitespace() { i += 1; }

        let mut value = "";
        if i < b.len() && b[i] == b'=' {
            i += 1;
            while i < b.len() && b[i].is_ascii_whitespace() { i += 1; }
            if i < b.len() && (b[i] == b'"' || b[i] == b'\'') {
                let q = b[i];
                let v_start = i + 1;
                let v_end = b[v_start..].iter().position(|&c| c == q).map(|p| v_start + p).unwrap_or(b.len());
                value = &attrs[v_start..v_end];
                i = (v_end + 1).min(b.len());
            } else {
                let v_start = i;
                while i < b.len() && !b[i].is_ascii_whitespace() { i += 1; }
                value = &attrs[v_start..i];
            }
        }
        if !key.is_empty() && key.eq_ignore_ascii_case(name) {
            return Some(value);
        }
        if key.is_empty() { i += 1; }
    }
    None
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Visible text of an HTML fragment: tags removed, entities decoded,
/// whitespace collapsed.
pub fn text_of(fragment: &str) -> String {
    use super::sanitize::{normalize_entities, normalize_ws};
    normalize_ws(&normalize_entities(&strip_tags(fragment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_value_quotes() {
        let a = r#"id="productTitle" class='a b'  data-x=7 hidden"#;
        assert_eq!(attr_value(a, "id"), Some("productTitle"));
        assert_eq!(attr_value(a, "CLASS"), Some("a b"));
        assert_eq!(attr_value(a, "data-x"), Some("7"));
        assert_eq!(attr_value(a, "hidden"), Some(""));
        assert_eq!(attr_value(a, "missing"), None);
    }

    #[test]
    fn tags_skip_comments_and_scripts() {
        let doc = r#"<!doctype html><!-- <span class="x"> --><script>var s = "<span class='x'>";</script><SPAN class="x">hi</SPAN>"#;
        let found: Vec<Tag> = tags(doc).filter(|t| t.is("span") && !t.closing).collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].has_class("x"));
        assert_eq!(inner_html(doc, &found[0]), "hi");
    }

    #[test]
    fn inner_html_is_nesting_aware() {
        let doc = r#"<div id="o"><div>a</div><div>b<br></div></div><div>tail</div>"#;
        let open = tags(doc).find(|t| t.attr("id") == Some("o")).unwrap();
        assert_eq!(inner_html(doc, &open), "<div>a</div><div>b<br></div>");
    }

    #[test]
    fn gt_inside_quoted_attr() {
        let doc = r#"<a title="1 > 0" class="k">x</a>"#;
        let t = next_tag(doc, 0).unwrap();
        assert!(t.has_class("k"));
        assert_eq!(inner_html(doc, &t), "x");
    }

    #[test]
    fn text_of_collapses() {
        assert_eq!(text_of("  <b>Fancy</b>&nbsp;&amp;\n  <i>Co</i> "), "Fancy & Co");
    }

    #[test]
    fn find_ci_basic() {
        assert_eq!(find_ci("abc</SCRIPT>", "</script", 0), Some(3));
        assert_eq!(find_ci("abc", "abcd", 0), None);
    }
}

//! Text escaping helpers shared by the resolver, the serializer and the
//! front-end helpers.

use std::fmt::Write;
use url::Url;

/// Escape `&`, `<`, `>` and `"` for safe embedding in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = maud::Escaper::new(&mut out).write_str(text);
    out
}

/// Escape a URL for an HTML attribute or text node.
///
/// Like [`escape_html`] with single quotes escaped too.
pub fn escape_url(url: &str) -> String {
    escape_html(url).replace('\'', "&#039;")
}

/// Strip `scheme://host[:port]` from an absolute URL, keeping the path.
///
/// Relative URLs, and absolute URLs with nothing after the host, are
/// returned unchanged.
pub fn strip_host_url(url: &str) -> &str {
    let Ok(parsed) = Url::parse(url) else {
        return url;
    };
    if !parsed.has_host() {
        return url;
    }
    let Some(rest) = url
        .get(parsed.scheme().len()..)
        .and_then(|rest| rest.strip_prefix("://"))
    else {
        return url;
    };
    match rest.find('/') {
        Some(slash) => &rest[slash..],
        None => url,
    }
}

/// Percent-encode the characters of a URL that cannot appear raw in markup.
pub fn sanitize_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '"' => out.push_str("%22"),
            '\'' => out.push_str("%27"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '\\' => out.push_str("%5C"),
            c if c.is_control() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
            c => out.push(c),
        }
    }
    out
}

/// Escape generated CSS before it is stored for embedding in a `<style>`
/// block: `&` and `<` are escaped, quotes are kept, `>` is left as the child
/// combinator it is.
pub fn escape_stylesheet(css: &str) -> String {
    escape_html(css).replace("&quot;", "\"").replace("&gt;", ">")
}

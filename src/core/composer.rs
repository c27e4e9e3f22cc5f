//! Document composition.
//!
//! Combines the HTML and CSS buffers into a single document by injecting
//! the CSS as a `<style>` block into the document head.

/// Combine HTML and CSS into one document.
///
/// If the CSS is empty the HTML passes through unchanged. Otherwise the
/// CSS is wrapped in a `<style>` block and injected before the closing
/// head tag; documents without a head get one synthesized around the
/// style block, prepended to the markup.
pub fn compose_document(html: &str, css: &str) -> String {
    if css.is_empty() {
        return html.to_string();
    }

    let style_block = format!("<style>{}</style>", css);

    let mut composed = html.replace("</head>", &format!("{}</head>", style_block));
    if !composed.contains("<head>") {
        composed = format!("<head>{}</head>{}", style_block, composed);
    }

    composed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_css_passes_through() {
        let html = "<html><head><title>T</title></head><body></body></html>";
        assert_eq!(compose_document(html, ""), html);
    }

    #[test]
    fn test_css_injected_before_head_close() {
        let html = "<html><head><title>T</title></head><body>hi</body></html>";
        let composed = compose_document(html, "body { color: red; }");
        assert_eq!(
            composed,
            "<html><head><title>T</title><style>body { color: red; }</style></head><body>hi</body></html>"
        );
    }

    #[test]
    fn test_head_synthesized_when_absent() {
        let composed = compose_document("<p>hello</p>", "p { margin: 0; }");
        assert_eq!(
            composed,
            "<head><style>p { margin: 0; }</style></head><p>hello</p>"
        );
    }

    #[test]
    fn test_uppercase_head_gets_synthesized_block() {
        // Tag matching is on the literal lowercase tags, so an all-caps
        // document takes the synthesis path.
        let composed = compose_document("<HTML><HEAD></HEAD><BODY></BODY></HTML>", "b{}");
        assert!(composed.starts_with("<head><style>b{}</style></head>"));
        assert!(composed.ends_with("</HTML>"));
    }

    #[test]
    fn test_style_preserves_css_verbatim() {
        let css = "a:hover { content: \"</head>\"; }";
        let composed = compose_document("<p>x</p>", css);
        assert!(composed.contains(css));
    }
}

//! Escaping helpers shared by the loader and demo page outputs.

/// Escape text for an HTML text node or attribute value.
pub(super) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Make JSON safe to embed inside an inline `<script>` element.
pub(super) fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\!--")
}

/// Escape a string for a single-quoted JS literal.
pub(super) fn js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

//! Namespace-injection rendering.
//!
//! The store's resolved JSON is handed to a host page by assigning it to a
//! property of the JavaScript `window` object. This module owns that one
//! textual boundary; everything upstream guarantees the JSON contains no
//! unresolved producers.

/// Renders the script snippet assigning `json` to `window['<namespace>']`.
///
/// The namespace is emitted inside a bracketed string subscript, so names
/// that are not valid JS identifiers still work.
pub fn script_tag(namespace: &str, json: &str) -> String {
    format!("<script>window['{namespace}'] = {json};</script>")
}

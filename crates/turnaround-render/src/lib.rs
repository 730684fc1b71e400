//! # turnaround-render
//!
//! Rendering for the ground-handling dashboard.
//!
//! This crate provides:
//! - HTML task table rendering with delay highlighting
//! - Contrast-aware text colour selection (WCAG relative luminance)
//! - Login and dashboard page markup for the HTTP shell
//!
//! ## Example
//!
//! ```rust,ignore
//! use turnaround_core::TableRenderer;
//! use turnaround_render::HtmlTableRenderer;
//!
//! let renderer = HtmlTableRenderer::new();
//! match renderer.render(&table) {
//!     Ok(html) => println!("{html}"),
//!     Err(RenderError::NoData) => eprintln!("No Information"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod contrast;
pub mod page;
pub mod table;

pub use contrast::{relative_luminance, text_color_for};
pub use page::{query_string, DashboardPage, LoginPage, LOGIN_FAILED_NOTICE, NO_DATA_NOTICE};
pub use table::HtmlTableRenderer;

/// HTML-escape a string
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_works() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"it's\""), "&quot;it&#x27;s&quot;");
    }
}

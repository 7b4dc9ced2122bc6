//! HTML minification for the published document.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify the output document when `[build] minify` is on.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if config.build.minify {
        Cow::Owned(minify_html_inner(html))
    } else {
        Cow::Borrowed(html)
    }
}

/// Minify HTML content using `minify_html` crate.
///
/// Closing tags and `<html>`/`<head>` are kept because the page is meant to be
/// re-bound by later builds.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

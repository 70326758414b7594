use chrono::{DateTime, TimeZone};
use dioxus::prelude::VirtualDom;
use hyper::{Body, Request};

use conditional::Conditional;

pub mod address;
pub mod conditional;
pub mod db;

/// Renders a page component into a complete HTML document. Text and
/// attribute values are escaped, since post front matter and request paths
/// end up in them.
pub fn render_html(mut vdom: VirtualDom, lang: &str) -> String {
    let _ = vdom.rebuild();
    let mut renderer = dioxus_ssr::Renderer::new();
    renderer.sanitize = true;
    let lang = html_escape::encode_double_quoted_attribute(lang);
    format!("<!DOCTYPE html><html lang=\"{lang}\">{}</html>", renderer.render(&vdom))
}

/// True if the client's cached copy of a resource last modified at `current`
/// is still good.
pub fn cache_valid<TZ: TimeZone>(req: &Request<Body>, current: &DateTime<TZ>) -> bool {
    Conditional::from_headers(req.headers()).is_fresh(current)
}

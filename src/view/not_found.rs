use dioxus::prelude::*;
use hyper::{Uri, Method};

#[derive(Props, PartialEq)]
pub struct NotFoundProps {
    pub path: Uri,
    pub method: Method,
    pub site_title: String,
}

pub fn not_found(cx: Scope<NotFoundProps>) -> Element {
    cx.render(rsx! {
        super::preamble {
            title: "Not Found",
            canonical_url: None,
            author: None,
            summary: None,
        }
        body {
            main {
                header {
                    a {
                        href: "/",
                        h1 { "{cx.props.site_title}" }
                    }
                }
                h1 { "404: Not Found" }
                p { "{cx.props.method} {cx.props.path}" }
            }
        }
    })
}

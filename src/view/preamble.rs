use dioxus::prelude::*;
use url::Url;

use super::share::SHARE_STYLES;

#[derive(Props)]
pub struct PreambleProps<'a> {
    title: &'a str,
    #[props(!optional)]
    canonical_url: Option<&'a Url>,
    #[props(!optional)]
    author: Option<&'a str>,
    #[props(!optional)]
    summary: Option<&'a str>,
}

pub fn preamble<'a>(cx: Scope<'a, PreambleProps<'a>>) -> Element<'a> {
    let author = cx.props.author
        .filter(|author| !author.is_empty())
        .and_then(|author| cx.render(rsx! {
            meta { name: "author", content: "{author}" }
        }));

    let summary = cx.props.summary
        .filter(|summary| !summary.is_empty())
        .and_then(|summary| cx.render(rsx! {
            meta { name: "description", content: "{summary}" }
        }));

    let canonical = cx.props.canonical_url.and_then(|url| cx.render(rsx! {
        link { rel: "canonical", href: "{url}" }
    }));

    cx.render(rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width,initial-scale=1" }
            title { "{cx.props.title}" }
            canonical
            link { rel: "icon", href: "/public/favicon.png" }
            author
            summary
            link {
                rel: "stylesheet",
                href: "/public/styles.css"
            }
            style {
                dangerous_inner_html: SHARE_STYLES
            }
        }
    })
}

use dioxus::prelude::*;
use url::Url;

use crate::{model::Site, util::db::PostContent};
use super::share;

#[derive(Props, PartialEq)]
pub struct PostProps {
    pub post: PostContent,
    pub site: Site,
    /// Address this page is being served at.
    #[props(!optional)]
    pub location: Option<Url>,
}

pub fn post(cx: Scope<PostProps>) -> Element {
    let timestamp = cx.props.post.timestamp.format("%A, %e %B %Y");
    let datetime = cx.props.post.timestamp.format("%F");
    let time_title = cx.props.post.timestamp.format("%e %B %Y");

    let meta = &cx.props.post.post;

    let address = if meta.author.is_empty() {
        cx.render(rsx! {
            address {
                class: "author",
                "Published on "
                time {
                    datetime: "{datetime}",
                    title: "{time_title}",
                    "{timestamp}"
                }
            }
        })
    } else {
        cx.render(rsx! {
            address {
                class: "author",
                "Published by "
                a {
                    rel: "author",
                    "{meta.author}"
                }
                " on "
                time {
                    datetime: "{datetime}",
                    title: "{time_title}",
                    "{timestamp}"
                }
            }
        })
    };

    cx.render(rsx! {
        super::preamble {
            title: &meta.title,
            canonical_url: cx.props.location.as_ref(),
            author: Some(meta.author.as_str()),
            summary: Some(meta.excerpt.as_str()),
        }
        body {
            main {
                class: "post",
                header {
                    a {
                        href: "/",
                        h1 { "{cx.props.site.title}" }
                    }
                }
                article {
                    header {
                        h1 { "{meta.title}" },
                        div {
                            class: "byline",
                            address,
                        }
                    }
                    div {
                        class: "article-body",
                        dangerous_inner_html: cx.props.post.body.as_str()
                    }
                    share::share_widget {
                        post: meta,
                        location: cx.props.location.as_ref(),
                        profile: cx.props.site.profile.as_ref(),
                    }
                }
            }
        }
    })
}

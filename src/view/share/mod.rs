//! The "connect with me" widget shown at the foot of every post.

mod icon;

use dioxus::prelude::*;
use log::debug;
use url::Url;

use crate::model::{Post, DEFAULT_PROFILE};

pub use icon::linkedin_icon;

/// Layout rules for the widget container. Emitted once per page by the preamble.
pub const SHARE_STYLES: &str = include_str!("../../res/share.css");

const PROMPT: &str = "Connect if you'd like:";
const PROMPT_STYLE: &str = "font-size: 1.4rem; color: rgb(0, 0, 0);";
const ICON_SIZE: u32 = 25;
const ICON_COLOR: &str = "#4875B4";

/// Whether a widget has been mounted on a page, and the page address it saw
/// when it was.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Attachment {
    #[default]
    Unattached,
    Attached { url: Option<Url> },
}

impl Attachment {
    /// Records `location` the first time it is called. Every later call is a
    /// no-op. Returns `true` only for the call that attached.
    pub fn attach(&mut self, location: Option<&Url>) -> bool {
        match self {
            Attachment::Attached { .. } => false,
            Attachment::Unattached => {
                *self = Attachment::Attached { url: location.cloned() };
                true
            }
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, Attachment::Attached { .. })
    }

    /// The captured page address. Nothing in the markup depends on it.
    pub fn url(&self) -> Option<&Url> {
        match self {
            Attachment::Attached { url } => url.as_ref(),
            Attachment::Unattached => None,
        }
    }
}

#[derive(Props)]
pub struct ShareProps<'a> {
    post: &'a Post,
    /// Address of the page the widget is mounted on, if the host knows it.
    #[props(!optional)]
    location: Option<&'a Url>,
    /// Profile to link to instead of [`DEFAULT_PROFILE`].
    #[props(!optional)]
    profile: Option<&'a Url>,
}

/// Captures `location` the first time the calling component renders and
/// hands back the same capture on every later render. `title` only labels
/// the log line.
pub fn use_attachment<'a>(cx: &'a ScopeState, title: &str, location: Option<&Url>) -> &'a Attachment {
    let attachment = cx.use_hook(Attachment::default);
    if attachment.attach(location) {
        match attachment.url() {
            Some(url) => debug!("Share widget for {title:?} attached at {url}"),
            None => debug!("Share widget for {title:?} attached without a page address"),
        }
    }
    attachment
}

pub fn share_widget<'a>(cx: Scope<'a, ShareProps<'a>>) -> Element<'a> {
    use_attachment(cx, &cx.props.post.title, cx.props.location);

    let profile = cx.props.profile.map_or(DEFAULT_PROFILE, |url| url.as_str());
    let icon = linkedin_icon(ICON_SIZE, ICON_COLOR);

    cx.render(rsx! {
        div {
            class: "share-widget",
            p {
                style: "{PROMPT_STYLE}",
                "{PROMPT}"
            }
            div {
                a {
                    class: "social-icon",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    href: "{profile}",
                    aria_label: "LinkedIn",
                    dangerous_inner_html: "{icon}"
                }
            }
        }
    })
}

#[cfg(test)]
mod test {
    use dioxus::prelude::*;
    use url::Url;

    use super::Attachment;
    use crate::model::{Post, DEFAULT_PROFILE};

    #[derive(Props, PartialEq)]
    struct MountProps {
        post: Post,
        #[props(!optional)]
        location: Option<Url>,
        #[props(!optional)]
        profile: Option<Url>,
    }

    fn mount(cx: Scope<MountProps>) -> Element {
        cx.render(rsx! {
            super::share_widget {
                post: &cx.props.post,
                location: cx.props.location.as_ref(),
                profile: cx.props.profile.as_ref(),
            }
        })
    }

    fn render(post: Post, location: Option<&str>) -> String {
        let location = location.map(|l| Url::parse(l).expect("location"));
        let mut vdom = VirtualDom::new_with_props(mount, MountProps { post, location, profile: None });
        let _ = vdom.rebuild();
        html_escape::decode_html_entities(&dioxus_ssr::render(&vdom)).into_owned()
    }

    fn has_prompt(html: &str) -> bool {
        ["Connect if you'd like:", "Connect if you&#39;d like:", "Connect if you&#x27;d like:", "Connect if you&apos;d like:"]
            .iter()
            .any(|prompt| html.matches(prompt).count() == 1)
    }

    #[test]
    fn renders_prompt_and_one_profile_link() {
        let html = render(Post::new("A", "B", "C"), Some("https://example.com/post/1"));

        assert!(html.contains("class=\"share-widget\""), "{html}");
        assert!(has_prompt(&html), "{html}");
        assert_eq!(html.matches("<p style=").count(), 1, "{html}");
        assert_eq!(html.matches("<a ").count(), 1, "{html}");
        assert!(html.contains(&format!("href=\"{DEFAULT_PROFILE}\"")), "{html}");
        assert!(html.contains("target=\"_blank\""), "{html}");
        assert!(html.contains("<svg"), "{html}");
    }

    #[test]
    fn post_fields_are_not_rendered() {
        let post = Post::new("Quarterly Thoughts", "Some excerpt text", "Jane Writer");
        let html = render(post, Some("https://example.com/post/1"));

        assert!(!html.contains("Quarterly Thoughts"));
        assert!(!html.contains("Some excerpt text"));
        assert!(!html.contains("Jane Writer"));
        assert_eq!(html, render(Post::new("A", "B", "C"), Some("https://example.com/post/1")));
    }

    #[test]
    fn empty_post_renders_the_same() {
        let valid = render(Post::new("A", "B", "C"), Some("https://example.com/post/1"));
        let empty = render(Post::default(), Some("https://example.com/post/1"));
        assert_eq!(valid, empty);
    }

    #[test]
    fn renders_without_a_page_address() {
        let with = render(Post::new("A", "B", "C"), Some("https://example.com/post/1"));
        let without = render(Post::new("A", "B", "C"), None);
        assert_eq!(with, without);
    }

    /// Passes a different location down on every render.
    #[derive(Props, PartialEq)]
    struct MovingProps {
        post: Post,
        locations: Vec<Url>,
    }

    fn render_count(cx: &ScopeState) -> usize {
        let renders = cx.use_hook(|| 0usize);
        let current = *renders;
        *renders += 1;
        current
    }

    fn moving_widget(cx: Scope<MovingProps>) -> Element {
        let render = render_count(cx);
        cx.render(rsx! {
            super::share_widget {
                post: &cx.props.post,
                location: cx.props.locations.get(render),
                profile: None,
            }
        })
    }

    fn moving_capture(cx: Scope<MovingProps>) -> Element {
        let render = render_count(cx);
        let attachment = super::use_attachment(cx, &cx.props.post.title, cx.props.locations.get(render));
        let captured = attachment.url().map_or_else(|| "none".to_string(), |url| url.to_string());
        cx.render(rsx! {
            p { "render {render} captured {captured}" }
        })
    }

    fn moving(component: Component<MovingProps>) -> VirtualDom {
        let locations = ["https://example.com/post/1", "https://example.com/post/2"]
            .iter()
            .map(|l| Url::parse(l).expect("location"))
            .collect();
        VirtualDom::new_with_props(
            component,
            MovingProps {
                post: Post::new("A", "B", "C"),
                locations,
            },
        )
    }

    fn rerender(vdom: &mut VirtualDom) {
        vdom.mark_dirty(ScopeId(0));
        let _ = vdom.render_immediate();
    }

    #[test]
    fn rerender_keeps_markup() {
        let mut vdom = moving(moving_widget);
        let _ = vdom.rebuild();
        let first = dioxus_ssr::render(&vdom);

        rerender(&mut vdom);
        let second = dioxus_ssr::render(&vdom);

        assert_eq!(first, second);
        assert!(has_prompt(&second), "{second}");
    }

    #[test]
    fn rerender_does_not_recapture() {
        let mut vdom = moving(moving_capture);
        let _ = vdom.rebuild();
        let first = dioxus_ssr::render(&vdom);
        let first = html_escape::decode_html_entities(&first);
        assert!(first.contains("render 0 captured https://example.com/post/1"), "{first}");

        rerender(&mut vdom);
        let second = dioxus_ssr::render(&vdom);
        let second = html_escape::decode_html_entities(&second);
        assert!(second.contains("render 1 captured https://example.com/post/1"), "{second}");
    }

    #[test]
    fn profile_override() {
        let profile = Url::parse("https://example.org/me").expect("profile");
        let mut vdom = VirtualDom::new_with_props(
            mount,
            MountProps {
                post: Post::default(),
                location: None,
                profile: Some(profile),
            },
        );
        let _ = vdom.rebuild();
        let html = dioxus_ssr::render(&vdom);
        let html = html_escape::decode_html_entities(&html);
        assert!(html.contains("href=\"https://example.org/me\""), "{html}");
        assert!(!html.contains(DEFAULT_PROFILE));
    }

    #[test]
    fn attach_captures_address() {
        let url = Url::parse("https://example.com/post/1").expect("url");
        let mut attachment = Attachment::default();
        assert!(!attachment.is_attached());
        assert_eq!(attachment.url(), None);

        assert!(attachment.attach(Some(&url)));
        assert!(attachment.is_attached());
        assert_eq!(attachment.url(), Some(&url));
    }

    #[test]
    fn attach_without_address() {
        let mut attachment = Attachment::default();
        assert!(attachment.attach(None));
        assert!(attachment.is_attached());
        assert_eq!(attachment.url(), None);
    }

    #[test]
    fn attach_happens_once() {
        let first = Url::parse("https://example.com/post/1").expect("url");
        let second = Url::parse("https://example.com/post/2").expect("url");
        let mut attachment = Attachment::default();

        assert!(attachment.attach(Some(&first)));
        assert!(!attachment.attach(Some(&second)));
        assert!(!attachment.attach(None));
        assert_eq!(attachment.url(), Some(&first));
    }
}

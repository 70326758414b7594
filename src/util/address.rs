//! Works out the address a page is being served at, which is what the share
//! widget captures when it mounts.

use hyper::{header::HOST, HeaderMap, Uri};
use url::Url;

use crate::model::Site;

/// Resolves the public address of the request `uri`.
///
/// The configured site URL wins; failing that the `Host` header is trusted.
/// Returns `None` when neither is usable.
pub fn page_address(site: &Site, uri: &Uri, headers: &HeaderMap) -> Option<Url> {
    let mut base = match &site.url {
        Some(url) => url.clone(),
        None => {
            let host = headers.get(HOST)?.to_str().ok()?;
            Url::parse(&format!("http://{host}/")).ok()?
        }
    };

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let relative = uri
        .path_and_query()
        .map_or("", |pq| pq.as_str())
        .trim_start_matches('/');

    base.join(relative).ok()
}

#[cfg(test)]
mod test {
    use hyper::{header::{HeaderValue, HOST}, HeaderMap, Uri};
    use url::Url;

    use super::page_address;
    use crate::model::Site;

    fn site(url: Option<&str>) -> Site {
        Site {
            url: url.map(|u| Url::parse(u).expect("url")),
            ..Site::default()
        }
    }

    #[test]
    fn from_site_url() {
        let uri: Uri = "/p/first?x=1".parse().expect("uri");
        let address = page_address(&site(Some("https://example.com")), &uri, &HeaderMap::new());
        assert_eq!(address.as_ref().map(Url::as_str), Some("https://example.com/p/first?x=1"));
    }

    #[test]
    fn keeps_site_prefix() {
        let uri: Uri = "/p/first".parse().expect("uri");
        let address = page_address(&site(Some("https://example.com/blog")), &uri, &HeaderMap::new());
        assert_eq!(address.as_ref().map(Url::as_str), Some("https://example.com/blog/p/first"));
    }

    #[test]
    fn from_host_header() {
        let uri: Uri = "/p/first".parse().expect("uri");
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("localhost:4198"));
        let address = page_address(&site(None), &uri, &headers);
        assert_eq!(address.as_ref().map(Url::as_str), Some("http://localhost:4198/p/first"));
    }

    #[test]
    fn no_address_available() {
        let uri: Uri = "/p/first".parse().expect("uri");
        assert_eq!(page_address(&site(None), &uri, &HeaderMap::new()), None);
    }
}

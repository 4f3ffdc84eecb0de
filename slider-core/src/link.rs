use crate::codec::{PuzzleConfig, decode};
use crate::config::PAYLOAD_PARAM;

/// Value of `key` in a `?a=b&c=d` query string, percent-decoded.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8_lossy()
        .into_owned()
}

/// The encoded puzzle carried by a page's query string, if any.
pub fn payload_from_search(search: &str) -> Option<String> {
    query_param(search, PAYLOAD_PARAM).filter(|p| !p.is_empty())
}

/// Decode the puzzle in a query string. A broken link yields `None` so the
/// caller can show its default board.
pub fn puzzle_from_search(search: &str) -> Option<PuzzleConfig> {
    puzzle_from_payload(&payload_from_search(search)?)
}

/// Decode a link payload, logging and discarding it when it is empty or
/// broken.
pub fn puzzle_from_payload(payload: &str) -> Option<PuzzleConfig> {
    if payload.is_empty() {
        return None;
    }
    match decode(payload) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("ignoring puzzle link: {err}");
            None
        }
    }
}

fn strip_query(href: &str) -> &str {
    let end = href.find(|c: char| c == '?' || c == '#').unwrap_or(href.len());
    &href[..end]
}

/// Start of the path component, just past the host.
fn path_start(href: &str) -> usize {
    match href.find("://") {
        Some(scheme) => {
            let host = scheme + 3;
            href[host..].find('/').map_or(href.len(), |p| host + p)
        }
        None => 0,
    }
}

/// The directory one level above the page at `href`, with a trailing slash.
///
/// The generator page lives one directory below the player, so this is where
/// shared links point.
pub fn parent_href(href: &str) -> String {
    let href = strip_query(href);
    let floor = path_start(href);
    let dir_end = href[floor..].rfind('/').map_or(href.len(), |i| floor + i);
    let dir = &href[..dir_end];
    let parent_end = dir[floor.min(dir.len())..]
        .rfind('/')
        .map_or(dir.len(), |i| floor + i);
    format!("{}/", &href[..parent_end])
}

/// Link to the player for `payload`. Query and fragment of `base_href` are
/// dropped.
pub fn share_link(base_href: &str, payload: &str) -> String {
    let base = strip_query(base_href);
    let slash = if base.ends_with('/') { "" } else { "/" };
    format!("{base}{slash}?{PAYLOAD_PARAM}={payload}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::codec::encode;

    #[test]
    fn reads_query_values() {
        assert_eq!(query_param("?a=1&p=abc", "p").as_deref(), Some("abc"));
        assert_eq!(query_param("p=a%2Db", "p").as_deref(), Some("a-b"));
        assert_eq!(query_param("?flag&p", "p").as_deref(), Some(""));
        assert_eq!(query_param("?a=1", "p"), None);
        assert_eq!(payload_from_search("?p="), None);
    }

    #[test]
    fn builds_share_links() {
        assert_eq!(
            share_link("https://host/app?x=1#top", "XYZ"),
            "https://host/app/?p=XYZ"
        );
        assert_eq!(share_link("https://host/app/", "XYZ"), "https://host/app/?p=XYZ");
    }

    #[test]
    fn parent_of_generator_page() {
        assert_eq!(
            parent_href("https://host/app/generator/index.html?p=1"),
            "https://host/app/"
        );
        assert_eq!(parent_href("https://host/app/generator/"), "https://host/app/");
        assert_eq!(parent_href("https://host/generator/"), "https://host/");
        assert_eq!(parent_href("https://host/"), "https://host/");
        assert_eq!(parent_href("https://host"), "https://host/");
    }

    #[test]
    fn payloads_decode_or_yield_none() {
        assert_eq!(puzzle_from_payload(""), None);
        assert_eq!(puzzle_from_payload("!!!"), None);
        let config = PuzzleConfig::default();
        assert_eq!(puzzle_from_payload(&encode(&config)), Some(config));
    }

    #[test]
    fn broken_links_fall_back() {
        assert_eq!(puzzle_from_search("?p=%%%"), None);
        assert_eq!(puzzle_from_search(""), None);
        let config = PuzzleConfig::new(3, 2, vec![1, 2, 3, 4, 0, 5]);
        let search = format!("?p={}", encode(&config));
        assert_eq!(puzzle_from_search(&search), Some(config));
    }
}

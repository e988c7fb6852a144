//! Sitemap XML parsing
//!
//! Extracts `<loc>` values from the `<url>` children of a sitemap's root
//! element. Only elements bound to the sitemap protocol namespace count.

use crate::sitemap::{SitemapError, SITEMAP_NAMESPACE};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

/// Where the reader currently sits relative to the elements we care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Anywhere that is not a `<url>` entry
    Outside,
    /// Inside a `<url>` entry, before its first `<loc>`
    InUrl,
    /// Inside the first `<loc>` of a `<url>` entry
    InLoc,
    /// Inside a `<url>` entry whose `<loc>` has already been read
    LocDone,
}

fn in_sitemap_namespace(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == SITEMAP_NAMESPACE.as_bytes())
}

/// Parses a sitemap document into its location URLs, in document order
///
/// Entries without a `<loc>`, or whose `<loc>` is blank, are skipped. Only the
/// first `<loc>` of each `<url>` is used. A `<sitemapindex>` document has no
/// `<url>` entries and therefore yields an empty list.
///
/// # Errors
///
/// Returns `SitemapError::Parse` if the document is not well-formed XML or has
/// no root element.
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, SitemapError> {
    let mut reader = NsReader::from_str(xml);

    let mut urls = Vec::new();
    let mut depth: usize = 0;
    let mut saw_root = false;
    let mut position = Position::Outside;
    let mut loc = String::new();

    loop {
        let (ns, event) = reader.read_resolved_event().map_err(xml_error)?;
        let sitemap_ns = in_sitemap_namespace(&ns);

        match event {
            Event::Start(e) => {
                if depth == 0 {
                    if saw_root {
                        return Err(SitemapError::Parse(
                            "multiple root elements".to_string(),
                        ));
                    }
                    saw_root = true;
                }
                depth += 1;

                let name = e.local_name();
                match (depth, position) {
                    (2, Position::Outside) if sitemap_ns && name.as_ref() == b"url" => {
                        position = Position::InUrl;
                    }
                    (3, Position::InUrl) if sitemap_ns && name.as_ref() == b"loc" => {
                        position = Position::InLoc;
                        loc.clear();
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if depth == 0 {
                    if saw_root {
                        return Err(SitemapError::Parse(
                            "multiple root elements".to_string(),
                        ));
                    }
                    saw_root = true;
                }
                // <loc/> consumes the entry's single loc slot without a value
                if depth == 2
                    && position == Position::InUrl
                    && sitemap_ns
                    && e.local_name().as_ref() == b"loc"
                {
                    position = Position::LocDone;
                }
            }
            Event::End(_) => {
                match (depth, position) {
                    (3, Position::InLoc) => {
                        let value = loc.trim();
                        if !value.is_empty() {
                            urls.push(value.to_string());
                        }
                        position = Position::LocDone;
                    }
                    (2, Position::InUrl | Position::LocDone) => position = Position::Outside,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(e) => {
                if position == Position::InLoc && depth == 3 {
                    let text = e.unescape().map_err(xml_error)?;
                    loc.push_str(&text);
                }
            }
            Event::CData(e) => {
                if position == Position::InLoc && depth == 3 {
                    loc.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(SitemapError::Parse("no root element found".to_string()));
    }
    if depth != 0 {
        return Err(SitemapError::Parse(format!(
            "unexpected end of document with {} unclosed element(s)",
            depth
        )));
    }

    Ok(urls)
}

/// Parses a sitemap received as raw bytes
///
/// The document must be UTF-8 (a leading byte order mark is allowed). Other
/// encodings are rejected rather than decoded lossily, so a URL is never
/// altered on its way into the processed set.
///
/// # Errors
///
/// Returns `SitemapError::Parse` if the bytes are not valid UTF-8, or for any
/// error [`parse_sitemap`] reports.
pub fn parse_sitemap_bytes(bytes: &[u8]) -> Result<Vec<String>, SitemapError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let xml = std::str::from_utf8(bytes).map_err(|e| {
        SitemapError::Parse(format!("sitemap is not valid UTF-8: {}", e))
    })?;
    parse_sitemap(xml)
}

fn xml_error(error: quick_xml::Error) -> SitemapError {
    SitemapError::Parse(error.to_string())
}

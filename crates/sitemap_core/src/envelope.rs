//! Fixed sitemap markup and node serialization.
//!
//! Every part file is `HEADER` followed by zero or more URL nodes followed by
//! `FOOTER`, with no separators between nodes. Size accounting in the
//! generator relies on the lengths here being exact byte counts.

use crate::url::Url;

/// Opening markup of every urlset file.
pub const HEADER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
);

/// Closing markup of every urlset file.
pub const FOOTER: &str = "</urlset>";

/// Opening markup of the sitemap index.
pub const INDEX_HEADER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
);

/// Closing markup of the sitemap index.
pub const INDEX_FOOTER: &str = "</sitemapindex>";

/// File extension of every output.
pub const EXTENSION: &str = "xml";

/// Serializes a URL into its `<url>` node.
///
/// Fields appear in declaration order: `loc`, `lastmod`, `changefreq`,
/// `priority`. Unset optional fields are omitted entirely. Priority is
/// written in its shortest exact form, without rounding.
#[must_use]
pub fn format_url_node(url: &Url) -> String {
    let mut node = String::with_capacity(url.loc.len() + 64);
    node.push_str("<url>");
    push_tag(&mut node, "loc", &url.loc);

    if let Some(last_mod) = &url.last_mod {
        push_tag(&mut node, "lastmod", last_mod);
    }
    if let Some(change_freq) = url.change_freq {
        push_tag(&mut node, "changefreq", change_freq.as_str());
    }
    if let Some(priority) = url.priority {
        push_tag(&mut node, "priority", &priority.to_string());
    }

    node.push_str("</url>");
    node
}

/// Serializes one `<sitemap>` entry of the index.
#[must_use]
pub fn format_index_entry(loc: &str) -> String {
    let mut node = String::with_capacity(loc.len() + 30);
    node.push_str("<sitemap>");
    push_tag(&mut node, "loc", loc);
    node.push_str("</sitemap>");
    node
}

/// Joins the public base URL and an output file name.
#[must_use]
pub fn join_location(base_url: &str, name: &str) -> String {
    if base_url.is_empty() || base_url.ends_with('/') {
        format!("{base_url}{name}")
    } else {
        format!("{base_url}/{name}")
    }
}

fn push_tag(out: &mut String, tag: &str, value: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(value);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

//! Benchmark utilities.

use sitemap_core::{ChangeFreq, Url};

/// Generate `count` URLs whose locations are roughly `loc_len` bytes long.
pub fn generate_urls(count: usize, loc_len: usize) -> Vec<Url> {
    let padding = "x".repeat(loc_len.saturating_sub(32));
    (0..count)
        .map(|i| {
            let url = Url::new(format!("https://example.com/{padding}/{i:08}"));
            if i % 3 == 0 {
                url.with_change_freq(ChangeFreq::Weekly)
            } else {
                url
            }
        })
        .collect()
}

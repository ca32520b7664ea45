//! Social share links for a post.

use url::form_urlencoded::byte_serialize;

/// A share button target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Network name as shown to readers
    pub network: &'static str,
    pub url: String,
    /// Accessible label, e.g. `Share <title> on Reddit`
    pub label: String,
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Share links in display order: X, LinkedIn, Reddit, Facebook, WhatsApp,
/// Telegram, Nostr.
pub fn share_links(title: &str, full_url: &str, tags: &[String]) -> Vec<ShareLink> {
    let t = encode(title);
    let u = encode(full_url);
    let hashtags = encode(&tags.join(","));

    let link = |network: &'static str, url: String| ShareLink {
        network,
        url,
        label: format!("Share {} on {}", title, network),
    };

    vec![
        link("X", format!("https://x.com/intent/tweet/?text={}&url={}&hashtags={}", t, u, hashtags)),
        link(
            "LinkedIn",
            format!(
                "https://www.linkedin.com/shareArticle?mini=true&url={}&title={}&summary={}&source={}",
                u, t, t, u
            ),
        ),
        link("Reddit", format!("https://reddit.com/submit?url={}&title={}", u, t)),
        link("Facebook", format!("https://facebook.com/sharer/sharer.php?u={}", u)),
        link("WhatsApp", format!("https://api.whatsapp.com/send?text={}%20-%20{}", t, u)),
        link("Telegram", format!("https://telegram.me/share/url?text={}&url={}", t, u)),
        // No web intent exists for Nostr
        link("Nostr", "#".to_string()),
    ]
}

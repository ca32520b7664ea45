//! Blog posts: front matter, markdown body and derived URLs.

use super::share::{share_links, ShareLink};
use super::SiteError;
use crate::config::SiteSection;
use gray_matter::engine::YAML;
use gray_matter::Matter;
use pulldown_cmark::{html, Options, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// YAML header of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub summary: String,
    pub cover: Cover,
    /// ISO date, used for ordering
    pub date: String,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cover {
    /// Site-absolute image path, e.g. `/images/cover.png`
    pub image: String,
}

/// A rendered-ready post.
#[derive(Debug, Clone)]
pub struct Post {
    pub matter: FrontMatter,
    pub page_title: String,
    /// Body rendered to HTML
    pub content: String,
    pub slug: String,
    /// Site-absolute path without trailing slash, e.g. `/posts/hello`
    pub path: String,
    pub origin: String,
    pub full_url: String,
    pub full_image_url: String,
    pub reading_time: String,
    pub shares: Vec<ShareLink>,
    pub draft: bool,
}

/// Parse the YAML front matter of a document, returning it with the
/// markdown body that follows.
pub fn parse_front_matter(source: &str) -> Result<(FrontMatter, String), String> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source).replace("\r\n", "\n");
    let parsed = Matter::<YAML>::new().parse(&source);
    let data = parsed.data.ok_or_else(|| "missing `---` front matter block".to_string())?;
    let matter: FrontMatter = data.deserialize().map_err(|e| e.to_string())?;
    Ok((matter, parsed.content))
}

/// Render markdown to HTML with tables, footnotes and strikethrough.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Estimated reading time, rounded up to whole minutes (minimum 1).
pub fn reading_minutes(text: &str, words_per_minute: u32) -> u32 {
    let words = text.split_whitespace().count() as u32;
    let wpm = words_per_minute.max(1);
    words.div_ceil(wpm).max(1)
}

/// Site path for a source file relative to the project root.
///
/// `posts/2024/hello.md` becomes `/posts/2024/hello`.
pub fn site_path(relative: &Path) -> Option<String> {
    let stem = relative.file_stem()?.to_str()?;
    let mut path = String::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            if let Component::Normal(part) = component {
                path.push('/');
                path.push_str(part.to_str()?);
            }
        }
    }
    path.push('/');
    path.push_str(stem);
    Some(path)
}

impl Post {
    /// Build a post from its source text.
    ///
    /// `relative` is the source path relative to the project root; it decides
    /// the slug and the site path.
    pub fn from_source(
        relative: &Path,
        source: &str,
        site: &SiteSection,
        draft: bool,
    ) -> Result<Self, SiteError> {
        let front_matter_error = |reason: String| SiteError::FrontMatter {
            path: relative.to_path_buf(),
            reason,
        };

        let (matter, body) = parse_front_matter(source).map_err(front_matter_error)?;
        let path = site_path(relative)
            .ok_or_else(|| SiteError::InvalidPath(relative.to_path_buf()))?;
        let slug = path.rsplit('/').next().unwrap_or_default().to_string();

        let origin = site.origin.trim_end_matches('/').to_string();
        let full_url = format!("{}{}", origin, path);
        let full_image_url = format!("{}{}", origin, matter.cover.image);
        let minutes = reading_minutes(&body, site.words_per_minute);
        let shares = share_links(&matter.title, &full_url, &matter.tags);

        Ok(Post {
            page_title: format!("{} - {}", site.title, matter.title),
            content: markdown_to_html(&body),
            slug,
            path,
            origin,
            full_url,
            full_image_url,
            reading_time: format!("{} min read", minutes),
            shares,
            draft,
            matter,
        })
    }
}

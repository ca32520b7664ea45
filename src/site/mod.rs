//! Static blog generator.
//!
//! This is the primary program of a build: it copies `public/` into the
//! output directory, renders every markdown post and draft to
//! `<out><path>/index.html`, and writes the blog and drafts listings.
//!
//! # Example
//!
//! ```ignore
//! use sitekit::build::BuildContext;
//! use sitekit::config::load_config;
//!
//! let ctx = BuildContext::new(load_config(None)?, project_root);
//! let report = sitekit::site::generate(&ctx)?;
//! println!("{} pages", report.pages_written);
//! ```

pub mod assets;
pub mod post;
pub mod render;
pub mod share;

pub use post::{Cover, FrontMatter, Post};
pub use render::{Layout, Listing};
pub use share::ShareLink;

use crate::build::BuildContext;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error while generating the site
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("{}: invalid front matter: {reason}", .path.display())]
    FrontMatter { path: PathBuf, reason: String },
    #[error("{}: cannot derive a site path", .0.display())]
    InvalidPath(PathBuf),
    #[error("failed to render {page}: {source}")]
    Render {
        page: String,
        #[source]
        source: askama::Error,
    },
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SiteError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        SiteError::Io { path: path.to_path_buf(), source }
    }

    fn render(page: &str, source: askama::Error) -> Self {
        SiteError::Render { page: page.to_string(), source }
    }
}

/// Summary of a generate run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub posts: usize,
    pub drafts: usize,
    pub pages_written: usize,
    pub assets_copied: usize,
}

impl GenerateReport {
    pub fn summary(&self) -> String {
        format!(
            "{} posts, {} drafts, {} pages, {} assets",
            self.posts, self.drafts, self.pages_written, self.assets_copied
        )
    }
}

/// Load and render every post in `dir`.
///
/// Posts are returned newest first; equal dates fall back to path order.
pub fn collect_posts(ctx: &BuildContext, dir: &Path, draft: bool) -> Result<Vec<Post>, SiteError> {
    let sources = assets::discover_markdown(dir)?;
    let site = &ctx.config().site;
    let root = ctx.project_root();

    let mut posts = sources
        .par_iter()
        .map(|source| {
            let text = fs::read_to_string(source).map_err(|e| SiteError::io(source, e))?;
            let relative = source.strip_prefix(root).unwrap_or(source);
            Post::from_source(relative, &text, site, draft)
        })
        .collect::<Result<Vec<_>, _>>()?;

    posts.sort_by(|a, b| b.matter.date.cmp(&a.matter.date).then_with(|| a.path.cmp(&b.path)));
    Ok(posts)
}

/// Page layout derived from the configuration.
pub fn layout(ctx: &BuildContext) -> Layout {
    let config = ctx.config();
    let href: Vec<String> = config
        .styles
        .output
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Layout { site_title: config.site.title.clone(), stylesheet: format!("/{}", href.join("/")) }
}

fn write_page(out_dir: &Path, site_path: &str, html: &str) -> Result<(), SiteError> {
    let dir = out_dir.join(site_path.trim_start_matches('/'));
    fs::create_dir_all(&dir).map_err(|e| SiteError::io(&dir, e))?;
    let file = dir.join("index.html");
    fs::write(&file, html).map_err(|e| SiteError::io(&file, e))
}

/// Generate the whole site into the output directory.
pub fn generate(ctx: &BuildContext) -> Result<GenerateReport, SiteError> {
    let out_dir = ctx.out_dir();
    let site = &ctx.config().site;
    let layout = layout(ctx);
    let mut report = GenerateReport::default();

    let public = ctx.public_dir();
    if public.is_dir() {
        report.assets_copied = assets::copy_tree(&public, &out_dir)?;
    } else {
        tracing::warn!(dir = %public.display(), "public directory not found, skipping asset copy");
        fs::create_dir_all(&out_dir).map_err(|e| SiteError::io(&out_dir, e))?;
    }

    let posts = collect_posts(ctx, &ctx.posts_dir(), false)?;
    let drafts = collect_posts(ctx, &ctx.drafts_dir(), true)?;
    report.posts = posts.len();
    report.drafts = drafts.len();

    for post in posts.iter().chain(drafts.iter()) {
        tracing::debug!(path = %post.path, draft = post.draft, "rendering");
        let html = render::render_post(post, &layout).map_err(|e| SiteError::render(&post.path, e))?;
        write_page(&out_dir, &post.path, &html)?;
        report.pages_written += 1;
    }

    let blog = Listing {
        page_title: format!("{} - blog", site.title),
        description: site.description.clone(),
        posts: &posts,
    };
    let html = render::render_listing(&blog, &layout).map_err(|e| SiteError::render("/blog", e))?;
    write_page(&out_dir, "/blog", &html)?;

    let draft_listing = Listing {
        page_title: format!("{} - drafts", site.title),
        description: site.drafts_description.clone(),
        posts: &drafts,
    };
    let html = render::render_listing(&draft_listing, &layout)
        .map_err(|e| SiteError::render("/drafts", e))?;
    write_page(&out_dir, "/drafts", &html)?;
    report.pages_written += 2;

    tracing::info!("generated site: {}", report.summary());
    Ok(report)
}

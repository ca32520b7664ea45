//! HTML page rendering for posts and listings.
//!
//! Pages are askama templates under `templates/`; every interpolated value is
//! HTML-escaped except the markdown body, which is already HTML.

use super::post::Post;
use askama::Template;

/// Values shared by every page.
#[derive(Debug, Clone)]
pub struct Layout {
    pub site_title: String,
    /// Site-absolute stylesheet href, e.g. `/styles.css`
    pub stylesheet: String,
}

/// An index page of posts.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    pub page_title: String,
    pub description: String,
    pub posts: &'a [Post],
}

#[derive(Template)]
#[template(path = "post.html")]
struct PostPage<'a> {
    post: &'a Post,
    layout: &'a Layout,
}

#[derive(Template)]
#[template(path = "blog.html")]
struct ListingPage<'a> {
    listing: &'a Listing<'a>,
    layout: &'a Layout,
}

/// Render a single post page.
pub fn render_post(post: &Post, layout: &Layout) -> askama::Result<String> {
    PostPage { post, layout }.render()
}

/// Render an index page listing posts in the given order.
pub fn render_listing(listing: &Listing<'_>, layout: &Layout) -> askama::Result<String> {
    ListingPage { listing, layout }.render()
}

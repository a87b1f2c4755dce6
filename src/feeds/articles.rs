//! Article cards for the home page grid and the sidebar.
//!
//! Articles are sorted newest first once, then every `data-articles` container gets its own
//! tag filter and limit.

use serde::{Deserialize, Serialize};

use crate::feeds::html::esc;
use crate::foundation::error::{WavewalkError, WavewalkResult};

pub const DEFAULT_LIMIT: usize = 999;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub image: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleQuery {
    pub limit: usize,
    /// Keep articles sharing at least one of these tags.
    pub tags: Option<Vec<String>>,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            tags: None,
        }
    }
}

impl ArticleQuery {
    fn matches(&self, article: &Article) -> bool {
        match (&self.tags, &article.tags) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(want), Some(have)) => want.iter().any(|t| have.contains(t)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardStyle {
    /// Compact photo cards (`.sidebar-article-grid` containers).
    Sidebar,
    /// Main grid cards.
    Grid,
}

/// One `[data-articles]` container on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleContainer {
    pub style: CardStyle,
    pub query: ArticleQuery,
}

impl ArticleContainer {
    /// Build from the container's `class` list and its `data-limit` / `data-tags` values.
    pub fn from_attrs(class: &str, limit: Option<&str>, tags: Option<&str>) -> Self {
        let style = if class.split_whitespace().any(|c| c == "sidebar-article-grid") {
            CardStyle::Sidebar
        } else {
            CardStyle::Grid
        };
        let limit = match limit {
            None | Some("") => DEFAULT_LIMIT,
            Some(raw) => parse_limit(raw).unwrap_or_else(|| {
                tracing::warn!(limit = raw, "unparsable data-limit, container stays empty");
                0
            }),
        };
        Self {
            style,
            query: ArticleQuery {
                limit,
                tags: tags.map(parse_container_tags),
            },
        }
    }
}

/// Leading decimal digits, ignoring surrounding whitespace (`"12px"` is 12).
fn parse_limit(s: &str) -> Option<usize> {
    let s = s.trim();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Split a `data-tags` value on commas.
pub fn parse_container_tags(s: &str) -> Vec<String> {
    s.split(',').map(|t| t.trim().to_owned()).collect()
}

pub fn parse_articles(text: &str) -> WavewalkResult<Vec<Article>> {
    serde_json::from_str(text).map_err(|e| WavewalkError::feed(format!("parse articles: {e}")))
}

/// `YYYY-MM-DD` prefix of an ISO-8601 date, or `None` when it has none.
fn date_key(date: &str) -> Option<(u32, u32, u32)> {
    let b = date.trim().as_bytes();
    if b.len() < 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    let num = |r: std::ops::Range<usize>| -> Option<u32> {
        let part = b.get(r)?;
        if !part.iter().all(u8::is_ascii_digit) {
            return None;
        }
        std::str::from_utf8(part).ok()?.parse().ok()
    };
    let (y, m, d) = (num(0..4)?, num(5..7)?, num(8..10)?);
    if !(1..=12).contains(&m) || !(1..=31).contains(&d) {
        return None;
    }
    Some((y, m, d))
}

/// Newest first; articles with unparsable dates go last, keeping their relative order.
pub fn sort_articles(articles: &mut [Article]) {
    articles.sort_by(|a, b| date_key(&b.date).cmp(&date_key(&a.date)));
}

/// Sort `articles` in place, then return the ones matching `query`, up to its limit.
pub fn select_articles<'a>(articles: &'a mut [Article], query: &ArticleQuery) -> Vec<&'a Article> {
    sort_articles(articles);
    filter_sorted(articles, query)
}

fn filter_sorted<'a>(sorted: &'a [Article], query: &ArticleQuery) -> Vec<&'a Article> {
    sorted
        .iter()
        .filter(|a| query.matches(a))
        .take(query.limit)
        .collect()
}

pub fn render_card(article: &Article, style: CardStyle) -> String {
    let (card, thumb, meta, heading, desc) = match style {
        CardStyle::Sidebar => ("sidebar-card", "sidebar-thumb", "sidebar-meta", "h4", "sidebar-desc"),
        CardStyle::Grid => ("article-card", "article-thumb", "article-meta", "h3", "article-desc"),
    };
    format!(
        concat!(
            r#"<a href="{url}" class="{card}">"#,
            r#"<div class="{thumb}"><img src="{image}" alt=""></div>"#,
            r#"<div class="{meta}"><{h}>{title}</{h}>"#,
            r#"<p class="{desc}">{description}</p><time>{date}</time></div></a>"#,
        ),
        url = esc(&article.url),
        card = card,
        thumb = thumb,
        image = esc(&article.image),
        meta = meta,
        h = heading,
        title = esc(&article.title),
        desc = desc,
        description = esc(article.description.as_deref().unwrap_or("")),
        date = esc(&article.date),
    )
}

/// Render every container; the articles are sorted once up front.
pub fn render_containers(articles: &mut [Article], containers: &[ArticleContainer]) -> Vec<String> {
    sort_articles(articles);
    containers
        .iter()
        .map(|c| {
            filter_sorted(articles, &c.query)
                .into_iter()
                .map(|a| render_card(a, c.style))
                .collect::<String>()
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/feeds/articles.rs"]
mod tests;

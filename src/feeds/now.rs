//! "Now" sidebar: what is currently being listened to, read and played.
//!
//! The payload comes in two shapes, a legacy flat record per section or a `current` object
//! holding arrays. Both normalize to [`NowFeed`]. Fields of the wrong JSON type are ignored
//! rather than failing the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::feeds::html::{MountSet, encode_component, esc, form_urlencode};
use crate::foundation::error::{WavewalkError, WavewalkResult};

/// Characters of the offending body kept in error messages.
pub const PREVIEW_CHARS: usize = 300;

pub const FALLBACK_HTML: &str =
    r#"<div class="box">Could not load updates <span class="subtle">(path?)</span>.</div>"#;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NowEntry {
    #[serde(default, deserialize_with = "lenient_str")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_str")]
    pub album: Option<String>,
    #[serde(default, deserialize_with = "lenient_str")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "lenient_str")]
    pub author: Option<String>,
    #[serde(default, rename = "favoriteSong", deserialize_with = "lenient_str")]
    pub favorite_song: Option<String>,
    /// Kept as text; numbers are formatted as written.
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_str")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_str")]
    pub cover: Option<String>,
    #[serde(default, deserialize_with = "lenient_str")]
    pub url: Option<String>,
    /// Raw embed record; see [`Embed::from_value`].
    #[serde(default)]
    pub embed: Option<Value>,
}

fn lenient_str<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}

impl NowEntry {
    fn has_embed(&self) -> bool {
        self.embed.as_ref().is_some_and(truthy)
    }

    fn year_suffix(&self) -> String {
        self.year
            .as_deref()
            .map(|y| format!(" ({y})"))
            .unwrap_or_default()
    }
}

fn trimmed(s: &Option<String>) -> &str {
    s.as_deref().map_or("", str::trim)
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// JavaScript truthiness of a JSON value.
fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NowFeed {
    pub listening: Vec<NowEntry>,
    pub reading: Vec<NowEntry>,
    pub playing: Vec<NowEntry>,
}

impl NowFeed {
    pub fn is_empty(&self) -> bool {
        self.listening.is_empty() && self.reading.is_empty() && self.playing.is_empty()
    }

    /// Normalize either payload shape.
    pub fn from_value(data: &Value) -> Self {
        match data.get("current").filter(|c| truthy(c)) {
            Some(cur) => Self {
                listening: entries(cur.get("listening"), true),
                reading: entries(cur.get("reading"), true),
                playing: entries(cur.get("playing"), true),
            },
            None => Self {
                listening: entries(data.get("listening"), false),
                reading: entries(data.get("reading"), false),
                playing: entries(data.get("playing"), false),
            },
        }
    }
}

fn entries(v: Option<&Value>, arrays: bool) -> Vec<NowEntry> {
    let items: Vec<&Value> = match v {
        Some(Value::Array(list)) if arrays => list.iter().collect(),
        Some(v) if truthy(v) => vec![v],
        _ => Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|item| match NowEntry::deserialize(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed now entry");
                None
            }
        })
        .collect()
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

/// Parse a payload body. An HTML body (usually a 404 page) is reported with a preview.
pub fn parse_now_payload(text: &str) -> WavewalkResult<NowFeed> {
    if text.trim_start().starts_with('<') {
        return Err(WavewalkError::feed(format!(
            "expected JSON but got HTML: {}",
            preview(text)
        )));
    }
    let data: Value = serde_json::from_str(text).map_err(|e| {
        WavewalkError::feed(format!("invalid now JSON ({e}): {}", preview(text)))
    })?;
    Ok(NowFeed::from_value(&data))
}

/// Like [`parse_now_payload`], rejecting non-2xx responses first.
pub fn parse_now_response(status: u16, text: &str) -> WavewalkResult<NowFeed> {
    if !(200..300).contains(&status) {
        return Err(WavewalkError::feed(format!(
            "HTTP {status}: {}",
            preview(text)
        )));
    }
    parse_now_payload(text)
}

/// Supported embedded players.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Embed {
    Bandcamp {
        #[serde(rename = "trackId", deserialize_with = "string_or_number")]
        track_id: String,
        #[serde(default)]
        bgcol: Option<String>,
        #[serde(default)]
        linkcol: Option<String>,
    },
    Youtube {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
    },
    Soundcloud {
        url: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        auto_play: Option<bool>,
        #[serde(default)]
        hide_related: Option<bool>,
        #[serde(default)]
        show_comments: Option<bool>,
        #[serde(default)]
        show_user: Option<bool>,
        #[serde(default)]
        show_reposts: Option<bool>,
        #[serde(default)]
        show_teaser: Option<bool>,
        #[serde(default)]
        visual: Option<bool>,
    },
    /// Raw iframe markup pasted from the provider.
    BandcampIframe { html: String },
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

impl Embed {
    /// `None` for unknown types, missing required fields or empty ids.
    pub fn from_value(v: &Value) -> Option<Self> {
        let embed = Self::deserialize(v).ok()?;
        let required = match &embed {
            Self::Bandcamp { track_id, .. } => track_id,
            Self::Youtube { id } => id,
            Self::Soundcloud { url, .. } => url,
            Self::BandcampIframe { html } => html,
        };
        (!required.is_empty()).then_some(embed)
    }

    /// Player iframe markup, or `None` when nothing should be shown.
    pub fn to_html(&self) -> Option<String> {
        match self {
            Self::Bandcamp {
                track_id,
                bgcol,
                linkcol,
            } => {
                let bg = bgcol.as_deref().unwrap_or("ffffff").replacen('#', "", 1);
                let link = linkcol.as_deref().unwrap_or("333333").replacen('#', "", 1);
                let src = format!(
                    "https://bandcamp.com/EmbeddedPlayer/track={}/size=small/bgcol={bg}/linkcol={link}/transparent=true/",
                    encode_component(track_id)
                );
                Some(format!(
                    r#"<iframe class="now-embed now-embed--bc" src="{}" seamless loading="lazy" title="Bandcamp player" referrerpolicy="strict-origin-when-cross-origin" allow="autoplay" style="width:92%;border:0"></iframe>"#,
                    esc(&src)
                ))
            }
            Self::Youtube { id } => {
                let src = format!(
                    "https://www.youtube.com/embed/{}?modestbranding=1&rel=0&playsinline=1",
                    encode_component(id)
                );
                Some(format!(
                    r#"<iframe class="now-embed now-embed--yt" src="{}" loading="lazy" title="YouTube player" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share" referrerpolicy="strict-origin-when-cross-origin" allowfullscreen style="width:95%;height:60px;border:0"></iframe>"#,
                    esc(&src)
                ))
            }
            Self::Soundcloud {
                url,
                color,
                auto_play,
                hide_related,
                show_comments,
                show_user,
                show_reposts,
                show_teaser,
                visual,
            } => {
                let flag = |b: bool| if b { "true" } else { "false" };
                let query = form_urlencode([
                    ("url", url.as_str()),
                    ("color", color.as_deref().unwrap_or("#ff7700")),
                    ("auto_play", flag(auto_play.unwrap_or(false))),
                    ("hide_related", flag(hide_related.unwrap_or(false))),
                    ("show_comments", flag(show_comments.unwrap_or(true))),
                    ("show_user", flag(show_user.unwrap_or(true))),
                    ("show_reposts", flag(show_reposts.unwrap_or(false))),
                    ("show_teaser", flag(show_teaser.unwrap_or(true))),
                    ("visual", "false"),
                ]);
                let variant = if visual.unwrap_or(false) {
                    "now-embed--sc-visual"
                } else {
                    "now-embed--sc-compact"
                };
                Some(format!(
                    r#"<iframe class="now-embed {variant}" src="{}" loading="lazy" title="SoundCloud player" allow="autoplay" referrerpolicy="strict-origin-when-cross-origin" style="width:92%;height:80px;border:0"></iframe>"#,
                    esc(&format!("https://w.soundcloud.com/player/?{query}"))
                ))
            }
            Self::BandcampIframe { html } => first_iframe(html).map(str::to_owned),
        }
    }
}

/// First `<iframe ...>...</iframe>` in `html`, case-insensitive.
fn first_iframe(html: &str) -> Option<&str> {
    let lower = html.to_ascii_lowercase();
    let start = lower.find("<iframe")?;
    let rest = &lower[start..];
    let end = match rest.find("</iframe>") {
        Some(close) => close + "</iframe>".len(),
        None => rest.find('>')? + 1,
    };
    html.get(start..start + end)
}

fn embed_html(entry: &NowEntry) -> String {
    entry
        .embed
        .as_ref()
        .and_then(Embed::from_value)
        .and_then(|e| e.to_html())
        .unwrap_or_default()
}

fn cover_html(src: &str, alt: &str, href: Option<&str>) -> String {
    let img = format!(
        r#"<img src="{}" alt="{}" loading="lazy" decoding="async" class="now-img">"#,
        esc(src),
        esc(alt)
    );
    match href {
        None => img,
        Some(href) => format!(
            r#"<a class="now-link" href="{}" target="_blank" rel="noopener">{img}<span class="sr-only">{}</span></a>"#,
            esc(href),
            esc(alt)
        ),
    }
}

/// Card, description and player for one entry. `title` and `sub` are already escaped.
fn card_html(
    entry: &NowEntry,
    aria: &str,
    cover: Option<String>,
    title: &str,
    sub: Option<String>,
) -> String {
    let mut out = format!(r#"<figure class="now-card" aria-label="{}">"#, esc(aria));
    if let Some(cover) = cover {
        out.push_str(&cover);
    }
    out.push_str(r#"<figcaption class="now-overlay"><div class="meta">"#);
    out.push_str(&format!(r#"<p class="title">{title}</p>"#));
    if let Some(sub) = sub {
        out.push_str(&format!(r#"<p class="sub">{sub}</p>"#));
    }
    out.push_str("</div></figcaption></figure>");
    if let Some(desc) = non_empty(&entry.description) {
        out.push_str(&format!(r#"<p class="now-desc">{}</p>"#, esc(desc)));
    }
    out.push_str(&embed_html(entry));
    out
}

pub fn render_listening(entry: &NowEntry) -> String {
    let album = trimmed(&entry.album);
    let artist = trimmed(&entry.artist);
    let fav = trimmed(&entry.favorite_song);
    let year = entry.year.as_deref().map(|y| format!(" ({})", esc(y))).unwrap_or_default();

    let title = if album.is_empty() {
        format!("{}{year}", esc(artist))
    } else {
        format!("{}{year}", esc(album))
    };
    let sub = (!artist.is_empty()).then(|| {
        let mut sub = esc(artist);
        if !fav.is_empty() {
            sub.push_str(&format!(
                r#"<span class="fav-inline" aria-label="Favorite track"><span class="star" aria-hidden="true">★</span> {}</span>"#,
                esc(fav)
            ));
        }
        sub
    });

    let aria = if !album.is_empty() {
        format!("{album} — {artist}")
    } else if !fav.is_empty() {
        format!("{artist} — {fav}")
    } else {
        artist.to_owned()
    };
    let (label, alt) = if aria.is_empty() {
        ("Listening item", "cover")
    } else {
        (aria.as_str(), aria.as_str())
    };

    let cover = non_empty(&entry.cover).map(|c| cover_html(c, alt, non_empty(&entry.url)));
    card_html(entry, label, cover, &title, sub)
}

pub fn render_reading(entry: &NowEntry) -> String {
    let title = trimmed(&entry.title);
    let author = trimmed(&entry.author);
    let aria = format!("{title} — {author}");
    let cover = (!entry.has_embed())
        .then(|| non_empty(&entry.cover).map(|c| cover_html(c, &aria, non_empty(&entry.url))))
        .flatten();
    let heading = esc(&format!("{title}{}", entry.year_suffix()));
    let sub = (!author.is_empty()).then(|| esc(author));
    card_html(entry, &aria, cover, &heading, sub)
}

pub fn render_playing(entry: &NowEntry) -> String {
    let title = trimmed(&entry.title);
    let aria = format!("{title} cover");
    let cover = (!entry.has_embed())
        .then(|| non_empty(&entry.cover).map(|c| cover_html(c, &aria, non_empty(&entry.url))))
        .flatten();
    let heading = esc(&format!("{title}{}", entry.year_suffix()));
    card_html(entry, &aria, cover, &heading, None)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NowSection {
    Listening,
    Reading,
    Playing,
}

impl NowSection {
    pub const ALL: [Self; 3] = [Self::Listening, Self::Reading, Self::Playing];

    /// Id of the element the section renders into.
    pub fn mount_id(self) -> &'static str {
        match self {
            Self::Listening => "now-listening",
            Self::Reading => "now-reading",
            Self::Playing => "now-playing",
        }
    }

    fn entries(self, feed: &NowFeed) -> &[NowEntry] {
        match self {
            Self::Listening => &feed.listening,
            Self::Reading => &feed.reading,
            Self::Playing => &feed.playing,
        }
    }

    fn render(self, entry: &NowEntry) -> String {
        match self {
            Self::Listening => render_listening(entry),
            Self::Reading => render_reading(entry),
            Self::Playing => render_playing(entry),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedSection {
    pub section: NowSection,
    pub html: String,
}

/// Render every non-empty section whose mount point exists. Missing mounts are logged and
/// skipped.
pub fn render_now(feed: &NowFeed, mounts: &MountSet) -> Vec<RenderedSection> {
    NowSection::ALL
        .into_iter()
        .filter(|s| !s.entries(feed).is_empty())
        .filter_map(|section| {
            if let Err(err) = mounts.require(section.mount_id()) {
                tracing::warn!(error = %err, "now section has nowhere to render");
                return None;
            }
            let html = section
                .entries(feed)
                .iter()
                .map(|e| section.render(e))
                .collect();
            Some(RenderedSection { section, html })
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NowOutcome {
    Rendered(Vec<RenderedSection>),
    /// The payload could not be used; the box goes at the end of the sidebar.
    Fallback(String),
}

/// Parse and render, turning any payload error into the fallback box.
pub fn render_now_or_fallback(text: &str, mounts: &MountSet) -> NowOutcome {
    match parse_now_payload(text) {
        Ok(feed) => NowOutcome::Rendered(render_now(&feed, mounts)),
        Err(err) => {
            tracing::error!(error = %err, "failed to load now feed");
            NowOutcome::Fallback(FALLBACK_HTML.to_owned())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/feeds/now.rs"]
mod tests;

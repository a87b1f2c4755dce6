//! Escaping, URL encoding and mount-point bookkeeping shared by the feed renderers.

use std::collections::BTreeSet;

use crate::foundation::error::{WavewalkError, WavewalkResult};

/// Escape text for HTML element content and double-quoted attribute values.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a URL path component, leaving `A-Z a-z 0-9 - _ . ! ~ * ' ( )` as is.
pub fn encode_component(s: &str) -> String {
    encode_with(s, false, |b| {
        b.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&b)
    })
}

/// `application/x-www-form-urlencoded` query string from ordered pairs.
pub fn form_urlencode<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let enc = |s: &str| encode_with(s, true, |b| b.is_ascii_alphanumeric() || b"*-._".contains(&b));
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", enc(k), enc(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_with(s: &str, space_plus: bool, keep: impl Fn(u8) -> bool) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if keep(b) {
            out.push(char::from(b));
        } else if space_plus && b == b' ' {
            out.push('+');
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Element ids present on the page a fragment is rendered for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MountSet {
    ids: BTreeSet<String>,
}

impl MountSet {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn require(&self, id: &str) -> WavewalkResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(WavewalkError::missing_mount(format!("#{id}")))
        }
    }
}

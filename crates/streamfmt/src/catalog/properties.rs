//! Known properties per namespace.
//!
//! The catalog documents what a context supplier is expected to provide. It
//! is advisory: rendering accepts any property name, and names outside the
//! catalog are only reported by the linter.

use crate::types::Namespace;

/// A documented property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub description: &'static str,
}

const fn prop(name: &'static str, description: &'static str) -> PropertyInfo {
    PropertyInfo { name, description }
}

const STREAM: &[PropertyInfo] = &[
    prop("filename", "Full filename of the stream"),
    prop("title", "Title of the movie or TV show"),
    prop("year", "Release year"),
    prop("season", "Season number for TV shows"),
    prop("episode", "Episode number for TV shows"),
    prop("quality", "Quality tag (WEBDL, BluRay, etc.)"),
    prop("resolution", "Resolution (1080p, 4K, etc.)"),
    prop("size", "File size in bytes"),
    prop("visualTags", "Visual tags (HDR, DV, etc.)"),
    prop("audioTags", "Audio tags (Atmos, DTS, etc.)"),
    prop("languages", "Language codes"),
    prop("languageEmojis", "Language emoji flags"),
    prop("releaseGroup", "Release group name"),
    prop("encode", "Video encoding format"),
    prop("seeders", "Number of seeders for torrents"),
    prop("personal", "Whether the stream is from personal storage"),
    prop("proxied", "Whether the stream is proxied"),
];

const PROVIDER: &[PropertyInfo] = &[
    prop("id", "Provider ID (realdebrid, premiumize, etc.)"),
    prop("name", "Full provider name"),
    prop("shortName", "Short provider name"),
    prop("cached", "Whether the stream is cached on the provider"),
];

const ADDON: &[PropertyInfo] = &[prop("id", "Addon ID"), prop("name", "Addon name")];

/// The documented properties of a namespace, in catalog order.
pub fn properties(namespace: Namespace) -> &'static [PropertyInfo] {
    match namespace {
        Namespace::Stream => STREAM,
        Namespace::Provider => PROVIDER,
        Namespace::Addon => ADDON,
    }
}

/// Returns true if `name` is a documented property of `namespace`.
///
/// Property names are case-sensitive.
pub fn is_known_property(namespace: Namespace, name: &str) -> bool {
    properties(namespace).iter().any(|info| info.name == name)
}

/// Names of the documented properties of a namespace.
pub fn property_names(namespace: Namespace) -> Vec<&'static str> {
    properties(namespace).iter().map(|info| info.name).collect()
}

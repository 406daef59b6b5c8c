//! Built-in template snippets and complete formatter presets.

use crate::definition::FormatterDefinition;

/// A reusable template fragment for a single property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    pub id: &'static str,
    pub name: &'static str,
    pub template: &'static str,
    pub description: &'static str,
}

/// A complete formatter: templates for a stream's name and description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub name_template: &'static str,
    pub description_template: &'static str,
    pub description: &'static str,
}

impl Preset {
    /// The preset as a formatter definition.
    pub fn definition(&self) -> FormatterDefinition {
        FormatterDefinition::new(self.name_template, self.description_template)
    }
}

/// Zero-padded `S01` / `E01` style numbering for a stream property.
macro_rules! numbered {
    ($property:literal, $prefix:literal) => {
        concat!(
            "{stream.", $property, "::>=0[\"", $prefix, "\"||\"\"]}",
            "{stream.", $property, "::<=9[\"0\"||\"\"]}",
            "{stream.", $property, "::>0[\"{stream.", $property, "}\"||\"\"]}",
        )
    };
}

const DETAILS: &str = concat!(
    "{provider.cached::=true[\"✓ Cached\"||\"\"]} ",
    "{stream.size::size} | ",
    "{stream.visualTags::/^$|null/[\"\"||\"{stream.visualTags} \"]}",
    "{stream.audioTags::/^$|null/[\"\"||\"{stream.audioTags} \"]}",
    "{stream.languageEmojis::/^$|null/[\"\"||\"{stream.languageEmojis} \"]}",
    "{stream.releaseGroup::/^$|Unknown/[\"\"||\"- {stream.releaseGroup}\"]}",
);

/// Snippets for the commonly displayed properties.
pub const SNIPPETS: &[Snippet] = &[
    Snippet {
        id: "season",
        name: "Season Number (S01 format)",
        template: numbered!("season", "S"),
        description: "Formats season numbers as S01, S02, etc.",
    },
    Snippet {
        id: "episode",
        name: "Episode Number (E01 format)",
        template: numbered!("episode", "E"),
        description: "Formats episode numbers as E01, E02, etc.",
    },
    Snippet {
        id: "quality",
        name: "Quality Tag",
        template: r#"{stream.quality::/^$|Unknown/[""||" {stream.quality}"]}"#,
        description: "Adds quality tag if available (e.g., WEBDL, BluRay)",
    },
    Snippet {
        id: "resolution",
        name: "Resolution Tag",
        template: r#"{stream.resolution::/^$|Unknown/[""||" {stream.resolution}"]}"#,
        description: "Adds resolution if available (e.g., 1080p, 4K)",
    },
    Snippet {
        id: "size",
        name: "File Size",
        template: "{stream.size::size}",
        description: "Shows formatted file size (e.g., 2.5 GB)",
    },
    Snippet {
        id: "visualTags",
        name: "Visual Tags (HDR, DV)",
        template: r#"{stream.visualTags::/^$|null/[""||" {stream.visualTags}"]}"#,
        description: "Shows visual tags like HDR, Dolby Vision, etc.",
    },
    Snippet {
        id: "audioTags",
        name: "Audio Tags (Atmos, DTS)",
        template: r#"{stream.audioTags::/^$|null/[""||" {stream.audioTags}"]}"#,
        description: "Shows audio tags like Atmos, DTS, etc.",
    },
    Snippet {
        id: "languages",
        name: "Language Emojis",
        template: r#"{stream.languageEmojis::/^$|null/[""||" {stream.languageEmojis}"]}"#,
        description: "Shows language emojis for available audio tracks",
    },
    Snippet {
        id: "releaseGroup",
        name: "Release Group",
        template: r#"{stream.releaseGroup::/^$|Unknown/[""||" - {stream.releaseGroup}"]}"#,
        description: "Shows the release group name",
    },
    Snippet {
        id: "cached",
        name: "Cached Status",
        template: r#"{provider.cached::=true["✓ "||""]}"#,
        description: "Shows a checkmark if the stream is cached",
    },
];

/// Complete formatters for common layouts.
pub const PRESETS: &[Preset] = &[
    Preset {
        id: "tv-show",
        name: "TV Show Template",
        name_template: concat!(
            "{stream.title} ",
            numbered!("season", "S"),
            numbered!("episode", "E"),
            "{stream.quality::/^$|Unknown/[\"\"||\" {stream.quality}\"]}",
            "{stream.resolution::/^$|Unknown/[\"\"||\" {stream.resolution}\"]}",
        ),
        description_template: DETAILS,
        description: "Complete template for TV shows with all important information",
    },
    Preset {
        id: "movie",
        name: "Movie Template",
        name_template: concat!(
            "{stream.title} {stream.year::/^$|null/[\"\"||\"({stream.year})\"]} ",
            "{stream.quality::/^$|Unknown/[\"\"||\"{stream.quality} \"]}",
            "{stream.resolution::/^$|Unknown/[\"\"||\"{stream.resolution}\"]}",
        ),
        description_template: DETAILS,
        description: "Complete template for movies with all important information",
    },
    Preset {
        id: "minimalist",
        name: "Minimalist Template",
        name_template: concat!(
            "{stream.title} ",
            numbered!("season", "S"),
            numbered!("episode", "E"),
        ),
        description_template: concat!(
            "{stream.resolution::/^$|Unknown/[\"\"||\"{stream.resolution} \"]}",
            "{provider.cached::=true[\"✓\"||\"\"]} ",
            "{stream.size::size}",
        ),
        description: "Minimalist template with only essential information",
    },
];

/// Look up a snippet by id.
pub fn snippet(id: &str) -> Option<&'static Snippet> {
    SNIPPETS.iter().find(|snippet| snippet.id == id)
}

/// Look up a preset by id.
pub fn preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.id == id)
}

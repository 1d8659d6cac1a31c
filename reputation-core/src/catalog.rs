//! Fixed lookup tables for platforms, time ranges and languages.
//!
//! The tables are plain constants. A [`Catalog`] bundles them once at startup
//! and is handed to the view layer, which never mutates it.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    News,
    Youtube,
    Twitter,
    Reddit,
    Web,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::News,
        Platform::Youtube,
        Platform::Twitter,
        Platform::Reddit,
        Platform::Web,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Platform::News => "news",
            Platform::Youtube => "youtube",
            Platform::Twitter => "twitter",
            Platform::Reddit => "reddit",
            Platform::Web => "web",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::News => "News",
            Platform::Youtube => "YouTube",
            Platform::Twitter => "X / Twitter",
            Platform::Reddit => "Reddit",
            Platform::Web => "Web Mentions",
        }
    }

    /// Short guidance shown under the section title.
    pub fn hint(self) -> &'static str {
        match self {
            Platform::News => "e.g., Times of India, Economic Times, etc.",
            Platform::Youtube => "Sort by likes/comments to triage quickly.",
            Platform::Twitter => "Track virality and reply from your CRM.",
            Platform::Reddit => "Communities often surface detailed user feedback.",
            Platform::Web => "Blogs, forums, small news sites, etc.",
        }
    }

    pub fn empty_label(self) -> &'static str {
        match self {
            Platform::News => "No news yet",
            Platform::Youtube => "No videos yet",
            Platform::Twitter => "No tweets yet",
            Platform::Reddit => "No reddit posts yet",
            Platform::Web => "No web mentions yet",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "custom")]
    Custom,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Last24Hours,
        TimeRange::Last7Days,
        TimeRange::Last30Days,
        TimeRange::Custom,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TimeRange::Last24Hours => "24h",
            TimeRange::Last7Days => "7d",
            TimeRange::Last30Days => "30d",
            TimeRange::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Last24Hours => "Last 24h",
            TimeRange::Last7Days => "7 days",
            TimeRange::Last30Days => "30 days",
            TimeRange::Custom => "Custom",
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Last7Days
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Auto,
    En,
    Hi,
    Bn,
    Mr,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Auto,
        Language::En,
        Language::Hi,
        Language::Bn,
        Language::Mr,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::En => "en",
            Language::Hi => "hi",
            Language::Bn => "bn",
            Language::Mr => "mr",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Auto => "Auto",
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Bn => "Bengali",
            Language::Mr => "Marathi",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Auto
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-only option tables consumed by the view.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub platforms: Vec<Platform>,
    pub time_ranges: Vec<TimeRange>,
    pub languages: Vec<Language>,
}

impl Catalog {
    pub fn standard() -> Self {
        Self {
            platforms: Platform::ALL.to_vec(),
            time_ranges: TimeRange::ALL.to_vec(),
            languages: Language::ALL.to_vec(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_serialized_form() {
        for platform in Platform::ALL {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{}\"", platform.key()));
        }
        for range in TimeRange::ALL {
            let json = serde_json::to_string(&range).unwrap();
            assert_eq!(json, format!("\"{}\"", range.key()));
        }
        for language in Language::ALL {
            let json = serde_json::to_string(&language).unwrap();
            assert_eq!(json, format!("\"{}\"", language.key()));
        }
    }

    #[test]
    fn test_platform_order_is_iteration_order() {
        let mut sorted = Platform::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Platform::ALL.to_vec());
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.platforms.len(), 5);
        assert_eq!(catalog.time_ranges.len(), 4);
        assert_eq!(catalog.languages.len(), 5);
        assert_eq!(catalog.platforms[1].label(), "YouTube");
    }
}

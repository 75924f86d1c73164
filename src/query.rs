//! Image search query representation.

use serde::{Deserialize, Serialize};

/// Safe search level.
///
/// The values map to the endpoint's `p` parameter: `1` (on), `-1`
/// (moderate), `-2` (off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SafeSearch {
    /// Strict filtering.
    On,
    /// Moderate filtering.
    #[default]
    Moderate,
    /// No filtering.
    Off,
}

impl SafeSearch {
    /// Returns the endpoint's `p` parameter value.
    pub fn param(&self) -> &'static str {
        match self {
            SafeSearch::On => "1",
            SafeSearch::Moderate => "-1",
            SafeSearch::Off => "-2",
        }
    }
}

/// Time range filter for image results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLimit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeLimit {
    fn as_str(&self) -> &'static str {
        match self {
            TimeLimit::Day => "Day",
            TimeLimit::Week => "Week",
            TimeLimit::Month => "Month",
            TimeLimit::Year => "Year",
        }
    }
}

/// Image size filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    Wallpaper,
}

impl ImageSize {
    fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Small => "Small",
            ImageSize::Medium => "Medium",
            ImageSize::Large => "Large",
            ImageSize::Wallpaper => "Wallpaper",
        }
    }
}

/// Image type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageType {
    Photo,
    Clipart,
    Gif,
    Transparent,
    Line,
}

impl ImageType {
    fn as_str(&self) -> &'static str {
        match self {
            ImageType::Photo => "photo",
            ImageType::Clipart => "clipart",
            ImageType::Gif => "gif",
            ImageType::Transparent => "transparent",
            ImageType::Line => "line",
        }
    }
}

/// Image aspect/layout filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageLayout {
    Square,
    Tall,
    Wide,
}

impl ImageLayout {
    fn as_str(&self) -> &'static str {
        match self {
            ImageLayout::Square => "Square",
            ImageLayout::Tall => "Tall",
            ImageLayout::Wide => "Wide",
        }
    }
}

/// An image search query with all parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageQuery {
    /// The search keywords.
    pub keywords: String,
    /// Maximum number of results to yield. `None` means all available.
    pub max_results: Option<usize>,
    /// Region/locale (e.g., "us-en"). Defaults to "wt-wt" (no region).
    pub region: String,
    /// Safe search level.
    pub safesearch: SafeSearch,
    /// Time range filter.
    pub time_limit: Option<TimeLimit>,
    /// Image size filter.
    pub size: Option<ImageSize>,
    /// Image color filter (free-form, e.g. "Red", "Monochrome").
    pub color: Option<String>,
    /// Image type filter.
    pub image_type: Option<ImageType>,
    /// Image layout filter.
    pub layout: Option<ImageLayout>,
    /// Image license filter (endpoint license codes, e.g. "Public").
    pub license: Option<String>,
}

impl ImageQuery {
    /// Creates a new query with the given keywords.
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            max_results: None,
            region: "wt-wt".to_string(),
            safesearch: SafeSearch::Moderate,
            time_limit: None,
            size: None,
            color: None,
            image_type: None,
            layout: None,
            license: None,
        }
    }

    /// Caps the number of results yielded.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Sets the region/locale.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the safe search level.
    pub fn with_safesearch(mut self, level: SafeSearch) -> Self {
        self.safesearch = level;
        self
    }

    /// Sets the time range filter.
    pub fn with_time_limit(mut self, limit: TimeLimit) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the image size filter.
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the image color filter.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the image type filter.
    pub fn with_image_type(mut self, image_type: ImageType) -> Self {
        self.image_type = Some(image_type);
        self
    }

    /// Sets the image layout filter.
    pub fn with_layout(mut self, layout: ImageLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Sets the image license filter.
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Builds the endpoint's comma-separated `f` filter parameter.
    ///
    /// Unset filters are omitted; all filters unset yields an empty string.
    pub fn filter_param(&self) -> String {
        let parts = [
            self.time_limit.map(|t| format!("time:{}", t.as_str())),
            self.size.map(|s| format!("size:{}", s.as_str())),
            self.color.as_ref().map(|c| format!("color:{c}")),
            self.image_type.map(|t| format!("type:{}", t.as_str())),
            self.layout.map(|l| format!("layout:{}", l.as_str())),
            self.license.as_ref().map(|l| format!("license:{l}")),
        ];
        parts.into_iter().flatten().collect::<Vec<_>>().join(",")
    }
}

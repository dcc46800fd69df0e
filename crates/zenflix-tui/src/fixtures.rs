//! Hard-coded sample data for the Browse and Profiles pages.
//!
//! None of this comes from the catalog client.

/// Category that disables filtering.
pub const ALL_CATEGORY: &str = "All";

/// Browse categories.
pub const CATEGORIES: [&str; 8] = [
    "All",
    "Action",
    "Comedy",
    "Drama",
    "Horror",
    "Sci-Fi",
    "Romance",
    "Documentary",
];

/// Sample title shown on the Browse page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleTitle {
    /// Stable ID.
    pub id: u32,
    /// Title.
    pub title: &'static str,
    /// Release year.
    pub year: u16,
    /// Average rating out of ten.
    pub rating: f32,
    /// Categories this title belongs to.
    pub categories: &'static [&'static str],
}

/// Sample catalog.
#[rustfmt::skip]
pub const SAMPLE_TITLES: [SampleTitle; 16] = [
    SampleTitle { id: 1, title: "Midnight Protocol", year: 2024, rating: 8.1, categories: &["Action", "Sci-Fi"] },
    SampleTitle { id: 2, title: "The Last Orchard", year: 2023, rating: 7.4, categories: &["Drama"] },
    SampleTitle { id: 3, title: "Laugh Track", year: 2022, rating: 6.9, categories: &["Comedy"] },
    SampleTitle { id: 4, title: "Hollow Pines", year: 2024, rating: 7.2, categories: &["Horror"] },
    SampleTitle { id: 5, title: "Signal Lost", year: 2021, rating: 7.8, categories: &["Sci-Fi", "Drama"] },
    SampleTitle { id: 6, title: "Paris in Rain", year: 2020, rating: 7.0, categories: &["Romance", "Drama"] },
    SampleTitle { id: 7, title: "Deep Blue Planet", year: 2023, rating: 8.7, categories: &["Documentary"] },
    SampleTitle { id: 8, title: "Iron Circuit", year: 2022, rating: 6.8, categories: &["Action"] },
    SampleTitle { id: 9, title: "Wedding Crashers Club", year: 2024, rating: 6.5, categories: &["Comedy", "Romance"] },
    SampleTitle { id: 10, title: "The Cellar", year: 2019, rating: 6.3, categories: &["Horror"] },
    SampleTitle { id: 11, title: "Orbitfall", year: 2025, rating: 7.9, categories: &["Sci-Fi", "Action"] },
    SampleTitle { id: 12, title: "Streets of Gold", year: 2021, rating: 7.6, categories: &["Drama", "Action"] },
    SampleTitle { id: 13, title: "Wild Kingdoms", year: 2022, rating: 8.4, categories: &["Documentary"] },
    SampleTitle { id: 14, title: "Office Hours", year: 2023, rating: 7.1, categories: &["Comedy"] },
    SampleTitle { id: 15, title: "Letters to June", year: 2018, rating: 7.3, categories: &["Romance"] },
    SampleTitle { id: 16, title: "Night Shift", year: 2024, rating: 6.7, categories: &["Horror", "Drama"] },
];

/// Viewer profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// Stable ID.
    pub id: u32,
    /// Display name.
    pub name: &'static str,
    /// Restricted to family content.
    pub is_kids: bool,
}

/// Sample profiles.
#[rustfmt::skip]
pub const PROFILES: [Profile; 4] = [
    Profile { id: 1, name: "Alex", is_kids: false },
    Profile { id: 2, name: "Sam", is_kids: false },
    Profile { id: 3, name: "Jordan", is_kids: false },
    Profile { id: 4, name: "Kids", is_kids: true },
];

/// Long-form record for a sample title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleDetails {
    /// ID of the [`SampleTitle`] described.
    pub title_id: u32,
    /// Tagline.
    pub tagline: &'static str,
    /// Synopsis.
    pub description: &'static str,
    /// Director.
    pub director: &'static str,
    /// Runtime label.
    pub duration: &'static str,
    /// Certification.
    pub rating: &'static str,
    /// Leading cast.
    pub cast: &'static [&'static str],
}

/// Sample details records.
pub const SAMPLE_DETAILS: [SampleDetails; 2] = [
    SampleDetails {
        title_id: 1,
        tagline: "Every system has a backdoor.",
        description: "A disgraced security engineer has one night to stop a rogue AI from seizing the city's power grid.",
        director: "Mara Ellison",
        duration: "2h 11m",
        rating: "PG-13",
        cast: &["Dev Okafor", "Lena Marsh", "Tomas Reyes"],
    },
    SampleDetails {
        title_id: 7,
        tagline: "Seventy percent of the story.",
        description: "A journey through the planet's oceans, from sunlit reefs to the trenches no light has reached.",
        director: "Hugo Bell",
        duration: "1h 32m",
        rating: "PG",
        cast: &["Narrated by Ruth Adair"],
    },
];

/// Details record for a sample title, if one exists.
#[must_use]
pub fn sample_details(title_id: u32) -> Option<&'static SampleDetails> {
    SAMPLE_DETAILS.iter().find(|d| d.title_id == title_id)
}

/// Titles in `category`; everything for `"All"`.
#[must_use]
pub fn filter_by_category(category: &str) -> Vec<&'static SampleTitle> {
    SAMPLE_TITLES
        .iter()
        .filter(|t| category == ALL_CATEGORY || t.categories.contains(&category))
        .collect()
}

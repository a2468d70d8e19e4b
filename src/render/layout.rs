use std::{fmt, str::FromStr};

use crate::{
    error::RenderError,
    types::{Item, StatsSnapshot, TimeRange},
};

pub const ELLIPSIS: &str = "...";

/// Visual density and image strategy of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Large cards, Inter web font, remote image references, footer.
    Detailed,
    /// Smaller cards, system fonts, cover art embedded as base64.
    Compact,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Detailed => "detailed",
            Profile::Compact => "compact",
        }
    }

    pub fn metrics(&self) -> ProfileMetrics {
        match self {
            Profile::Detailed => ProfileMetrics {
                padding: 20,
                spacing: 15,
                title_band: 80,
                title_y: 45,
                subtitle_y: 65,
                badge_offset: 20,
                badge_radius: 15,
                image_inset: 10,
                image_top: 45,
                text_gap: 20,
                line_gap: 20,
            },
            Profile::Compact => ProfileMetrics {
                padding: 16,
                spacing: 12,
                title_band: 70,
                title_y: 40,
                subtitle_y: 58,
                badge_offset: 16,
                badge_radius: 12,
                image_inset: 8,
                image_top: 36,
                text_gap: 18,
                line_gap: 16,
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "detailed" => Ok(Profile::Detailed),
            "compact" => Ok(Profile::Compact),
            _ => Err(RenderError::UnknownProfile(s.to_string())),
        }
    }
}

/// Fixed spacing constants of a profile, in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileMetrics {
    pub padding: u32,
    pub spacing: u32,
    pub title_band: u32,
    pub title_y: u32,
    pub subtitle_y: u32,
    pub badge_offset: u32,
    pub badge_radius: u32,
    pub image_inset: u32,
    /// Distance from the card top to the image top.
    pub image_top: u32,
    /// Distance from the image bottom to the primary label baseline.
    pub text_gap: u32,
    /// Distance between the primary and secondary label baselines.
    pub line_gap: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Artists,
    Songs,
    Albums,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Artists, Section::Songs, Section::Albums];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Artists => "artists",
            Section::Songs => "songs",
            Section::Albums => "albums",
        }
    }

    /// Whether the section has a time-window dimension.
    pub fn has_time_range(&self) -> bool {
        !matches!(self, Section::Albums)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "artists" | "top_artists" => Ok(Section::Artists),
            "songs" | "tracks" | "top_songs" | "top_tracks" => Ok(Section::Songs),
            "albums" | "last_albums" | "saved_albums" => Ok(Section::Albums),
            _ => Err(RenderError::UnknownSection(s.to_string())),
        }
    }
}

/// Card grid of one section in one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub columns: u32,
    pub item_count: usize,
    pub card_width: u32,
    pub card_height: u32,
    pub max_chars: usize,
}

impl SectionLayout {
    pub fn for_section(profile: Profile, section: Section) -> Self {
        let (columns, item_count, card_width, card_height, max_chars) = match (profile, section) {
            (Profile::Detailed, Section::Albums) => (3, 3, 280, 350, 20),
            (Profile::Detailed, Section::Artists | Section::Songs) => (5, 5, 180, 280, 15),
            (Profile::Compact, Section::Albums) => (3, 3, 220, 290, 18),
            (Profile::Compact, Section::Artists | Section::Songs) => (5, 5, 150, 230, 12),
        };

        Self {
            columns,
            item_count,
            card_width,
            card_height,
            max_chars,
        }
    }

    /// Canvas `(width, height)` for this layout under `metrics`.
    pub fn canvas(&self, metrics: &ProfileMetrics) -> (u32, u32) {
        let width = self.columns * self.card_width
            + (self.columns - 1) * metrics.spacing
            + 2 * metrics.padding;
        let height = self.card_height + metrics.title_band + metrics.padding;
        (width, height)
    }

    /// Left edge of the card at `index`. All cards share one row.
    pub fn card_x(&self, metrics: &ProfileMetrics, index: usize) -> u32 {
        let col = index as u32 % self.columns;
        metrics.padding + col * (self.card_width + metrics.spacing)
    }

    pub fn image_size(&self, metrics: &ProfileMetrics) -> u32 {
        self.card_width - 2 * metrics.image_inset
    }
}

/// What to render: a section and, for artists and songs, a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    pub section: Section,
    pub time_range: Option<TimeRange>,
}

impl RenderRequest {
    /// Parses a request from its string form.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnknownSection`] for anything but `artists`, `songs`,
    /// `albums` (or their legacy names) and [`RenderError::UnknownTimeRange`]
    /// for an unparseable window.
    pub fn new(section: &str, time_range: Option<&str>) -> Result<Self, RenderError> {
        let section = section.parse::<Section>()?;
        let time_range = time_range.map(str::parse::<TimeRange>).transpose()?;
        Ok(Self {
            section,
            time_range,
        })
    }

    pub fn of(section: Section, time_range: Option<TimeRange>) -> Self {
        Self {
            section,
            time_range,
        }
    }

    /// The five requests that cover every section and collected window.
    pub fn all() -> Vec<RenderRequest> {
        vec![
            Self::of(Section::Artists, Some(TimeRange::ShortTerm)),
            Self::of(Section::Artists, Some(TimeRange::LongTerm)),
            Self::of(Section::Songs, Some(TimeRange::ShortTerm)),
            Self::of(Section::Songs, Some(TimeRange::LongTerm)),
            Self::of(Section::Albums, None),
        ]
    }

    /// The window whose data is shown. Only `short_term` selects the recent
    /// view; every other window falls back to the all-time view.
    pub fn window(&self) -> Option<TimeRange> {
        if !self.section.has_time_range() {
            return None;
        }
        match self.time_range {
            None | Some(TimeRange::ShortTerm) => Some(TimeRange::ShortTerm),
            Some(_) => Some(TimeRange::LongTerm),
        }
    }

    /// Title and subtitle of the document.
    pub fn labels(&self) -> (&'static str, &'static str) {
        let recent = self.window() == Some(TimeRange::ShortTerm);
        match (self.section, recent) {
            (Section::Artists, true) => ("My Recent Top Artists", "Last 4 weeks"),
            (Section::Artists, false) => ("My All-Time Top Artists", "All time favorites"),
            (Section::Songs, true) => ("My Recent Top Songs", "Last 4 weeks"),
            (Section::Songs, false) => ("My All-Time Top Songs", "All time favorites"),
            (Section::Albums, _) => ("My Recently Saved Albums", "Latest additions"),
        }
    }

    pub fn items<'a>(&self, snapshot: &'a StatsSnapshot) -> &'a [Item] {
        match (self.section, self.window()) {
            (Section::Artists, Some(window)) => snapshot.artists(window),
            (Section::Songs, Some(window)) => snapshot.songs(window),
            (Section::Albums, _) => snapshot.albums(),
            (_, None) => &[],
        }
    }

    /// Secondary card label: genre for artists, artist name otherwise.
    pub fn secondary_label<'a>(&self, item: &'a Item) -> &'a str {
        match self.section {
            Section::Artists => item.genre_or_default(),
            Section::Songs | Section::Albums => item.artist_or_default(),
        }
    }

    /// File name stem, e.g. `artists_short_term` or `albums`.
    pub fn file_stem(&self) -> String {
        match self.window() {
            Some(window) => format!("{}_{}", self.section, window),
            None => self.section.to_string(),
        }
    }
}

/// Shortens `label` to at most `max_chars` characters.
///
/// Labels longer than the limit keep their first `max_chars - 3` characters
/// followed by `...`; shorter labels are returned unchanged.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label
        .chars()
        .take(max_chars.saturating_sub(ELLIPSIS.len()))
        .collect();
    format!("{}{}", kept, ELLIPSIS)
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

//! # Render Module
//!
//! Turns a [`StatsSnapshot`] into an SVG infographic: a title band followed by
//! a single row of cards, one per item, each with a rank badge, artwork (or a
//! placeholder) and two labels.
//!
//! ## Profiles
//!
//! - [`Profile::Detailed`] - large cards, the Inter web font, artwork
//!   referenced by its remote URL and a small footer.
//! - [`Profile::Compact`] - smaller cards, system fonts only, artwork fetched
//!   through an [`ImageEmbedder`] and inlined as base64. Failed fetches turn
//!   into placeholder cards.
//!
//! Layout numbers live in [`SectionLayout::for_section`] and
//! [`Profile::metrics`]; the markup in `template`.
//!
//! ## Example
//!
//! ```rust
//! let renderer = Renderer::with_http(Profile::Compact)?;
//! let request = RenderRequest::new("songs", Some("long_term"))?;
//! let svg = renderer.render(&snapshot, &request).await;
//! ```

mod embed;
mod layout;
mod template;

pub use embed::{DEFAULT_CONTENT_TYPE, DEFAULT_TIMEOUT, HttpEmbedder, ImageEmbedder, data_uri};
pub use layout::{
    ELLIPSIS, Profile, ProfileMetrics, RenderRequest, Section, SectionLayout, escape_xml,
    truncate_label,
};

use crate::types::StatsSnapshot;

use template::CardFrame;

pub struct Renderer {
    profile: Profile,
    embedder: Box<dyn ImageEmbedder>,
}

impl Renderer {
    pub fn new(profile: Profile, embedder: impl ImageEmbedder + 'static) -> Self {
        Self {
            profile,
            embedder: Box::new(embedder),
        }
    }

    /// Renderer whose compact profile fetches artwork over HTTP.
    pub fn with_http(profile: Profile) -> Result<Self, reqwest::Error> {
        Ok(Self::new(profile, HttpEmbedder::new()?))
    }

    /// Renders one infographic.
    ///
    /// At most the section's display cap of items is drawn; fewer items give
    /// a sparser row. Ranks are 1-based in snapshot order. Apart from
    /// embedded image bytes, the output only depends on the snapshot, the
    /// request and the profile.
    pub async fn render(&self, snapshot: &StatsSnapshot, request: &RenderRequest) -> String {
        let metrics = self.profile.metrics();
        let layout = SectionLayout::for_section(self.profile, request.section);
        let (width, height) = layout.canvas(&metrics);
        let (title, subtitle) = request.labels();

        let mut out = String::new();
        template::header(&mut out, self.profile, width, height);
        template::titles(&mut out, &metrics, &escape_xml(title), &escape_xml(subtitle));

        for (index, item) in request
            .items(snapshot)
            .iter()
            .take(layout.item_count)
            .enumerate()
        {
            let frame = CardFrame {
                x: layout.card_x(&metrics, index),
                y: metrics.title_band,
                width: layout.card_width,
                height: layout.card_height,
                image_size: layout.image_size(&metrics),
            };

            template::card_open(&mut out, &metrics, &frame, index + 1);

            match self.image_href(item.image.as_deref()).await {
                Some(href) => template::card_image(&mut out, &metrics, &frame, &href),
                None => template::card_placeholder(
                    &mut out,
                    &metrics,
                    &frame,
                    self.profile == Profile::Detailed,
                ),
            }

            let primary = escape_xml(&truncate_label(&item.name, layout.max_chars));
            let secondary = escape_xml(&truncate_label(
                request.secondary_label(item),
                layout.max_chars,
            ));
            template::card_close(&mut out, &metrics, &frame, &primary, &secondary);
        }

        if self.profile == Profile::Detailed {
            template::footer(&mut out, &metrics, width, height);
        }
        template::close(&mut out);
        out
    }

    /// Renders every section and collected window, see [`RenderRequest::all`].
    pub async fn render_all(&self, snapshot: &StatsSnapshot) -> Vec<(RenderRequest, String)> {
        let mut documents = Vec::new();
        for request in RenderRequest::all() {
            let svg = self.render(snapshot, &request).await;
            documents.push((request, svg));
        }
        documents
    }

    async fn image_href(&self, url: Option<&str>) -> Option<String> {
        let url = url.filter(|u| !u.trim().is_empty())?;
        match self.profile {
            Profile::Detailed => Some(escape_xml(url)),
            Profile::Compact => self.embedder.embed(url).await.map(|uri| escape_xml(&uri)),
        }
    }
}

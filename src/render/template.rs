//! SVG fragments. Every function appends to a `String` buffer; callers pass
//! already truncated and escaped text.

use std::fmt::Write;

use super::layout::{Profile, ProfileMetrics};

const DETAILED_STYLE: &str = r#"
            @import url('https://fonts.googleapis.com/css2?family=Inter:wght@400;600;700&amp;display=swap');
            .title {
                fill: #1DB954;
                font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
                font-size: 32px;
                font-weight: 700;
                letter-spacing: -0.5px;
            }
            .subtitle {
                fill: #B3B3B3;
                font-family: 'Inter', sans-serif;
                font-size: 14px;
                font-weight: 400;
            }
            .card-title {
                fill: #FFFFFF;
                font-family: 'Inter', sans-serif;
                font-size: 14px;
                font-weight: 600;
            }
            .card-subtitle {
                fill: #B3B3B3;
                font-family: 'Inter', sans-serif;
                font-size: 12px;
                font-weight: 400;
            }
            .rank {
                fill: #1DB954;
                font-family: 'Inter', sans-serif;
                font-size: 18px;
                font-weight: 700;
            }
            .card {
                transition: transform 0.2s;
            }"#;

// No external resources, so the document renders the same when inlined or
// opened offline.
const COMPACT_STYLE: &str = r#"
            .title {
                fill: #1DB954;
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
                font-size: 26px;
                font-weight: 700;
            }
            .subtitle {
                fill: #B3B3B3;
                font-family: Helvetica, Arial, sans-serif;
                font-size: 12px;
            }
            .card-title {
                fill: #FFFFFF;
                font-family: Helvetica, Arial, sans-serif;
                font-size: 12px;
                font-weight: 600;
            }
            .card-subtitle {
                fill: #B3B3B3;
                font-family: Helvetica, Arial, sans-serif;
                font-size: 11px;
            }
            .rank {
                fill: #121212;
                font-family: Helvetica, Arial, sans-serif;
                font-size: 14px;
                font-weight: 700;
            }"#;

const DEFS: &str = r#"
        <linearGradient id="bgGradient" x1="0%" y1="0%" x2="0%" y2="100%">
            <stop offset="0%" style="stop-color:#191414;stop-opacity:1" />
            <stop offset="100%" style="stop-color:#121212;stop-opacity:1" />
        </linearGradient>
        <filter id="cardShadow" x="-50%" y="-50%" width="200%" height="200%">
            <feGaussianBlur in="SourceAlpha" stdDeviation="3"/>
            <feOffset dx="0" dy="4" result="offsetblur"/>
            <feComponentTransfer>
                <feFuncA type="linear" slope="0.3"/>
            </feComponentTransfer>
            <feMerge>
                <feMergeNode/>
                <feMergeNode in="SourceGraphic"/>
            </feMerge>
        </filter>
        <clipPath id="roundedImage">
            <rect width="100%" height="100%" rx="8" ry="8"/>
        </clipPath>"#;

pub fn header(out: &mut String, profile: Profile, width: u32, height: u32) {
    let style = match profile {
        Profile::Detailed => DETAILED_STYLE,
        Profile::Compact => COMPACT_STYLE,
    };

    let _ = write!(
        out,
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
    <defs>
        <style>{style}
        </style>{defs}
    </defs>
    <rect width="{w}" height="{h}" fill="url(#bgGradient)"/>
"#,
        w = width,
        h = height,
        style = style,
        defs = DEFS,
    );
}

pub fn titles(out: &mut String, metrics: &ProfileMetrics, title: &str, subtitle: &str) {
    let _ = write!(
        out,
        r#"    <text x="{x}" y="{ty}" class="title">{title}</text>
    <text x="{x}" y="{sy}" class="subtitle">{subtitle}</text>
"#,
        x = metrics.padding,
        ty = metrics.title_y,
        sy = metrics.subtitle_y,
    );
}

/// Geometry of one card, resolved by the renderer.
pub struct CardFrame {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub image_size: u32,
}

impl CardFrame {
    fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }
}

pub fn card_open(out: &mut String, metrics: &ProfileMetrics, frame: &CardFrame, rank: usize) {
    let bx = frame.x + metrics.badge_offset;
    let by = frame.y + metrics.badge_offset;
    let _ = write!(
        out,
        r##"    <g class="card" filter="url(#cardShadow)">
        <rect x="{x}" y="{y}" width="{w}" height="{h}" fill="#282828" rx="12" ry="12"/>
        <circle cx="{bx}" cy="{by}" r="{r}" fill="#1DB954"/>
        <text x="{bx}" y="{ty}" class="rank" text-anchor="middle">{rank}</text>
"##,
        x = frame.x,
        y = frame.y,
        w = frame.width,
        h = frame.height,
        r = metrics.badge_radius,
        ty = by + metrics.badge_radius * 2 / 5,
    );
}

/// `href` is either a remote URL (escaped) or a `data:` URI.
pub fn card_image(out: &mut String, metrics: &ProfileMetrics, frame: &CardFrame, href: &str) {
    let _ = write!(
        out,
        r#"        <g clip-path="url(#roundedImage)">
            <image x="{x}" y="{y}" width="{s}" height="{s}" href="{href}" preserveAspectRatio="xMidYMid slice"/>
        </g>
"#,
        x = frame.x + metrics.image_inset,
        y = frame.y + metrics.image_top,
        s = frame.image_size,
    );
}

pub fn card_placeholder(
    out: &mut String,
    metrics: &ProfileMetrics,
    frame: &CardFrame,
    with_label: bool,
) {
    let y = frame.y + metrics.image_top;
    let _ = write!(
        out,
        r##"        <rect class="placeholder" x="{x}" y="{y}" width="{s}" height="{s}" fill="#404040" rx="8" ry="8"/>
"##,
        x = frame.x + metrics.image_inset,
        s = frame.image_size,
    );
    if with_label {
        let _ = write!(
            out,
            r#"        <text x="{cx}" y="{cy}" class="card-subtitle" text-anchor="middle">No Image</text>
"#,
            cx = frame.center_x(),
            cy = y + frame.image_size / 2,
        );
    }
}

pub fn card_close(
    out: &mut String,
    metrics: &ProfileMetrics,
    frame: &CardFrame,
    primary: &str,
    secondary: &str,
) {
    let text_y = frame.y + metrics.image_top + frame.image_size + metrics.text_gap;
    let _ = write!(
        out,
        r#"        <text x="{cx}" y="{ty}" class="card-title" text-anchor="middle">{primary}</text>
        <text x="{cx}" y="{sy}" class="card-subtitle" text-anchor="middle">{secondary}</text>
    </g>
"#,
        cx = frame.center_x(),
        ty = text_y,
        sy = text_y + metrics.line_gap,
    );
}

pub fn footer(out: &mut String, metrics: &ProfileMetrics, width: u32, height: u32) {
    let _ = write!(
        out,
        r#"    <text x="{x}" y="{y}" class="subtitle" text-anchor="end" opacity="0.5">Generated by {name}</text>
"#,
        x = width - metrics.padding,
        y = height - 10,
        name = env!("CARGO_PKG_NAME"),
    );
}

pub fn close(out: &mut String) {
    out.push_str("</svg>\n");
}

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Glow,
    Classic,
}

const GLOW: [&str; 11] = [
    "rgb(239, 68, 68)",   // red
    "rgb(34, 197, 94)",   // green
    "rgb(59, 130, 246)",  // blue
    "rgb(249, 115, 22)",  // orange
    "rgb(168, 85, 247)",  // purple
    "rgb(236, 72, 153)",  // pink
    "rgb(14, 165, 233)",  // light blue
    "rgb(251, 191, 36)",  // yellow
    "rgb(139, 92, 246)",  // indigo
    "rgb(248, 113, 113)", // light red
    "rgb(16, 185, 129)",  // teal
];

const CLASSIC: [&str; 11] = [
    "rgb(99, 102, 241)",
    "rgb(168, 85, 247)",
    "rgb(236, 72, 153)",
    "rgb(14, 165, 233)",
    "rgb(34, 197, 94)",
    "rgb(245, 158, 11)",
    "rgb(239, 68, 68)",
    "rgb(59, 130, 246)",
    "rgb(16, 185, 129)",
    "rgb(249, 115, 22)",
    "rgb(139, 92, 246)",
];

impl Palette {
    pub fn colors(self) -> &'static [&'static str] {
        match self {
            Palette::Glow => &GLOW,
            Palette::Classic => &CLASSIC,
        }
    }

    /// Colors repeat once the rows outnumber them.
    pub fn color(self, row: usize) -> &'static str {
        let colors = self.colors();
        colors[row % colors.len()]
    }
}

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)\s*$"#)
        .expect("rgb regex is valid")
});

/// Parse an `rgb(r, g, b)` token for terminal output.
pub fn parse_rgb(token: &str) -> Option<(u8, u8, u8)> {
    let caps = RGB_RE.captures(token)?;
    Some((
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

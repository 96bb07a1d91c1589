//! Plain terminal rendering: one line per row, bar drawn in a fixed-width track.

use colored::Colorize;
use std::fmt::Write;

use crate::engine::{RowFrame, TRACK_PERCENT};
use crate::model::{TableView, parse_rgb};

const NAME_WIDTH: usize = 24;
const NUM_WIDTH: usize = 11;

pub struct TextOptions {
    /// Track width in terminal cells.
    pub width: usize,
    /// Emit 24-bit ANSI colors. `colored` still drops them when its
    /// global override (set from `--no-color`) or tty detection says so.
    pub color: bool,
}

/// Render the table with each bar at its published position.
/// Rows whose frame is `None` (torn down) get an empty track.
pub fn render_text_table(
    table: &TableView,
    frames: &[Option<RowFrame>],
    opts: &TextOptions,
) -> String {
    let width = opts.width.max(10);
    let mut out = String::new();

    let _ = writeln!(out, "{}", table.title);
    let _ = writeln!(out, "{}", table.legend);
    let _ = writeln!(
        out,
        "{:<name$} {:>num$} {:>num$}  {}",
        "Operation",
        "Throughput",
        "Latency",
        "Visualization",
        name = NAME_WIDTH,
        num = NUM_WIDTH
    );
    let _ = writeln!(out, "{}", "-".repeat(NAME_WIDTH + 2 * NUM_WIDTH + 4 + width + 2));

    for (row, frame) in table.rows.iter().zip(frames) {
        let track = match frame {
            Some(frame) => draw_track(frame, width),
            None => " ".repeat(width),
        };
        let track = match (opts.color, parse_rgb(&row.color)) {
            (true, Some((r, g, b))) => track.truecolor(r, g, b).to_string(),
            _ => track,
        };
        let _ = writeln!(
            out,
            "{:<name$} {:>num$} {:>num$}  |{}|",
            truncate(&row.name, NAME_WIDTH),
            row.throughput_label,
            row.latency_label,
            track,
            name = NAME_WIDTH,
            num = NUM_WIDTH
        );
    }
    out
}

/// Map `[position, position + length]` in track percent onto `width` cells.
fn draw_track(frame: &RowFrame, width: usize) -> String {
    let cells = width as f64;
    let start = (frame.bar.position_percent / TRACK_PERCENT * cells).round() as usize;
    let len = (frame.bar.visual_length_percent / TRACK_PERCENT * cells)
        .round()
        .max(1.0) as usize;
    let start = start.min(width.saturating_sub(len));
    let end = (start + len).min(width);

    let head = if frame.bar.direction_sign > 0 { '▶' } else { '◀' };
    (0..width)
        .map(|i| {
            if i < start || i >= end {
                ' '
            } else if (frame.bar.direction_sign > 0 && i == end - 1)
                || (frame.bar.direction_sign < 0 && i == start)
            {
                head
            } else {
                '█'
            }
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_dataset;
    use crate::engine::{BarSnapshot, Direction, EffectModel, EngineProfile, TableAnimation};
    use crate::model::build_table_view;
    use pretty_assertions::assert_eq;

    fn frame(position: f64, length: f64, sign: i8) -> RowFrame {
        let direction = if sign > 0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        RowFrame {
            bar: BarSnapshot {
                position_percent: position,
                direction_sign: sign,
                visual_length_percent: length,
            },
            effects: EffectModel::Stretch.effects(1.0, length, direction),
        }
    }

    #[test]
    fn draws_bar_at_position() {
        assert_eq!(draw_track(&frame(0.0, 20.0, 1), 10), "█▶        ");
        assert_eq!(draw_track(&frame(80.0, 20.0, -1), 10), "        ◀█");
        assert_eq!(draw_track(&frame(50.0, 30.0, 1), 10), "     ██▶  ");
    }

    #[test]
    fn bar_never_spills_past_the_track() {
        let track = draw_track(&frame(100.0, 40.0, 1), 20);
        assert_eq!(track.chars().count(), 20);
        assert!(track.ends_with('▶'));
    }

    #[test]
    fn renders_every_row() {
        let profile = EngineProfile::glow();
        let view = build_table_view(&sample_dataset().unwrap(), &profile);
        let mut animation = TableAnimation::start(&view.params(), &profile, 0.0);
        animation.frame(500.0);
        animation.remove_row(0);

        let text = render_text_table(
            &view,
            &animation.frames(),
            &TextOptions {
                width: 40,
                color: false,
            },
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4 + view.rows.len());
        assert!(lines[4].starts_with("CPU L1 Cache Access"));
        assert!(lines[4].ends_with(&format!("|{}|", " ".repeat(40))));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn color_uses_row_rgb() {
        // Test output is not a tty; force colours on.
        colored::control::set_override(true);
        let profile = EngineProfile::glow();
        let view = build_table_view(&sample_dataset().unwrap(), &profile);
        let frames = vec![Some(frame(0.0, 5.0, 1)); view.rows.len()];
        let opts = TextOptions {
            width: 20,
            color: true,
        };
        let text = render_text_table(&view, &frames, &opts);
        assert!(text.contains("\x1b[38;2;239;68;68m"));
        assert!(text.contains("\x1b[0m"));
    }
}

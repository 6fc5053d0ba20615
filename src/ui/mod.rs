mod theme;

use crate::app::{AppModel, StatusKind, Viewport};
use crate::domain::Display;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use theme::Emphasis;
use unicode_width::UnicodeWidthStr;

const TITLE_LINES: [&str; 3] = [
    "╔═════════════════════════════════════════════╗",
    "║         Display Resolution Switcher         ║",
    "╚═════════════════════════════════════════════╝",
];
const CONTROLS: &str = "←→ Display | ↑↓ Mode | PgUp/PgDn Fast | Enter Apply | Q Quit";
const CONTROLS_COMPACT: &str = "←→ ↑↓ PgUp/Dn Enter Q";
const LIST_INDENT: u16 = 2;
const RIGHT_MARGIN: usize = 2;

/// Positioned text writer over one frame area.
///
/// Rows at or past the bottom of the area are dropped and text running past the right edge is
/// cut with an ellipsis, so drawing never fails on a small terminal.
struct Canvas<'a, 'f> {
    frame: &'a mut Frame<'f>,
    area: Rect,
}

impl Canvas<'_, '_> {
    fn height(&self) -> usize {
        usize::from(self.area.height)
    }

    fn width(&self) -> usize {
        usize::from(self.area.width)
    }

    fn put(&mut self, row: usize, col: u16, text: &str, emphasis: Emphasis) {
        if row >= self.height() || col >= self.area.width {
            return;
        }
        let available = usize::from(self.area.width - col).saturating_sub(RIGHT_MARGIN);
        let text = truncate_end(text, available);
        if text.is_empty() {
            return;
        }
        let rect = Rect {
            x: self.area.x + col,
            y: self.area.y + row as u16,
            width: self.area.width - col,
            height: 1,
        };
        self.frame.render_widget(
            Paragraph::new(Span::styled(text, emphasis.style())),
            rect,
        );
    }
}

pub fn render(frame: &mut Frame, model: &AppModel) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let mut canvas = Canvas { frame, area };
    let height = canvas.height();
    let width = canvas.width();
    let mut row = 0usize;

    for line in TITLE_LINES {
        let col = width.saturating_sub(UnicodeWidthStr::width(line)) / 2;
        canvas.put(row, col as u16, line, Emphasis::Title);
        row += 1;
    }
    row += 1;

    row = render_summary(&mut canvas, model, row);
    row += 1;

    let list_limit = height.saturating_sub(3);
    row = render_displays(&mut canvas, model, row, list_limit);
    row += 1;
    render_modes(&mut canvas, model, row, list_limit);

    if height >= 2 {
        let controls = if UnicodeWidthStr::width(CONTROLS) > width.saturating_sub(RIGHT_MARGIN) {
            CONTROLS_COMPACT
        } else {
            CONTROLS
        };
        canvas.put(height - 2, 0, controls, Emphasis::Normal);
    }

    if let Some(status) = &model.status {
        let emphasis = match status.kind {
            StatusKind::Success => Emphasis::Success,
            StatusKind::Error => Emphasis::Error,
        };
        canvas.put(height - 1, 0, &status.text, emphasis);
    }
}

fn render_summary(canvas: &mut Canvas, model: &AppModel, mut row: usize) -> usize {
    let limit = canvas.height().saturating_sub(1);
    if row < limit {
        canvas.put(row, 0, "Current:", Emphasis::Normal);
        row += 1;
    }

    for display in model.displays.iter().take(crate::app::SUMMARY_DISPLAY_LIMIT) {
        if row >= limit {
            break;
        }
        canvas.put(row, 0, &summary_line(display), Emphasis::Normal);
        row += 1;
    }

    let hidden = model
        .displays
        .len()
        .saturating_sub(crate::app::SUMMARY_DISPLAY_LIMIT);
    if hidden > 0 && row < limit {
        canvas.put(row, 0, &format!("  + {hidden} more"), Emphasis::Normal);
        row += 1;
    }
    row
}

fn summary_line(display: &Display) -> String {
    let primary = if display.is_primary() { " [PRI]" } else { "" };
    format!(
        "  {}{primary}: {}",
        display.short_name(),
        display.active_mode_label()
    )
}

fn render_displays(canvas: &mut Canvas, model: &AppModel, mut row: usize, limit: usize) -> usize {
    if row < limit {
        canvas.put(row, 0, "Displays (←→):", Emphasis::Heading);
        row += 1;
    }

    let viewport = &model.display_viewport;
    let total = model.displays.len();
    render_list(canvas, viewport, total, row, limit, |index, selected| {
        let display = &model.displays[index];
        let prefix = if selected { "► " } else { "  " };
        let emphasis = if selected {
            Emphasis::Selected
        } else {
            Emphasis::Normal
        };
        (format!("{prefix}{}", display.short_name()), emphasis)
    })
}

fn render_modes(canvas: &mut Canvas, model: &AppModel, mut row: usize, limit: usize) -> usize {
    let Some(display) = model.current_display() else {
        return row;
    };

    if row < limit {
        let title = format!("Modes for {} (↑↓):", display.short_name());
        let title = if UnicodeWidthStr::width(title.as_str())
            > canvas.width().saturating_sub(RIGHT_MARGIN)
        {
            "Modes (↑↓):".to_string()
        } else {
            title
        };
        canvas.put(row, 0, &title, Emphasis::Heading);
        row += 1;
    }

    if display.modes.is_empty() {
        if row < limit {
            canvas.put(row, LIST_INDENT, "No modes reported.", Emphasis::Hint);
            row += 1;
        }
        return row;
    }

    let Some(viewport) = model.current_mode_viewport() else {
        return row;
    };
    render_list(canvas, viewport, display.modes.len(), row, limit, |index, selected| {
        let mode = &display.modes[index];
        let is_current = display.current_mode == Some(mode.ordinal);
        let prefix = if selected { "► " } else { "  " };
        let suffix = if is_current { " [CUR]" } else { "" };
        let emphasis = match (selected, is_current) {
            (true, _) => Emphasis::Selected,
            (false, true) => Emphasis::Current,
            (false, false) => Emphasis::Normal,
        };
        (
            format!("{prefix}[{:>3}] {mode}{suffix}", mode.ordinal),
            emphasis,
        )
    })
}

/// Draws the visible slice of a list with scroll hints, stopping before `limit`.
fn render_list(
    canvas: &mut Canvas,
    viewport: &Viewport,
    total: usize,
    mut row: usize,
    limit: usize,
    item: impl Fn(usize, bool) -> (String, Emphasis),
) -> usize {
    if viewport.has_scroll_up() && row < limit {
        canvas.put(row, LIST_INDENT, "↑ more ↑", Emphasis::ScrollHint);
        row += 1;
    }

    let (start, end) = viewport.visible_range(total);
    for index in start..end {
        if row >= limit {
            break;
        }
        let (text, emphasis) = item(index, index == viewport.current_index());
        canvas.put(row, LIST_INDENT, &text, emphasis);
        row += 1;
    }

    if viewport.has_scroll_down(total) && row < limit {
        canvas.put(row, LIST_INDENT, "↓ more ↓", Emphasis::ScrollHint);
        row += 1;
    }
    row
}

fn truncate_end(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let ellipsis = "…";
    let available = max_width.saturating_sub(UnicodeWidthStr::width(ellipsis));
    let mut out = String::new();
    for ch in text.chars() {
        let next = format!("{out}{ch}");
        if UnicodeWidthStr::width(next.as_str()) > available {
            break;
        }
        out.push(ch);
    }
    out.push_str(ellipsis);
    out
}

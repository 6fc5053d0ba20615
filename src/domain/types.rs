use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Mode {
    pub ordinal: u32,
    pub width: u32,
    pub height: u32,
    pub hertz: u32,
    pub color_depth: u32,
    pub hidpi: bool,
}

impl Mode {
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.hidpi { " (HiDPI)" } else { "" };
        write!(
            f,
            "{}x{}{suffix} @{}Hz",
            self.width, self.height, self.hertz
        )
    }
}

/// Presentation order for a display's modes: HiDPI first, then widest, then fastest.
pub fn compare_modes(a: &Mode, b: &Mode) -> Ordering {
    b.hidpi
        .cmp(&a.hidpi)
        .then_with(|| b.width.cmp(&a.width))
        .then_with(|| b.hertz.cmp(&a.hertz))
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Display {
    pub persistent_id: String,
    pub contextual_id: String,
    pub serial_id: String,
    pub display_type: String,
    pub current_resolution: String,
    pub current_hertz: u32,
    pub origin: (i32, i32),
    pub current_mode: Option<u32>,
    pub modes: Vec<Mode>,
}

impl Display {
    pub fn short_name(&self) -> String {
        format!("{} ({})", self.display_type, self.contextual_id)
    }

    pub fn is_primary(&self) -> bool {
        self.origin == (0, 0)
    }

    pub fn active_mode(&self) -> Option<&Mode> {
        let ordinal = self.current_mode?;
        self.modes.iter().find(|mode| mode.ordinal == ordinal)
    }

    pub fn active_mode_label(&self) -> String {
        self.active_mode()
            .map(|mode| mode.label())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn sort_modes(&mut self) {
        self.modes.sort_by(compare_modes);
    }

    /// Records a mode the tool confirmed as applied.
    pub fn mark_applied(&mut self, mode: &Mode) {
        self.current_mode = Some(mode.ordinal);
        self.current_resolution = mode.resolution();
        self.current_hertz = mode.hertz;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(ordinal: u32, width: u32, height: u32, hertz: u32, hidpi: bool) -> Mode {
        Mode {
            ordinal,
            width,
            height,
            hertz,
            color_depth: 8,
            hidpi,
        }
    }

    #[test]
    fn mode_label_marks_hidpi() {
        assert_eq!(mode(1, 1920, 1080, 60, false).label(), "1920x1080 @60Hz");
        assert_eq!(mode(2, 1280, 720, 60, true).label(), "1280x720 (HiDPI) @60Hz");
    }

    #[test]
    fn compare_orders_hidpi_then_width_then_hertz() {
        let mut modes = vec![
            mode(1, 1920, 1080, 60, false),
            mode(2, 1920, 1080, 120, false),
            mode(3, 1280, 720, 60, true),
            mode(4, 2560, 1440, 60, false),
        ];
        modes.sort_by(compare_modes);
        let ordinals: Vec<u32> = modes.iter().map(|mode| mode.ordinal).collect();
        assert_eq!(ordinals, vec![3, 4, 2, 1]);
    }

    #[test]
    fn unknown_active_mode_renders_unknown() {
        let display = Display {
            persistent_id: "P".to_string(),
            contextual_id: "1".to_string(),
            serial_id: "s".to_string(),
            display_type: "MacBook built in screen".to_string(),
            current_resolution: "1512x982".to_string(),
            current_hertz: 120,
            origin: (0, 0),
            current_mode: Some(99),
            modes: vec![mode(1, 1920, 1080, 60, false)],
        };
        assert_eq!(display.active_mode_label(), "Unknown");
        assert!(display.is_primary());
        assert_eq!(display.short_name(), "MacBook built in screen (1)");
    }
}

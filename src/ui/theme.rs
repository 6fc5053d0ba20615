use ratatui::style::{Color, Modifier, Style};

// Small palette in the spirit of a dark terminal: neutral text, one accent, two semantic colors.
pub const FG: Color = Color::Rgb(229, 231, 235);
pub const MUTED: Color = Color::Rgb(156, 163, 175);
pub const DIM: Color = Color::Rgb(107, 114, 128);

pub const HEADER: Color = Color::Rgb(103, 232, 249);
pub const ACCENT: Color = Color::Rgb(255, 159, 26);

pub const SUCCESS: Color = Color::Rgb(134, 239, 172);
pub const ERROR: Color = Color::Rgb(248, 113, 113);

/// Emphasis tag attached to every piece of positioned text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Emphasis {
    Normal,
    Heading,
    Title,
    Selected,
    Current,
    ScrollHint,
    Hint,
    Success,
    Error,
}

impl Emphasis {
    pub fn style(self) -> Style {
        match self {
            Self::Normal => Style::default().fg(FG),
            Self::Heading => Style::default().fg(FG).add_modifier(Modifier::BOLD),
            Self::Title => Style::default().fg(HEADER),
            Self::Selected => Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD),
            Self::Current => Style::default().fg(ACCENT),
            Self::ScrollHint => Style::default().fg(MUTED),
            Self::Hint => Style::default().fg(DIM),
            Self::Success => Style::default().fg(SUCCESS),
            Self::Error => Style::default().fg(ERROR),
        }
    }
}

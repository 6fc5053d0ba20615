mod selection;
mod viewport;

use crate::domain::{ApplyPlan, Display, ReportError, build_apply_plan};
use crate::infra::DisplayplacerError;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

pub use selection::SelectionState;
pub use viewport::Viewport;

/// Boxed title height.
pub const HEADER_ROWS: usize = 3;
/// Displays listed individually under "Current:".
pub const SUMMARY_DISPLAY_LIMIT: usize = 2;
/// Rows kept free under the lists for the controls and status lines.
pub const FOOTER_ROWS: usize = 4;
const MIN_LIST_ROWS: usize = 3;
/// Two headings and the separator row, net of the spare row above the footer.
const LIST_CHROME_ROWS: usize = 2;
const SCROLL_HINT_ROWS: usize = 2;
const MIN_PAGE_JUMP: usize = 5;
const SUCCESS_STATUS_PASSES: u16 = 30;
const ERROR_STATUS_PASSES: u16 = 50;
/// Lifetime of the status shown when a selection cannot be applied.
const INVALID_SELECTION_STATUS_PASSES: u16 = 30;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Displayplacer(#[from] DisplayplacerError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("the interactive switcher needs a terminal; use `list` for plain output")]
    NotInteractive,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ApplyError {
    #[error("Invalid mode (selection {index} of {len})")]
    InvalidSelection { index: usize, len: usize },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Transient footer message that expires after a number of render passes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub remaining_passes: u16,
}

/// Row budget for the two scrollable lists.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ListHeights {
    pub displays: usize,
    pub modes: usize,
}

/// Rows used above the lists: title, blank, "Current:", summary rows, "+N more", blank.
pub fn summary_rows(display_count: usize) -> usize {
    let listed = display_count.min(SUMMARY_DISPLAY_LIMIT);
    let more = usize::from(display_count > SUMMARY_DISPLAY_LIMIT);
    HEADER_ROWS + 1 + 1 + listed + more + 1
}

/// Splits the rows left under the summary between the display list and the mode list.
///
/// Besides the two list headings and the blank row between the lists, room is kept for the
/// scroll hints of the mode list and, when it cannot show every display, of the display list.
pub fn list_heights(terminal_height: u16, display_count: usize) -> ListHeights {
    let used = summary_rows(display_count) + FOOTER_ROWS;
    let remaining = usize::from(terminal_height).saturating_sub(used);
    let displays = display_count.min(MIN_LIST_ROWS.max(remaining / 3));
    let display_hints = if display_count > displays { SCROLL_HINT_ROWS } else { 0 };
    let reserved = displays + LIST_CHROME_ROWS + SCROLL_HINT_ROWS + display_hints;
    let modes = MIN_LIST_ROWS.max(remaining.saturating_sub(reserved));
    ListHeights { displays, modes }
}

#[derive(Clone, Debug)]
pub struct AppModel {
    pub displays: Vec<Display>,
    pub selection: SelectionState,
    pub display_viewport: Viewport,
    pub mode_viewports: BTreeMap<String, Viewport>,
    pub terminal_size: (u16, u16),
    pub status: Option<StatusMessage>,
}

impl AppModel {
    pub fn new(displays: Vec<Display>) -> Self {
        let selection = SelectionState::new(
            displays
                .iter()
                .map(|display| display.persistent_id.as_str()),
        );
        let mut model = Self {
            displays,
            selection,
            display_viewport: Viewport::new(1),
            mode_viewports: BTreeMap::new(),
            terminal_size: (0, 0),
            status: None,
        };
        model.sync_viewports();
        model
    }

    pub fn with_terminal_size(mut self, width: u16, height: u16) -> Self {
        self.terminal_size = (width, height);
        self.sync_viewports();
        self
    }

    pub fn list_heights(&self) -> ListHeights {
        list_heights(self.terminal_size.1, self.displays.len())
    }

    pub fn current_display(&self) -> Option<&Display> {
        self.displays.get(self.selection.current_display_index())
    }

    pub fn current_mode_index(&self) -> usize {
        self.current_display()
            .map(|display| self.selection.current_mode_index(&display.persistent_id))
            .unwrap_or(0)
    }

    pub fn current_mode_viewport(&self) -> Option<&Viewport> {
        let display = self.current_display()?;
        self.mode_viewports.get(&display.persistent_id)
    }

    /// Brings both visible viewports in line with the live cursors and terminal height.
    pub fn sync_viewports(&mut self) {
        let heights = self.list_heights();
        self.display_viewport.set_max_height(heights.displays);
        self.display_viewport
            .update(self.displays.len(), self.selection.current_display_index());

        let Some(display) = self.current_display() else {
            return;
        };
        let id = display.persistent_id.clone();
        let total = display.modes.len();
        let current = self.selection.current_mode_index(&id);
        let viewport = self
            .mode_viewports
            .entry(id)
            .or_insert_with(|| Viewport::new(heights.modes));
        viewport.set_max_height(heights.modes);
        viewport.update(total, current);
    }

    /// Builds the full-set request for the highlighted display and mode.
    pub fn apply_plan(&self) -> Result<ApplyPlan, ApplyError> {
        let display_index = self.selection.current_display_index();
        let index = self.current_mode_index();
        let Some(display) = self.displays.get(display_index) else {
            return Err(ApplyError::InvalidSelection { index, len: 0 });
        };
        let Some(mode) = display.modes.get(index) else {
            return Err(ApplyError::InvalidSelection {
                index,
                len: display.modes.len(),
            });
        };
        Ok(build_apply_plan(&self.displays, display_index, mode))
    }

    pub fn set_status(&mut self, text: String, kind: StatusKind) {
        let remaining_passes = match kind {
            StatusKind::Success => SUCCESS_STATUS_PASSES,
            StatusKind::Error => ERROR_STATUS_PASSES,
        };
        self.set_status_for(text, kind, remaining_passes);
    }

    fn set_status_for(&mut self, text: String, kind: StatusKind, remaining_passes: u16) {
        self.status = Some(StatusMessage {
            text,
            kind,
            remaining_passes,
        });
    }

    /// Called once per render pass.
    pub fn tick_status(&mut self) {
        let Some(status) = &mut self.status else {
            return;
        };
        status.remaining_passes = status.remaining_passes.saturating_sub(1);
        if status.remaining_passes == 0 {
            self.status = None;
        }
    }

    fn step_display(&mut self, forward: bool) {
        let count = self.displays.len();
        if count < 2 {
            return;
        }
        let index = self.selection.current_display_index() % count;
        let next = if forward {
            (index + 1) % count
        } else {
            (index + count - 1) % count
        };
        self.selection.set_current_display_index(next);
    }

    fn step_mode(&mut self, forward: bool) {
        let Some(display) = self.current_display() else {
            return;
        };
        let count = display.modes.len();
        if count == 0 {
            return;
        }
        let id = display.persistent_id.clone();
        let last = count - 1;
        let index = self.selection.current_mode_index(&id).min(last);
        let next = match (forward, index) {
            (true, index) if index == last => 0,
            (true, index) => index + 1,
            (false, 0) => last,
            (false, index) => index - 1,
        };
        self.selection.set_current_mode_index(&id, next);
    }

    fn page_mode(&mut self, forward: bool) {
        self.sync_viewports();
        let jump = self
            .current_mode_viewport()
            .map(|viewport| viewport.max_height() / 2)
            .unwrap_or(0)
            .max(MIN_PAGE_JUMP);
        let Some(display) = self.current_display() else {
            return;
        };
        let count = display.modes.len();
        if count == 0 {
            return;
        }
        let id = display.persistent_id.clone();
        let index = self.selection.current_mode_index(&id);
        let next = if forward {
            index.saturating_add(jump).min(count - 1)
        } else {
            index.saturating_sub(jump).min(count - 1)
        };
        self.selection.set_current_mode_index(&id, next);
    }
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppCommand {
    None,
    Quit,
    Apply(ApplyPlan),
}

pub fn update(model: AppModel, event: AppEvent) -> (AppModel, AppCommand) {
    let (mut model, command) = match event {
        AppEvent::Key(key) => update_on_key(model, key),
        AppEvent::Resize(width, height) => {
            (model.with_terminal_size(width, height), AppCommand::None)
        }
    };
    model.sync_viewports();
    (model, command)
}

fn update_on_key(mut model: AppModel, key: KeyEvent) -> (AppModel, AppCommand) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return (model, AppCommand::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return (model, AppCommand::Quit),
        KeyCode::Left => model.step_display(false),
        KeyCode::Right => model.step_display(true),
        KeyCode::Up => model.step_mode(false),
        KeyCode::Down => model.step_mode(true),
        KeyCode::PageUp => model.page_mode(false),
        KeyCode::PageDown => model.page_mode(true),
        KeyCode::Enter => return commit(model),
        _ => {}
    }
    (model, AppCommand::None)
}

fn commit(mut model: AppModel) -> (AppModel, AppCommand) {
    match model.apply_plan() {
        Ok(plan) => (model, AppCommand::Apply(plan)),
        Err(error) => {
            warn!(%error, "refusing to apply");
            model.set_status_for(
                format!("Error: {error}"),
                StatusKind::Error,
                INVALID_SELECTION_STATUS_PASSES,
            );
            (model, AppCommand::None)
        }
    }
}

/// Folds the outcome of an apply request back into the model.
///
/// Only a confirmed success touches the display list; failures leave it as it was and keep the
/// highlighted mode so the user can retry.
pub fn finish_apply(
    mut model: AppModel,
    plan: &ApplyPlan,
    result: Result<(), DisplayplacerError>,
) -> AppModel {
    match result {
        Ok(()) => {
            if let Some(target) = model.displays.get_mut(plan.target_index) {
                info!(
                    display = %target.persistent_id,
                    mode = plan.mode.ordinal,
                    "applied display mode"
                );
                target.mark_applied(&plan.mode);
            }
            model.set_status("✓ Applied successfully!".to_string(), StatusKind::Success);
        }
        Err(error) => {
            warn!(%error, "display mode apply failed");
            model.set_status(error.status_text(), StatusKind::Error);
        }
    }
    model
}

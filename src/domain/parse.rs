use crate::domain::{Display, Mode};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

const PERSISTENT_ID_PREFIX: &str = "Persistent screen id:";
const CONTEXTUAL_ID_PREFIX: &str = "Contextual screen id:";
const SERIAL_ID_PREFIX: &str = "Serial screen id:";
const TYPE_PREFIX: &str = "Type:";
const RESOLUTION_PREFIX: &str = "Resolution:";
const HERTZ_PREFIX: &str = "Hertz:";
const ORIGIN_PREFIX: &str = "Origin:";
const MODES_MARKER: &str = "Resolutions for rotation";
const HIDPI_MARKER: &str = "scaling:on";
const CURRENT_MARKER: &str = "<-- current mode";

static MODE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*mode (\d+): res:(\d+)x(\d+) hz:(\d+) color_depth:(\d+)(.*)$")
        .expect("mode line pattern compiles")
});

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed report: no display records found")]
    NoDisplays,
}

/// Parses a `displayplacer list` report into displays with sorted modes.
pub fn parse_report(report: &str) -> Result<Vec<Display>, ReportError> {
    let normalized = report.replace("\r\n", "\n");
    let displays: Vec<Display> = normalized
        .split("\n\n")
        .filter_map(parse_display_block)
        .collect();

    if displays.is_empty() {
        return Err(ReportError::NoDisplays);
    }
    Ok(displays)
}

fn parse_display_block(block: &str) -> Option<Display> {
    if !block.contains(PERSISTENT_ID_PREFIX) {
        return None;
    }

    let lines: Vec<&str> = block.trim().lines().collect();
    let mut display = Display {
        persistent_id: String::new(),
        contextual_id: String::new(),
        serial_id: String::new(),
        display_type: String::new(),
        current_resolution: String::new(),
        current_hertz: 0,
        origin: (0, 0),
        current_mode: None,
        modes: Vec::new(),
    };

    for line in &lines {
        if line.starts_with(PERSISTENT_ID_PREFIX) {
            display.persistent_id = field_value(line);
        } else if line.starts_with(CONTEXTUAL_ID_PREFIX) {
            display.contextual_id = field_value(line);
        } else if line.starts_with(SERIAL_ID_PREFIX) {
            display.serial_id = field_value(line);
        } else if line.starts_with(TYPE_PREFIX) {
            display.display_type = field_value(line);
        } else if line.starts_with(RESOLUTION_PREFIX) {
            display.current_resolution = field_value(line);
        } else if line.starts_with(HERTZ_PREFIX) {
            display.current_hertz = field_value(line).parse().unwrap_or(0);
        } else if line.starts_with(ORIGIN_PREFIX) {
            match parse_origin(&field_value(line)) {
                Some(origin) => display.origin = origin,
                None => debug!(line, "unparseable origin, assuming (0,0)"),
            }
        }
    }

    let mut seen = BTreeSet::new();
    let mut in_modes = false;
    for line in &lines {
        if line.starts_with(MODES_MARKER) {
            in_modes = true;
            continue;
        }
        if !in_modes || !line.trim_start().starts_with("mode ") {
            continue;
        }

        let Some((mode, is_current)) = parse_mode_line(line) else {
            debug!(line, "skipping unrecognized mode line");
            continue;
        };
        if is_current {
            display.current_mode = Some(mode.ordinal);
        }
        if !seen.insert(mode.ordinal) {
            debug!(ordinal = mode.ordinal, "skipping duplicate mode ordinal");
            continue;
        }
        display.modes.push(mode);
    }

    display.sort_modes();
    Some(display)
}

fn field_value(line: &str) -> String {
    line.split_once(": ")
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Extracts the leading `(x,y)` pair, ignoring any trailing description.
pub fn parse_origin(value: &str) -> Option<(i32, i32)> {
    let rest = value.trim_start().strip_prefix('(')?;
    let (inner, _) = rest.split_once(')')?;
    let (x, y) = inner.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn parse_mode_line(line: &str) -> Option<(Mode, bool)> {
    let captures = MODE_LINE.captures(line)?;
    let number = |index: usize| -> Option<u32> { captures.get(index)?.as_str().parse().ok() };
    let extra = captures.get(6).map(|m| m.as_str()).unwrap_or("");

    let mode = Mode {
        ordinal: number(1)?,
        width: number(2)?,
        height: number(3)?,
        hertz: number(4)?,
        color_depth: number(5)?,
        hidpi: extra.contains(HIDPI_MARKER),
    };
    Some((mode, extra.contains(CURRENT_MARKER)))
}

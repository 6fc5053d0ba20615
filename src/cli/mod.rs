use crate::domain::{Display, ReportError, parse_report};
use crate::infra::{Displayplacer, DisplayplacerError};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliInvocation {
    PrintHelp,
    PrintVersion,
    Tui { debug: bool },
    Command { command: CliCommand, debug: bool },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliCommand {
    List { json: bool },
}

#[derive(Debug, Error)]
pub enum CliParseError {
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

#[derive(Debug, Error)]
pub enum CliRunError {
    #[error(transparent)]
    Displayplacer(#[from] DisplayplacerError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

pub fn parse_invocation(args: &[String]) -> Result<CliInvocation, CliParseError> {
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        return Ok(CliInvocation::PrintHelp);
    }
    if args.iter().any(|arg| matches!(arg.as_str(), "--version" | "-V" | "-v")) {
        return Ok(CliInvocation::PrintVersion);
    }

    let mut debug = false;
    let mut subcommand: Option<&str> = None;
    let mut json = false;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--debug" | "-d" => debug = true,
            "--json" if subcommand == Some("list") => json = true,
            _ if arg.starts_with('-') => return Err(CliParseError::UnknownFlag(arg.clone())),
            "list" if subcommand.is_none() => subcommand = Some("list"),
            _ if subcommand.is_none() => {
                return Err(CliParseError::UnknownSubcommand(arg.clone()));
            }
            _ => return Err(CliParseError::UnexpectedArgument(arg.clone())),
        }
    }

    Ok(match subcommand {
        Some(_) => CliInvocation::Command {
            command: CliCommand::List { json },
            debug,
        },
        None => CliInvocation::Tui { debug },
    })
}

pub fn run(command: CliCommand, displayplacer: &Displayplacer) -> Result<(), CliRunError> {
    match command {
        CliCommand::List { json } => {
            let report = displayplacer.list()?;
            let displays = parse_report(&report)?;
            let mut out = io::stdout().lock();
            write_display_list(&mut out, &displays, json)?;
            out.flush()?;
            Ok(())
        }
    }
}

/// Text form: one tab-separated row per display, then its modes indented in presentation order.
pub fn write_display_list(
    out: &mut impl Write,
    displays: &[Display],
    json: bool,
) -> Result<(), CliRunError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, displays)?;
        writeln!(out)?;
        return Ok(());
    }

    for display in displays {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            display.persistent_id,
            display.short_name(),
            display.active_mode_label(),
            display.modes.len()
        )?;
        for mode in &display.modes {
            let current = if display.current_mode == Some(mode.ordinal) {
                "\tcurrent"
            } else {
                ""
            };
            writeln!(
                out,
                "  [{}]\t{}\t{}{current}",
                mode.ordinal, mode, mode.color_depth
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn parse_defaults_to_tui_when_no_args() {
        let parsed = parse_invocation(&args(&["resmode"])).expect("parse");
        assert_eq!(parsed, CliInvocation::Tui { debug: false });
    }

    #[test]
    fn parse_help_flag_wins() {
        let parsed = parse_invocation(&args(&["resmode", "list", "--help"])).expect("parse");
        assert_eq!(parsed, CliInvocation::PrintHelp);
    }

    #[test]
    fn parse_version_flag() {
        let parsed = parse_invocation(&args(&["resmode", "-V"])).expect("parse");
        assert_eq!(parsed, CliInvocation::PrintVersion);

        let parsed = parse_invocation(&args(&["resmode", "-v"])).expect("parse");
        assert_eq!(parsed, CliInvocation::PrintVersion);
    }

    #[test]
    fn parse_debug_flag_anywhere() {
        let parsed = parse_invocation(&args(&["resmode", "--debug"])).expect("parse");
        assert_eq!(parsed, CliInvocation::Tui { debug: true });

        let parsed = parse_invocation(&args(&["resmode", "list", "-d"])).expect("parse");
        assert_eq!(
            parsed,
            CliInvocation::Command {
                command: CliCommand::List { json: false },
                debug: true
            }
        );
    }

    #[test]
    fn parse_list_json() {
        let parsed = parse_invocation(&args(&["resmode", "list", "--json"])).expect("parse");
        assert_eq!(
            parsed,
            CliInvocation::Command {
                command: CliCommand::List { json: true },
                debug: false
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_input() {
        assert!(matches!(
            parse_invocation(&args(&["resmode", "apply"])),
            Err(CliParseError::UnknownSubcommand(_))
        ));
        assert!(matches!(
            parse_invocation(&args(&["resmode", "--json"])),
            Err(CliParseError::UnknownFlag(_))
        ));
        assert!(matches!(
            parse_invocation(&args(&["resmode", "list", "extra"])),
            Err(CliParseError::UnexpectedArgument(_))
        ));
    }

    #[test]
    fn writes_tab_separated_listing() {
        let report = "Persistent screen id: AAA
Contextual screen id: 1
Type: Panel
Origin: (0,0)
Resolutions for rotation 0:
  mode 1: res:1920x1080 hz:60 color_depth:8 <-- current mode
  mode 2: res:1280x720 hz:60 color_depth:8 scaling:on
";
        let displays = parse_report(report).expect("parse");
        let mut out = Vec::new();
        write_display_list(&mut out, &displays, false).expect("write");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            "AAA\tPanel (1)\t1920x1080 @60Hz\t2\n  [2]\t1280x720 (HiDPI) @60Hz\t8\n  [1]\t1920x1080 @60Hz\t8\tcurrent\n"
        );
    }

    #[test]
    fn writes_json_listing() {
        let displays = parse_report("Persistent screen id: AAA\nType: Panel\n").expect("parse");
        let mut out = Vec::new();
        write_display_list(&mut out, &displays, true).expect("write");

        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value[0]["persistent_id"], "AAA");
        assert_eq!(value[0]["display_type"], "Panel");
        assert_eq!(value[0]["modes"].as_array().map(Vec::len), Some(0));
    }
}

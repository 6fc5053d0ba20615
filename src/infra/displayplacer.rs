use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_PROGRAM: &str = "displayplacer";
const PROGRAM_ENV: &str = "RESMODE_DISPLAYPLACER";

#[derive(Debug, Error)]
pub enum DisplayplacerError {
    #[error("{program} not found. Install with: brew install displayplacer")]
    NotFound { program: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {}: {}", exit_label(.status), .stderr.trim())]
    Failed {
        program: String,
        status: Option<i32>,
        stderr: String,
    },
}

impl DisplayplacerError {
    /// Text shown to the user when an apply attempt fails.
    pub fn status_text(&self) -> String {
        match self {
            Self::Failed { stderr, .. } if !stderr.trim().is_empty() => {
                let message = stderr.split_whitespace().collect::<Vec<_>>().join(" ");
                format!("Error: {message}")
            }
            Self::Failed { .. } => "Error: Failed".to_string(),
            other => format!("Error: {other}"),
        }
    }
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// The external display configuration tool.
#[derive(Clone, Debug)]
pub struct Displayplacer {
    program: PathBuf,
}

impl Displayplacer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Uses `RESMODE_DISPLAYPLACER` when set, otherwise `displayplacer` from `PATH`.
    pub fn resolve() -> Self {
        let program = std::env::var_os(PROGRAM_ENV)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| OsString::from(DEFAULT_PROGRAM));
        Self::new(program)
    }

    pub fn program_label(&self) -> String {
        self.program.display().to_string()
    }

    /// Runs `displayplacer list` and returns its report.
    pub fn list(&self) -> Result<String, DisplayplacerError> {
        let output = self.run(&["list".to_string()])?;
        let report = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = report.len(), "read displayplacer report");
        Ok(report)
    }

    /// Applies a full arrangement, one argument per display.
    pub fn apply(&self, args: &[String]) -> Result<(), DisplayplacerError> {
        info!(?args, "applying display arrangement");
        self.run(args).map(|_| ())
    }

    fn run(&self, args: &[String]) -> Result<Output, DisplayplacerError> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|error| match error.kind() {
                io::ErrorKind::NotFound => DisplayplacerError::NotFound {
                    program: self.program_label(),
                },
                _ => DisplayplacerError::Spawn {
                    program: self.program_label(),
                    source: error,
                },
            })?;

        if !output.status.success() {
            return Err(DisplayplacerError::Failed {
                program: self.program_label(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("displayplacer");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod");
        path
    }

    #[test]
    fn list_returns_stdout() {
        let temp = tempdir().expect("tempdir");
        let script = write_script(
            temp.path(),
            "[ \"$1\" = list ] || exit 3\necho 'Persistent screen id: A'",
        );

        let report = Displayplacer::new(script).list().expect("list");
        assert_eq!(report, "Persistent screen id: A\n");
    }

    #[test]
    fn apply_passes_one_argument_per_display() {
        let temp = tempdir().expect("tempdir");
        let record = temp.path().join("args.txt");
        let script = write_script(
            temp.path(),
            &format!(
                "for arg in \"$@\"; do echo \"$arg\" >> '{}'; done",
                record.display()
            ),
        );

        let args = vec![
            "id:A mode:1 origin:(0,0) degree:0".to_string(),
            "id:B mode:7 origin:(-1920,0) degree:0".to_string(),
        ];
        Displayplacer::new(script).apply(&args).expect("apply");

        let recorded = fs::read_to_string(&record).expect("read record");
        assert_eq!(
            recorded,
            "id:A mode:1 origin:(0,0) degree:0\nid:B mode:7 origin:(-1920,0) degree:0\n"
        );
    }

    #[test]
    fn non_zero_exit_surfaces_stderr() {
        let temp = tempdir().expect("tempdir");
        let script = write_script(temp.path(), "echo 'mode 99 not found' >&2\nexit 1");

        let error = Displayplacer::new(script)
            .apply(&["id:A mode:99 origin:(0,0) degree:0".to_string()])
            .expect_err("should fail");
        match &error {
            DisplayplacerError::Failed { status, stderr, .. } => {
                assert_eq!(*status, Some(1));
                assert_eq!(stderr.trim(), "mode 99 not found");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(error.status_text(), "Error: mode 99 not found");
    }

    #[test]
    fn multi_line_stderr_fits_one_status_row() {
        let temp = tempdir().expect("tempdir");
        let script = write_script(
            temp.path(),
            "printf 'could not apply\n  mode 99 unknown\n' >&2\nexit 1",
        );

        let error = Displayplacer::new(script)
            .apply(&["id:A mode:99 origin:(0,0) degree:0".to_string()])
            .expect_err("should fail");
        assert_eq!(error.status_text(), "Error: could not apply mode 99 unknown");
    }

    #[test]
    fn silent_failure_reports_generic_text() {
        let temp = tempdir().expect("tempdir");
        let script = write_script(temp.path(), "exit 2");

        let error = Displayplacer::new(script).list().expect_err("should fail");
        assert_eq!(error.status_text(), "Error: Failed");
    }

    #[test]
    fn missing_program_is_not_found() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("no-such-displayplacer");

        let error = Displayplacer::new(missing).list().expect_err("should fail");
        assert!(matches!(error, DisplayplacerError::NotFound { .. }));
        assert!(error.to_string().contains("brew install displayplacer"));
    }
}

//! Rendering pipeline failures for the user

use crate::error::PipelineError;
use std::io::{self, Write};
use std::path::Path;

/// Where unexpected failures should be reported
pub const ISSUE_TRACKER: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "/issues");

/// Write a diagnostic for `error` to `out`
///
/// Migration failures name the file, carry the transform's message when
/// there is one, and point at [`ISSUE_TRACKER`]. Other errors are a single
/// line, plus the tracker pointer when they indicate a defect.
///
/// # Errors
/// Only errors from writing to `out`
pub fn report_failure(
    out: &mut impl Write,
    target: Option<&Path>,
    error: &PipelineError,
) -> io::Result<()> {
    match (error.as_migration_failure(), target) {
        (Some(failure), Some(path)) => {
            writeln!(out, "error: failed to migrate {}", path.display())?;
            writeln!(out, "  transform: {}", failure.transform)?;
            match &failure.message {
                Some(message) => writeln!(out, "  reason: {message}")?,
                None => writeln!(out, "  reason: no message was captured")?,
            }
            writeln!(out, "  the file was not modified")?;
        }
        _ => writeln!(out, "error: {error}")?,
    }

    if error.is_internal() {
        writeln!(
            out,
            "This looks like a bug in tsmig. Please report it at {ISSUE_TRACKER}"
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tsmig_transform::{FailureCause, MigrationFailed};

    fn render(target: Option<&Path>, error: &PipelineError) -> String {
        let mut out = Vec::new();
        report_failure(&mut out, target, error).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn migration_failure_with_message() {
        let path = PathBuf::from("/p/src/a.ts");
        let error = PipelineError::migration_failed(
            &path,
            MigrationFailed::new("mui-v5", FailureCause::Panic, Some("unexpected node".into())),
        );

        assert_eq!(
            render(Some(&path), &error),
            format!(
                "error: failed to migrate /p/src/a.ts\n  transform: mui-v5\n  \
                 reason: unexpected node\n  the file was not modified\n\
                 This looks like a bug in tsmig. Please report it at {ISSUE_TRACKER}\n"
            )
        );
    }

    #[test]
    fn migration_failure_without_message() {
        let path = PathBuf::from("/p/a.ts");
        let error = PipelineError::migration_failed(
            &path,
            MigrationFailed::new("mui-v5", FailureCause::Panic, None),
        );

        let text = render(Some(&path), &error);
        assert!(text.contains("no message was captured"));
        assert!(text.contains(ISSUE_TRACKER));
    }

    #[test]
    fn input_errors_are_one_line() {
        let error = PipelineError::ConfigurationMissing {
            path: PathBuf::from("/p/a.ts"),
        };
        assert_eq!(
            render(Some(Path::new("/p/a.ts")), &error),
            "error: no tsconfig.json found in any parent directory of /p/a.ts\n"
        );
        assert_eq!(
            render(None, &PipelineError::MissingArgument),
            "error: missing argument: expected the path of a file to migrate\n"
        );
    }

    #[test]
    fn tracker_points_at_issues() {
        assert!(ISSUE_TRACKER.ends_with("/issues"));
        assert!(ISSUE_TRACKER.starts_with("https://"));
    }
}

//! Writing the HTML/PDF pair to the output directory.
//!
//! Both renditions are written to hidden `.partial` files first and only
//! renamed into place once both writes succeeded, so a run leaves either a
//! complete pair or nothing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::RenderError;
use crate::format::local_time;

const FILE_PREFIX: &str = "tilbud";

/// Paths of a written report pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub html: PathBuf,
    pub pdf: PathBuf,
}

/// Timestamp token shared by both files of a run, `YYYYMMDD_HHMMSS` in
/// Copenhagen time.
#[must_use]
pub fn file_token(started_at: DateTime<Utc>) -> String {
    local_time(started_at).format("%Y%m%d_%H%M%S").to_string()
}

fn final_paths(dir: &Path, stem: &str) -> ReportPaths {
    ReportPaths {
        html: dir.join(format!("{stem}.html")),
        pdf: dir.join(format!("{stem}.pdf")),
    }
}

/// Picks `tilbud_<token>`, or `tilbud_<token>-N` when a previous run in the
/// same second already used the name.
fn free_stem(dir: &Path, token: &str) -> String {
    let base = format!("{FILE_PREFIX}_{token}");
    let taken = |stem: &str| {
        let paths = final_paths(dir, stem);
        paths.html.exists() || paths.pdf.exists()
    };
    if !taken(&base) {
        return base;
    }
    let mut n = 2u32;
    loop {
        let stem = format!("{base}-{n}");
        if !taken(&stem) {
            return stem;
        }
        n += 1;
    }
}

fn io_error(path: &Path, source: io::Error) -> RenderError {
    RenderError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes both renditions under `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`RenderError::Io`] naming the path that failed. No report files
/// are left behind on error.
pub fn write_report_pair(
    dir: &Path,
    token: &str,
    html: &str,
    pdf: &[u8],
) -> Result<ReportPaths, RenderError> {
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

    let stem = free_stem(dir, token);
    let target = final_paths(dir, &stem);
    let staged = ReportPaths {
        html: dir.join(format!(".{stem}.html.partial")),
        pdf: dir.join(format!(".{stem}.pdf.partial")),
    };

    let result = stage_and_commit(&staged, &target, html, pdf);
    if result.is_err() {
        for path in [&staged.html, &staged.pdf, &target.html] {
            // Best-effort cleanup; the original error is what gets reported.
            let _ = fs::remove_file(path);
        }
    }
    result?;

    tracing::info!(
        html = %target.html.display(),
        pdf = %target.pdf.display(),
        "report written"
    );
    Ok(target)
}

fn stage_and_commit(
    staged: &ReportPaths,
    target: &ReportPaths,
    html: &str,
    pdf: &[u8],
) -> Result<(), RenderError> {
    fs::write(&staged.html, html).map_err(|e| io_error(&staged.html, e))?;
    fs::write(&staged.pdf, pdf).map_err(|e| io_error(&staged.pdf, e))?;
    fs::rename(&staged.html, &target.html).map_err(|e| io_error(&target.html, e))?;
    fs::rename(&staged.pdf, &target.pdf).map_err(|e| io_error(&target.pdf, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn token_uses_copenhagen_local_time() {
        let winter = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(file_token(winter), "20240301_100507");
        let summer = Utc.with_ymd_and_hms(2024, 7, 1, 22, 30, 0).unwrap();
        assert_eq!(file_token(summer), "20240702_003000");
    }

    #[test]
    fn writes_both_files_with_shared_token() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");

        let paths = write_report_pair(&out, "20240301_100000", "<html></html>", b"%PDF-1.3").unwrap();

        assert_eq!(paths.html, out.join("tilbud_20240301_100000.html"));
        assert_eq!(paths.pdf, out.join("tilbud_20240301_100000.pdf"));
        assert_eq!(fs::read_to_string(&paths.html).unwrap(), "<html></html>");
        assert_eq!(fs::read(&paths.pdf).unwrap(), b"%PDF-1.3");
        assert_eq!(
            entries(&out),
            vec!["tilbud_20240301_100000.html", "tilbud_20240301_100000.pdf"]
        );
    }

    #[test]
    fn same_second_runs_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_report_pair(dir.path(), "20240301_100000", "a", b"a").unwrap();
        let second = write_report_pair(dir.path(), "20240301_100000", "b", b"b").unwrap();

        assert_ne!(first.html, second.html);
        assert_eq!(second.html, dir.path().join("tilbud_20240301_100000-2.html"));
        assert_eq!(second.pdf, dir.path().join("tilbud_20240301_100000-2.pdf"));
        assert_eq!(fs::read_to_string(&first.html).unwrap(), "a");
        assert_eq!(entries(dir.path()).len(), 4);
    }

    #[test]
    fn unwritable_directory_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let err = write_report_pair(&blocker, "20240301_100000", "a", b"a").unwrap_err();
        let RenderError::Io { path, .. } = err else {
            panic!("expected Io error");
        };
        assert_eq!(path, blocker);
        assert_eq!(entries(dir.path()), vec!["not-a-dir"]);
    }
}

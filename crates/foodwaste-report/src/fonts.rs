//! Font loading for the PDF renderer.
//!
//! `genpdf` needs a TrueType family with four styles. A configured family is
//! looked up as `<Family>-Regular.ttf`, `-Bold`, `-Italic` and `-BoldItalic`,
//! first in the configured directory and then in the usual system locations.
//! The default family (Liberation Sans) may be substituted by DejaVu Sans,
//! which uses its own file naming; an explicitly configured family never is.

use std::path::{Path, PathBuf};

use foodwaste_core::DEFAULT_FONT_FAMILY;
use genpdf::fonts::{FontData, FontFamily};

use crate::error::RenderError;

const FONT_STYLES: [&str; 4] = ["Regular", "Bold", "Italic", "BoldItalic"];

const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
];

const DEJAVU_FAMILY: &str = "DejaVuSans";
const DEJAVU_FILES: [&str; 4] = [
    "DejaVuSans.ttf",
    "DejaVuSans-Bold.ttf",
    "DejaVuSans-Oblique.ttf",
    "DejaVuSans-BoldOblique.ttf",
];

/// The four files of a resolved font family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFiles {
    pub family: String,
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub italic: PathBuf,
    pub bold_italic: PathBuf,
}

/// File names of one family, regular/bold/italic/bold-italic.
struct FontLayout {
    family: String,
    files: [String; 4],
}

impl FontLayout {
    fn named(family: &str) -> Self {
        Self {
            family: family.to_string(),
            files: FONT_STYLES.map(|style| format!("{family}-{style}.ttf")),
        }
    }

    fn dejavu() -> Self {
        Self {
            family: DEJAVU_FAMILY.to_string(),
            files: DEJAVU_FILES.map(str::to_string),
        }
    }

    fn missing_in(&self, dir: &Path) -> Vec<&str> {
        self.files
            .iter()
            .map(String::as_str)
            .filter(|name| !dir.join(name).is_file())
            .collect()
    }

    fn files_in(&self, dir: &Path) -> FontFiles {
        let [regular, bold, italic, bold_italic] = &self.files;
        FontFiles {
            family: self.family.clone(),
            regular: dir.join(regular),
            bold: dir.join(bold),
            italic: dir.join(italic),
            bold_italic: dir.join(bold_italic),
        }
    }
}

fn font_directory_candidates(configured: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![configured.to_path_buf()];
    for dir in SYSTEM_FONT_DIRS {
        let candidate = PathBuf::from(dir);
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

fn layouts_for(family: &str) -> Vec<FontLayout> {
    let mut layouts = vec![FontLayout::named(family)];
    if family == DEFAULT_FONT_FAMILY {
        layouts.push(FontLayout::dejavu());
    }
    layouts
}

/// Finds the font files for `family`, trying each candidate directory in
/// turn.
///
/// # Errors
///
/// Returns [`RenderError::Fonts`] listing every directory checked.
pub fn resolve_font_files(configured: &Path, family: &str) -> Result<FontFiles, RenderError> {
    let layouts = layouts_for(family);
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(configured) {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }
        for layout in &layouts {
            let missing = layout.missing_in(&candidate);
            if missing.is_empty() {
                return Ok(layout.files_in(&candidate));
            }
            attempts.push(format!(
                "{} (missing {})",
                candidate.display(),
                missing.join(", ")
            ));
        }
    }

    Err(RenderError::Fonts {
        reason: format!(
            "font family '{family}' not found. Checked: {}. Set FOODWASTE_FONT_DIR to a directory with {family}-Regular.ttf and friends",
            attempts.join("; ")
        ),
    })
}

/// Loads the font family used for PDF rendering.
///
/// # Errors
///
/// Returns [`RenderError::Fonts`] when no directory has the family or the
/// files cannot be parsed.
pub fn load_font_family(
    configured: &Path,
    family: &str,
) -> Result<FontFamily<FontData>, RenderError> {
    let files = resolve_font_files(configured, family)?;
    if files.family != family {
        tracing::info!(requested = family, using = %files.family, "substituting PDF font family");
    }
    tracing::debug!(regular = %files.regular.display(), "loading PDF fonts");

    let load = |path: &Path| {
        FontData::load(path, None).map_err(|err| RenderError::Fonts {
            reason: format!("failed to load font {}: {err}", path.display()),
        })
    };
    Ok(FontFamily {
        regular: load(&files.regular)?,
        bold: load(&files.bold)?,
        italic: load(&files.italic)?,
        bold_italic: load(&files.bold_italic)?,
    })
}

/// Whether [`load_font_family`] can find the family.
#[must_use]
pub fn fonts_available(configured: &Path, family: &str) -> bool {
    resolve_font_files(configured, family).is_ok()
}

// SPDX-License-Identifier: MPL-2.0
//! Interactive session flow.
//!
//! The session talks to the user only through the [`Interaction`] trait, so
//! the flow can be driven by a terminal or by a scripted test double.

use crate::application::port::metadata::MetadataReader;
use crate::domain::metadata::PresencePolicy;
use crate::error::Result;
use crate::ui::report::{self, OutputFormat, Report, Status, TextOptions};
use console::Style;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main menu entry that inspects an image.
pub const MENU_INSPECT: &str = "Find details of an image";

/// Main menu entry that ends the session.
pub const MENU_EXIT: &str = "Exit";

const BANNER_ART: &str = r"
 _______      ___    ___ ___  ________
|\  ___ \    |\  \  /  /|\  \|\  _____\
\ \   __/|   \ \  \/  / | \  \ \  \__/
 \ \  \_|/__  \ \    / / \ \  \ \   __\
  \ \  \_|\ \  /     \/   \ \  \ \  \_|
   \ \_______\/  /\   \    \ \__\ \__\
    \|_______/__/ /\ __\    \|__|\|__|
             |__|/ \|__|
";

const BANNER_TITLE: &str = "   EXIF IMAGE METADATA & GPS EXTRACTOR";
const BANNER_SUBTITLE: &str = "   Reads camera settings and GPS location from photos";

// =============================================================================
// Interaction
// =============================================================================

/// The user-facing side of an interactive session.
pub trait Interaction {
    /// Clears the screen.
    fn clear(&mut self) -> Result<()>;

    /// Prints a block of text.
    fn show(&mut self, text: &str) -> Result<()>;

    /// Asks the user to pick one of `choices`. `None` means cancelled.
    fn select(&mut self, prompt: &str, choices: &[&str]) -> Result<Option<usize>>;

    /// Asks for a file path accepted by `filter`. `None` means cancelled.
    fn pick_file(&mut self, prompt: &str, filter: &PathFilter) -> Result<Option<PathBuf>>;
}

// =============================================================================
// Path Validation
// =============================================================================

/// Why a candidate path was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRejection {
    /// Nothing exists at the path.
    NotFound(PathBuf),
    /// The path exists but is a directory or special file.
    NotAFile(PathBuf),
    /// The extension is not one of the accepted ones.
    ExtensionNotAllowed(PathBuf),
}

impl fmt::Display for PathRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRejection::NotFound(path) => write!(f, "File not found: {}", path.display()),
            PathRejection::NotAFile(path) => write!(f, "Not a file: {}", path.display()),
            PathRejection::ExtensionNotAllowed(path) => {
                write!(f, "Not a supported image file: {}", path.display())
            }
        }
    }
}

impl std::error::Error for PathRejection {}

/// Accepts existing regular files with one of the configured extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    extensions: Vec<String>,
}

impl PathFilter {
    /// Extensions are compared case-insensitively, without the leading dot.
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns whether the file name has an accepted extension.
    #[must_use]
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    /// Checks existence, file type and extension, in that order.
    ///
    /// # Errors
    ///
    /// Returns the first [`PathRejection`] that applies.
    pub fn check(&self, path: &Path) -> std::result::Result<(), PathRejection> {
        check_file(path)?;
        if !self.matches_extension(path) {
            return Err(PathRejection::ExtensionNotAllowed(path.to_path_buf()));
        }
        Ok(())
    }
}

/// Checks that `path` names an existing regular file.
///
/// # Errors
///
/// Returns [`PathRejection::NotFound`] or [`PathRejection::NotAFile`].
pub fn check_file(path: &Path) -> std::result::Result<(), PathRejection> {
    if !path.exists() {
        return Err(PathRejection::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(PathRejection::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// Normalizes a typed path: strips surrounding quotes and expands `~`.
#[must_use]
pub fn normalize_input(input: &str) -> PathBuf {
    let trimmed = input.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(trimmed)
}

// =============================================================================
// Session
// =============================================================================

/// Presentation and resolver settings for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub clear_screen: bool,
    pub show_banner: bool,
    pub color: bool,
    pub show_all: bool,
    pub format: OutputFormat,
    pub policy: PresencePolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            clear_screen: true,
            show_banner: true,
            color: true,
            show_all: false,
            format: OutputFormat::Text,
            policy: PresencePolicy::default(),
        }
    }
}

impl SessionOptions {
    #[must_use]
    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            color: self.color,
            show_all: self.show_all,
        }
    }
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A file was inspected; carries the report status.
    Inspected(Status),
    /// The user chose "Exit".
    Exited,
    /// The user cancelled a prompt.
    Cancelled,
}

/// The coloured start-up banner.
#[must_use]
pub fn banner(color: bool) -> String {
    let art = Style::new().green().force_styling(color);
    let title = Style::new().yellow().bold().force_styling(color);
    let subtitle = Style::new().dim().force_styling(color);
    format!(
        "{}\n{}\n{}\n",
        art.apply_to(BANNER_ART),
        title.apply_to(BANNER_TITLE),
        subtitle.apply_to(BANNER_SUBTITLE)
    )
}

/// Reads one file and builds its report.
pub fn inspect_path(reader: &dyn MetadataReader, path: &Path, policy: PresencePolicy) -> Report {
    let outcome = reader.read(path);
    match &outcome {
        Ok(metadata) => debug!(tags = metadata.tags.len(), "metadata read"),
        Err(err) => info!(path = %path.display(), error = %err, "no metadata"),
    }
    report::build_report(path, &outcome, policy)
}

/// Renders a report in the session's output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(report: &Report, format: OutputFormat, text: TextOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report::render_text(report, text)),
        OutputFormat::Json => report::render_json(report),
    }
}

/// Runs one interactive session: banner, menu, file prompt, report.
///
/// # Errors
///
/// Returns an error if the interaction fails (closed terminal, broken pipe).
pub fn run_interactive(
    interaction: &mut dyn Interaction,
    reader: &dyn MetadataReader,
    filter: &PathFilter,
    options: &SessionOptions,
) -> Result<SessionOutcome> {
    if options.clear_screen {
        interaction.clear()?;
    }
    if options.show_banner {
        interaction.show(&banner(options.color))?;
    }

    let choice = interaction.select("Select an option:", &[MENU_INSPECT, MENU_EXIT])?;
    match choice {
        Some(0) => {}
        Some(_) => return Ok(SessionOutcome::Exited),
        None => return Ok(SessionOutcome::Cancelled),
    }

    let Some(path) = interaction.pick_file("Select an image file:", filter)? else {
        return Ok(SessionOutcome::Cancelled);
    };
    debug!(path = %path.display(), "inspecting");

    let report = inspect_path(reader, &path, options.policy);
    let rendered = render(&report, options.format, options.text_options())?;
    interaction.show(&rendered)?;
    Ok(SessionOutcome::Inspected(report.status))
}

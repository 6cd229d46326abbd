//! Capture session lifecycle and page editing.

use thiserror::Error;

use super::pdf::{self, PdfError};
use super::raster::{Raster, Rotation};

/// Observable lifecycle of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// No capture has started.
    Idle,
    /// The camera is live and frames can be appended.
    Capturing,
    /// Captured pages can be inspected, edited, removed, or exported.
    Reviewing,
    /// One page is checked out into a scratch copy.
    Editing {
        /// Zero-based index of the page being edited.
        index: usize,
    },
    /// Pages were rendered to a PDF awaiting submission.
    Exporting,
    /// The exported PDF was handed to the upload flow.
    Submitted,
}

impl std::fmt::Display for CaptureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Capturing => f.write_str("capturing"),
            Self::Reviewing => f.write_str("reviewing"),
            Self::Editing { index } => write!(f, "editing page {index}"),
            Self::Exporting => f.write_str("exporting"),
            Self::Submitted => f.write_str("submitted"),
        }
    }
}

/// Errors raised by capture session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        state: CaptureState,
        action: &'static str,
    },
    #[error("page {index} is out of range for {pages} pages")]
    PageOutOfRange { index: usize, pages: usize },
    #[error("cannot export a scan with no pages")]
    NoPages,
    #[error(transparent)]
    Pdf(#[from] PdfError),
}

/// PDF bytes and filename produced by a capture session export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedScan {
    /// Upload filename, `Scan-{description}-{timestamp}.pdf`.
    pub file_name: String,
    /// Rendered PDF document.
    pub bytes: Vec<u8>,
}

/// Page checked out for editing, held apart from the committed pages.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EditingPage {
    index: usize,
    scratch: Raster,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Idle,
    Capturing,
    Reviewing,
    Editing(EditingPage),
    Exporting,
    Submitted,
}

/// One camera-capture session from first frame to submission.
///
/// Operations that do not apply to the current state fail with
/// [`CaptureError::InvalidTransition`] and leave the session untouched.
///
/// # Examples
/// ```
/// use docstore::domain::scan::{CaptureSession, Raster};
///
/// let mut session = CaptureSession::new();
/// session.begin_capture()?;
/// session.capture_page(Raster::new(2, 3)?)?;
/// session.finish_capture()?;
/// let scan = session.export("report", 1_700_000_000_000)?;
/// assert_eq!(scan.file_name, "Scan-report-1700000000000.pdf");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSession {
    mode: Mode,
    pages: Vec<Raster>,
}

impl CaptureSession {
    /// Start an idle session with no pages.
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            pages: Vec::new(),
        }
    }

    /// Snapshot of the current lifecycle state.
    pub fn state(&self) -> CaptureState {
        match &self.mode {
            Mode::Idle => CaptureState::Idle,
            Mode::Capturing => CaptureState::Capturing,
            Mode::Reviewing => CaptureState::Reviewing,
            Mode::Editing(edit) => CaptureState::Editing { index: edit.index },
            Mode::Exporting => CaptureState::Exporting,
            Mode::Submitted => CaptureState::Submitted,
        }
    }

    /// Committed pages in capture order.
    pub fn pages(&self) -> &[Raster] {
        &self.pages
    }

    /// Number of committed pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Scratch copy of the page being edited, if any.
    pub fn current_edit(&self) -> Option<&Raster> {
        match &self.mode {
            Mode::Editing(edit) => Some(&edit.scratch),
            _ => None,
        }
    }

    /// Open the camera: `Idle -> Capturing`.
    pub fn begin_capture(&mut self) -> Result<(), CaptureError> {
        if !matches!(self.mode, Mode::Idle) {
            return Err(self.invalid_transition("begin capturing"));
        }
        self.mode = Mode::Capturing;
        Ok(())
    }

    /// Append a camera frame as the next page.
    pub fn capture_page(&mut self, frame: Raster) -> Result<(), CaptureError> {
        if !matches!(self.mode, Mode::Capturing) {
            return Err(self.invalid_transition("capture a page"));
        }
        self.pages.push(frame);
        Ok(())
    }

    /// Close the camera: `Capturing -> Reviewing`.
    pub fn finish_capture(&mut self) -> Result<(), CaptureError> {
        if !matches!(self.mode, Mode::Capturing) {
            return Err(self.invalid_transition("finish capturing"));
        }
        self.mode = Mode::Reviewing;
        Ok(())
    }

    /// Reopen the camera for more pages: `Reviewing -> Capturing`.
    pub fn resume_capture(&mut self) -> Result<(), CaptureError> {
        if !matches!(self.mode, Mode::Reviewing) {
            return Err(self.invalid_transition("resume capturing"));
        }
        self.mode = Mode::Capturing;
        Ok(())
    }

    /// Check a page out into a scratch copy: `Reviewing -> Editing`.
    pub fn edit_page(&mut self, index: usize) -> Result<(), CaptureError> {
        if !matches!(self.mode, Mode::Reviewing) {
            return Err(self.invalid_transition("edit a page"));
        }
        let Some(page) = self.pages.get(index) else {
            return Err(CaptureError::PageOutOfRange {
                index,
                pages: self.pages.len(),
            });
        };
        self.mode = Mode::Editing(EditingPage {
            index,
            scratch: page.clone(),
        });
        Ok(())
    }

    /// Rotate the scratch copy by a quarter turn.
    pub fn rotate_current(&mut self, rotation: Rotation) -> Result<(), CaptureError> {
        let Mode::Editing(edit) = &mut self.mode else {
            return Err(self.invalid_transition("rotate the page"));
        };
        edit.scratch = edit.scratch.rotated(rotation);
        Ok(())
    }

    /// Apply the brightness boost to the scratch copy.
    pub fn enhance_current(&mut self) -> Result<(), CaptureError> {
        let Mode::Editing(edit) = &mut self.mode else {
            return Err(self.invalid_transition("enhance the page"));
        };
        edit.scratch = edit.scratch.enhanced();
        Ok(())
    }

    /// Commit the scratch copy over the original page: `Editing -> Reviewing`.
    ///
    /// The commit is irreversible; the pre-edit pixels are gone.
    pub fn save_edit(&mut self) -> Result<(), CaptureError> {
        if !matches!(self.mode, Mode::Editing(_)) {
            return Err(self.invalid_transition("save the page edit"));
        }
        if let Mode::Editing(edit) = std::mem::replace(&mut self.mode, Mode::Reviewing) {
            // edit_page validated the index and pages are frozen while editing.
            self.pages[edit.index] = edit.scratch;
        }
        Ok(())
    }

    /// Discard the scratch copy: `Editing -> Reviewing`.
    pub fn cancel_edit(&mut self) -> Result<(), CaptureError> {
        if !matches!(self.mode, Mode::Editing(_)) {
            return Err(self.invalid_transition("cancel the page edit"));
        }
        self.mode = Mode::Reviewing;
        Ok(())
    }

    /// Drop one committed page while reviewing.
    pub fn remove_page(&mut self, index: usize) -> Result<(), CaptureError> {
        if !matches!(self.mode, Mode::Reviewing) {
            return Err(self.invalid_transition("remove a page"));
        }
        if index >= self.pages.len() {
            return Err(CaptureError::PageOutOfRange {
                index,
                pages: self.pages.len(),
            });
        }
        self.pages.remove(index);
        Ok(())
    }

    /// Render all pages to a PDF: `Reviewing -> Exporting`.
    ///
    /// Fails with [`CaptureError::NoPages`] when nothing was captured, and
    /// stays in `Reviewing` on any failure.
    pub fn export(
        &mut self,
        description: &str,
        timestamp_millis: i64,
    ) -> Result<ExportedScan, CaptureError> {
        if !matches!(self.mode, Mode::Reviewing) {
            return Err(self.invalid_transition("export the scan"));
        }
        if self.pages.is_empty() {
            return Err(CaptureError::NoPages);
        }
        let bytes = pdf::render_pdf(&self.pages)?;
        self.mode = Mode::Exporting;
        Ok(ExportedScan {
            file_name: export_file_name(description, timestamp_millis),
            bytes,
        })
    }

    /// Record that the exported PDF was uploaded: `Exporting -> Submitted`.
    pub fn mark_submitted(&mut self) -> Result<(), CaptureError> {
        if !matches!(self.mode, Mode::Exporting) {
            return Err(self.invalid_transition("mark the scan submitted"));
        }
        self.mode = Mode::Submitted;
        Ok(())
    }

    /// Return to review after a failed upload: `Exporting -> Reviewing`.
    pub fn reopen(&mut self) -> Result<(), CaptureError> {
        if !matches!(self.mode, Mode::Exporting) {
            return Err(self.invalid_transition("reopen the scan"));
        }
        self.mode = Mode::Reviewing;
        Ok(())
    }

    fn invalid_transition(&self, action: &'static str) -> CaptureError {
        CaptureError::InvalidTransition {
            state: self.state(),
            action,
        }
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Filename attached to an exported scan.
pub fn export_file_name(description: &str, timestamp_millis: i64) -> String {
    format!("Scan-{description}-{timestamp_millis}.pdf")
}

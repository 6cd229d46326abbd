//! Camera-capture pipeline assembling scanned pages into a PDF.
//!
//! The pipeline is pure: rasters in, PDF bytes out. A capture session is a
//! state machine so page edits cannot race the export, and no module here
//! performs I/O. Submission of the exported bytes goes through the regular
//! document upload flow.

pub mod capture;
pub mod pdf;
pub mod raster;

pub use self::capture::{CaptureError, CaptureSession, CaptureState, ExportedScan};
pub use self::pdf::{PdfError, render_pdf};
pub use self::raster::{CAPTURE_HEIGHT, CAPTURE_WIDTH, Raster, RasterError, Rotation};

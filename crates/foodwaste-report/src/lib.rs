//! Report rendering for food-waste search results: Danish-formatted HTML,
//! a PDF rendition of the same content, and the paired file output.

pub mod error;
pub mod fonts;
pub mod format;
pub mod html;
pub mod images;
pub mod output;
pub mod pdf;
pub mod summary;

pub use error::{ImageError, RenderError};
pub use html::{render_html, ReportMeta};
pub use images::{ImageFetcher, ProductImages};
pub use output::{file_token, write_report_pair, ReportPaths};
pub use pdf::render_pdf;
pub use summary::render_summary;

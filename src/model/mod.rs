//! Summary model types.
//!
//! These types carry the result of analyzing one PDF document, from the
//! per-page records up to the artifact that is written as JSON.

mod artifact;
mod document;
mod page;
mod table;

pub use artifact::{Artifact, ContentAnalysis, DocumentInfo, ExtractedData, PageSummary};
pub use document::{DocumentMetadata, DocumentStructure, Keyword};
pub use page::{Heading, HeadingKind, PageContent};
pub use table::Table;

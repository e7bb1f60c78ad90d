//! PDF access: the backend traits, their `lopdf` implementation, and the
//! text-position analysis used to find raw table grids.

mod backend;
mod spans;
mod table_grid;

pub use backend::{
    ImageRef, LopdfBackend, MetadataSource, PdfBackend, RawCell, RawMetadata, RawTable,
};
pub use spans::{extract_spans, TextSpan};
pub use table_grid::TableGridDetector;

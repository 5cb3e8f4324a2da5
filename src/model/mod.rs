//! Document model types.
//!
//! Everything here is plain data: page geometry as supplied by the
//! acquisition pipeline, the event metadata record, and the classified
//! row records the extractor produces.

mod event;
mod geometry;
mod page;
mod record;

pub use event::{derive_event_name, DisasterEvent, EventNamer};
pub use geometry::{BBox, Word};
pub use page::{DetectedTable, Page, TableCell, TableRow};
pub use record::{HierarchyContext, Level, RowRecord};

/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the errata domain isolated.
mod import_request;
mod import_summary;
mod source_format;

pub use import_request::{ChannelTargets, ImportRequest};
pub use import_summary::ImportSummary;
pub use source_format::SourceFormat;

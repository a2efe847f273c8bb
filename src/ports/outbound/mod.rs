/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the import pipeline uses
/// to interact with external systems (errata server, web, file system, console).
pub mod archive_fetcher;
pub mod description_repository;
pub mod errata_publisher;
pub mod errata_rpc;
pub mod package_metadata_reader;
pub mod package_resolver;
pub mod progress_reporter;

pub use archive_fetcher::ArchiveFetcher;
pub use description_repository::{AdvisoryText, DescriptionRepository};
pub use errata_publisher::{ErrataPublisher, PackageCatalog};
pub use errata_rpc::{
    Credentials, ErrataRpc, RpcError, RpcResult, SessionToken, NO_SUCH_ADVISORY_FAULT,
    SESSION_EXPIRED_FAULT,
};
pub use package_metadata_reader::PackageMetadataReader;
pub use package_resolver::{PackageResolver, ResolutionContext};
pub use progress_reporter::ProgressReporter;

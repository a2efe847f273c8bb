/// Mock implementations for testing
mod mock_archive_fetcher;
mod mock_errata_rpc;
mod mock_metadata_reader;
mod mock_progress_reporter;

#[allow(unused_imports)]
pub use mock_archive_fetcher::MockArchiveFetcher;
#[allow(unused_imports)]
pub use mock_errata_rpc::MockErrataRpc;
#[allow(unused_imports)]
pub use mock_metadata_reader::MockMetadataReader;
#[allow(unused_imports)]
pub use mock_progress_reporter::MockProgressReporter;

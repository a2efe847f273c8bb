//! errata-import - import CentOS errata announcements into a Spacewalk server
//!
//! This library reads errata announcements (a list digest, a monthly archive
//! file or the public web archive), resolves the packages they reference and
//! publishes one advisory per architecture through the errata server's
//! XML-RPC API. It follows a hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`errata`): advisory records, advisories, the advisory
//!   cache and the announcement parsers
//! - **Application Layer** (`application`): the import use case, package
//!   resolution strategies and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use errata_import::prelude::*;
//! use std::collections::HashMap;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let source = MessageSource::Digest {
//!     path: PathBuf::from("centos-announce-digest.txt"),
//!     parser: DigestParser::new(MessageParser::new("9")),
//! };
//! let records = source.parse().await?;
//!
//! let resolver = ResolverFactory::create(
//!     &["dir".to_string()],
//!     HashMap::new(),
//!     Arc::new(RpmHeaderReader::new()),
//! )?;
//! let use_case = ImportErrataUseCase::new(resolver, None, StderrProgressReporter::new());
//!
//! let session = SessionClient::connect(
//!     XmlRpcErrataClient::new("spacewalk.example.org")?,
//!     Credentials::new("admin", "secret"),
//! )
//! .await?;
//! let publisher = CachingPackageLookup::new(session);
//!
//! let request = ImportRequest::new("9", HashMap::new());
//! let summary = use_case.execute(&request, &records, &publisher).await?;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod errata;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::RpmHeaderReader;
    pub use crate::adapters::outbound::network::{
        CachingPackageLookup, HttpArchiveFetcher, RhnDescriptionClient, SessionClient,
        XmlRpcErrataClient,
    };
    pub use crate::application::dto::{ChannelTargets, ImportRequest, ImportSummary, SourceFormat};
    pub use crate::application::factories::{ResolverFactory, SourceFactory, SourceOptions};
    pub use crate::application::resolution::{ArchDirectories, SearchStrategy};
    pub use crate::application::use_cases::ImportErrataUseCase;
    pub use crate::errata::domain::{
        Advisory, AdvisoryCache, AdvisoryRecord, AdvisoryType, Architecture, PackageIdentity,
        PackageReference,
    };
    pub use crate::errata::parsers::{
        ArchiveFileParser, DigestParser, MailArchiveParser, MessageSource,
    };
    pub use crate::errata::services::MessageParser;
    pub use crate::ports::outbound::{
        ArchiveFetcher, Credentials, DescriptionRepository, ErrataPublisher, ErrataRpc,
        PackageCatalog, PackageMetadataReader, PackageResolver, ProgressReporter,
    };
    pub use crate::shared::error::{ErrataError, ExitCode};
    pub use crate::shared::Result;
}

pub mod advisory;
pub mod architecture;
pub mod cache;
pub mod package;
pub mod record;

pub use advisory::{Advisory, DEFAULT_DESCRIPTION, DEFAULT_SOLUTION};
pub use architecture::{Architecture, KNOWN_ARCHITECTURES};
pub use cache::AdvisoryCache;
pub use package::{PackageIdentity, PackageReference};
pub use record::{AdvisoryRecord, AdvisoryType, PackagesByArch};

/// Network adapters for the errata server and the web
mod caching_package_lookup;
mod description_client;
mod http_fetcher;
mod session;
pub mod xmlrpc;
mod xmlrpc_client;

pub use caching_package_lookup::CachingPackageLookup;
pub use description_client::RhnDescriptionClient;
pub use http_fetcher::HttpArchiveFetcher;
pub use session::SessionClient;
pub use xmlrpc_client::{XmlRpcErrataClient, API_PATH};

use crate::application::resolution::{ArchDirectories, LocalDirectory, SearchStrategy};
use crate::errata::domain::Architecture;
use crate::ports::outbound::PackageMetadataReader;
use crate::shared::error::ErrataError;
use std::collections::HashMap;
use std::sync::Arc;

/// Factory for building the package resolution chain
///
/// Turns the configured strategy names into a federated chain. It belongs in
/// the application layer as it selects infrastructure adapters based on
/// configuration.
pub struct ResolverFactory;

impl ResolverFactory {
    /// Creates the federated chain for the given strategy names, in order
    ///
    /// # Arguments
    /// * `names` - Strategy names as configured, e.g. `["dir"]`
    /// * `directories` - Package directories per architecture
    /// * `reader` - Package metadata reader for the local directory strategy
    ///
    /// # Errors
    /// Returns `ErrataError::Configuration` for an empty list, a deprecated
    /// strategy or an unknown strategy name
    pub fn create(
        names: &[String],
        directories: HashMap<Architecture, ArchDirectories>,
        reader: Arc<dyn PackageMetadataReader>,
    ) -> Result<SearchStrategy, ErrataError> {
        if names.is_empty() {
            return Err(ErrataError::configuration(
                "No search strategies configured",
                format!("Set search_strategies to [{}]", LocalDirectory::NAME),
            ));
        }

        let mut members = Vec::with_capacity(names.len());
        for name in names {
            let name = name.trim();
            if SearchStrategy::is_deprecated(name) {
                return Err(ErrataError::configuration(
                    format!("Search strategy '{}' is deprecated and can no longer be used", name),
                    format!("Use the '{}' strategy with local package directories", LocalDirectory::NAME),
                ));
            }
            match name {
                LocalDirectory::NAME => members.push(SearchStrategy::LocalDirectory(
                    LocalDirectory::new(directories.clone(), reader.clone()),
                )),
                other => {
                    return Err(ErrataError::configuration(
                        format!("Unknown search strategy '{}'", other),
                        format!("Valid strategies are: {}", LocalDirectory::NAME),
                    ))
                }
            }
        }

        log::debug!("Package resolution chain: {}", names.join(" -> "));
        Ok(SearchStrategy::Federated(members))
    }
}

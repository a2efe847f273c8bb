use crate::application::dto::{ImportRequest, ImportSummary};
use crate::errata::domain::{
    Advisory, AdvisoryCache, AdvisoryRecord, Architecture, PackageIdentity, PackageReference,
    DEFAULT_DESCRIPTION, DEFAULT_SOLUTION,
};
use crate::ports::outbound::{
    DescriptionRepository, ErrataPublisher, PackageResolver, ProgressReporter, ResolutionContext,
};
use crate::shared::Result;
use std::collections::HashSet;
use std::sync::Arc;

/// Distribution name used in product labels and notes
const DISTRIBUTION: &str = "CentOS";

/// What happened to one advisory during publishing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PublishOutcome {
    Published,
    SkippedExisting,
    SkippedMissingPackages,
    Failed,
}

/// ImportErrataUseCase - Core use case for importing errata
///
/// Turns parsed advisory records into per-architecture advisories and
/// publishes them through an ErrataPublisher.
///
/// # Type Parameters
/// * `RES` - PackageResolver implementation, normally the federated chain
/// * `PR` - ProgressReporter implementation
pub struct ImportErrataUseCase<RES, PR> {
    resolver: RES,
    descriptions: Option<Arc<dyn DescriptionRepository>>,
    progress_reporter: PR,
}

impl<RES, PR> ImportErrataUseCase<RES, PR>
where
    RES: PackageResolver,
    PR: ProgressReporter,
{
    /// Creates a new ImportErrataUseCase with injected dependencies.
    ///
    /// Upstream descriptions are only fetched when `descriptions` is set.
    pub fn new(
        resolver: RES,
        descriptions: Option<Arc<dyn DescriptionRepository>>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            resolver,
            descriptions,
            progress_reporter,
        }
    }

    /// Prepares and publishes the advisories of `records`
    pub async fn execute<P: ErrataPublisher>(
        &self,
        request: &ImportRequest,
        records: &[AdvisoryRecord],
        publisher: &P,
    ) -> Result<ImportSummary> {
        let cache = self.prepare(request, records).await?;
        Ok(self.publish(&cache, publisher).await)
    }

    /// Builds the advisory cache: one template per advisory and one complete
    /// advisory per architecture whose packages all resolved.
    pub async fn prepare(
        &self,
        request: &ImportRequest,
        records: &[AdvisoryRecord],
    ) -> Result<AdvisoryCache> {
        let mut cache = AdvisoryCache::new();

        self.progress_reporter
            .report(&format!("🔎 Preparing {} advisory record(s)", records.len()));

        for record in records {
            let Some(template) = self.prepare_template(request, &mut cache, record).await else {
                continue;
            };

            let context = ResolutionContext::new(&template.name, template.fast_track);
            let mut added = 0;

            for (architecture, references) in &record.packages {
                let channels = request.channels_for(architecture, template.fast_track);
                if channels.is_empty() {
                    log::info!(
                        "Errata {}: No {} channel configured for architecture '{}'. Skipping this architecture",
                        record.subject,
                        if template.fast_track { "fasttrack update" } else { "update" },
                        architecture
                    );
                    continue;
                }

                let Some(packages) = self
                    .resolve_architecture(&context, architecture, references)
                    .await
                else {
                    continue;
                };

                if packages.is_empty() {
                    log::info!(
                        "Errata {} has no binary packages for {}. Skipping this architecture",
                        template.name,
                        architecture
                    );
                    continue;
                }

                let mut advisory = template.clone();
                for channel in channels {
                    advisory.add_channel(channel);
                }
                advisory.packages = packages;
                cache.add_complete(architecture.clone(), advisory)?;
                added += 1;
            }

            if added == 0 {
                self.progress_reporter.report_error(&format!(
                    "Errata '{}' contains no architectures relevant to us. Skipping",
                    record.subject
                ));
            }
        }

        self.progress_reporter.report(&format!(
            "✅ Prepared {} advisory(ies) for {} architecture(s)",
            cache.complete_count(),
            cache.active_architectures().len()
        ));

        Ok(cache)
    }

    /// Builds (or refreshes) the architecture-independent template of a
    /// record and stores it in the cache.
    ///
    /// Returns `None` when the record targets another distribution version.
    async fn prepare_template(
        &self,
        request: &ImportRequest,
        cache: &mut AdvisoryCache,
        record: &AdvisoryRecord,
    ) -> Option<Advisory> {
        if record.target_version != request.target_version {
            log::info!(
                "Errata '{}' is inapplicable to the targeted {} release {}",
                record.subject,
                DISTRIBUTION,
                request.target_version
            );
            return None;
        }

        let name = record.advisory_name();
        let mut advisory = cache
            .template(&name)
            .cloned()
            .unwrap_or_else(|| Advisory::new(&name, record.advisory_type));

        advisory.advisory_type = record.advisory_type;
        advisory.publish = true;
        advisory.fast_track = record.is_fast_track();
        advisory.product = Some(format!("{} {}", DISTRIBUTION, record.target_version));
        advisory.topic = Some(record.canonical_url());
        advisory.synopsis = Some(match &record.severity {
            Some(severity) => format!("{}: {}", severity, record.synopsis),
            None => record.synopsis.clone(),
        });
        if let Some(date) = &record.date {
            advisory.notes = format!("Errata announced by {} on {}", DISTRIBUTION, date);
        }

        if advisory.description.is_none() {
            self.enrich(&mut advisory).await;
        }
        advisory
            .description
            .get_or_insert_with(|| DEFAULT_DESCRIPTION.to_string());
        advisory
            .solution
            .get_or_insert_with(|| DEFAULT_SOLUTION.to_string());

        cache.add_template(advisory.clone());
        Some(advisory)
    }

    async fn enrich(&self, advisory: &mut Advisory) {
        let (Some(descriptions), Some(url)) = (&self.descriptions, advisory.topic.clone()) else {
            return;
        };

        log::info!("Downloading upstream description for {}", advisory.name);
        match descriptions.fetch_description(&url).await {
            Ok(text) => {
                advisory.description = text.description;
                if advisory.solution.is_none() {
                    advisory.solution = text.solution;
                }
            }
            Err(e) => {
                log::warn!(
                    "Failed to download details for {}, using defaults: {}",
                    advisory.name,
                    e
                );
            }
        }
    }

    /// Resolves every binary package of one architecture.
    ///
    /// Returns `None` as soon as one package cannot be resolved or resolves
    /// to an incomplete identity; packages resolved before it are discarded.
    async fn resolve_architecture(
        &self,
        context: &ResolutionContext,
        architecture: &Architecture,
        references: &[PackageReference],
    ) -> Option<Vec<PackageIdentity>> {
        let mut packages = Vec::new();

        for reference in references.iter().filter(|r| r.is_resolvable()) {
            match self.resolver.resolve(context, architecture, reference).await {
                Ok(Some(package)) if package.is_complete() => packages.push(package),
                Ok(Some(package)) => {
                    self.progress_reporter.report_error(&format!(
                        "Package {} resolved to incomplete metadata ({}). Skipping errata {} for {}",
                        reference.filename(),
                        package.nvra(),
                        context.advisory_name,
                        architecture
                    ));
                    return None;
                }
                Ok(None) => {
                    self.progress_reporter.report_error(&format!(
                        "Searching for package {} failed. Skipping errata {} for {}",
                        reference.filename(),
                        context.advisory_name,
                        architecture
                    ));
                    return None;
                }
                Err(e) => {
                    self.progress_reporter.report_error(&format!(
                        "Searching for package {} failed: {}. Skipping errata {} for {}",
                        reference.filename(),
                        e,
                        context.advisory_name,
                        architecture
                    ));
                    return None;
                }
            }
        }

        Some(packages)
    }

    /// Publishes every complete advisory of the cache, at most once per
    /// advisory name.
    ///
    /// Failures on one advisory are reported and the loop moves on.
    pub async fn publish<P: ErrataPublisher>(
        &self,
        cache: &AdvisoryCache,
        publisher: &P,
    ) -> ImportSummary {
        let mut summary = ImportSummary::default();
        let mut created: HashSet<String> = HashSet::new();
        let total = cache.complete_count();
        let mut current = 0;

        for architecture in cache.active_architectures() {
            for advisory in cache.complete_for_architecture(architecture) {
                current += 1;
                self.progress_reporter.report_progress(
                    current,
                    total,
                    Some(&format!("{} ({})", advisory.name, architecture)),
                );

                let outcome = if created.contains(&advisory.name) {
                    log::info!(
                        "Advisory {} was created earlier in this run, skipping {}",
                        advisory.name,
                        architecture
                    );
                    PublishOutcome::SkippedExisting
                } else {
                    self.publish_one(advisory, architecture, publisher).await
                };

                match outcome {
                    PublishOutcome::Published => {
                        created.insert(advisory.name.clone());
                        summary.published += 1;
                    }
                    PublishOutcome::SkippedExisting => summary.skipped_existing += 1,
                    PublishOutcome::SkippedMissingPackages => summary.skipped_missing_packages += 1,
                    PublishOutcome::Failed => summary.failed += 1,
                }
            }
        }

        self.progress_reporter
            .report_completion(&format!("✅ Import finished: {}", summary));
        summary
    }

    async fn publish_one<P: ErrataPublisher>(
        &self,
        advisory: &Advisory,
        architecture: &Architecture,
        publisher: &P,
    ) -> PublishOutcome {
        match publisher.advisory_exists(&advisory.name).await {
            Ok(true) => {
                log::info!("Advisory {} already exists on the server", advisory.name);
                return PublishOutcome::SkippedExisting;
            }
            Ok(false) => {}
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "Failed to check advisory {}: {:#}",
                    advisory.name, e
                ));
                return PublishOutcome::Failed;
            }
        }

        let mut advisory = advisory.clone();
        let mut missing = Vec::new();

        for package in advisory.packages.iter_mut().filter(|p| p.remote_id.is_none()) {
            match publisher.find_package(package).await {
                Ok(found) => match found.and_then(|p| p.remote_id) {
                    Some(id) => package.remote_id = Some(id),
                    None => missing.push(package.nvra()),
                },
                Err(e) => {
                    self.progress_reporter.report_error(&format!(
                        "Failed to look up package {} for {}: {:#}",
                        package.nvra(),
                        advisory.name,
                        e
                    ));
                    return PublishOutcome::Failed;
                }
            }
        }

        if !missing.is_empty() {
            self.progress_reporter.report_error(&format!(
                "Skipping {} for {}: packages not present on the server: {}",
                advisory.name,
                architecture,
                missing.join(", ")
            ));
            return PublishOutcome::SkippedMissingPackages;
        }

        match publisher.create_advisory(&advisory).await {
            Ok(()) => {
                self.progress_reporter.report(&format!(
                    "📦 Created advisory {} ({}) in {}",
                    advisory.name,
                    architecture,
                    advisory.channels().join(", ")
                ));
                PublishOutcome::Published
            }
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "Failed to create advisory {}: {:#}",
                    advisory.name, e
                ));
                PublishOutcome::Failed
            }
        }
    }
}

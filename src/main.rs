mod cli;
mod settings;

use cli::Args;
use errata_import::adapters::outbound::console::StderrProgressReporter;
use errata_import::adapters::outbound::filesystem::RpmHeaderReader;
use errata_import::adapters::outbound::network::{
    CachingPackageLookup, HttpArchiveFetcher, RhnDescriptionClient, SessionClient,
    XmlRpcErrataClient,
};
use errata_import::application::factories::{ResolverFactory, SourceFactory};
use errata_import::application::use_cases::ImportErrataUseCase;
use errata_import::config::{discover_config, load_config_from_path, ConfigFile};
use errata_import::errata::domain::AdvisoryCache;
use errata_import::errata::services::MessageParser;
use errata_import::ports::outbound::{ArchiveFetcher, DescriptionRepository};
use errata_import::shared::error::{ErrataError, ExitCode};
use errata_import::shared::Result;
use settings::Settings;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(exit_code(&e).as_i32());
    }
}

fn exit_code(error: &anyhow::Error) -> ExitCode {
    error
        .downcast_ref::<ErrataError>()
        .map(ErrataError::exit_code)
        .unwrap_or(ExitCode::ApplicationError)
}

fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => Ok(Some(load_config_from_path(path)?)),
        None => discover_config(&std::env::current_dir()?),
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let settings = Settings::resolve(&args, config)?;

    if args.show_config {
        print!("{}", settings.to_yaml()?);
        return Ok(());
    }

    settings.check_directories()?;

    // Create adapters (Dependency Injection)
    let fetcher: Arc<dyn ArchiveFetcher> = Arc::new(HttpArchiveFetcher::new()?);
    let parser = MessageParser::with_list_tag(&settings.target_version, &settings.list_tag);
    let source = SourceFactory::create(settings.source_options(), parser, fetcher.clone())?;

    log::info!("Reading advisories from {}", source.describe());
    let records = source.parse().await?;
    eprintln!("📖 Found {} relevant advisory record(s)", records.len());

    let resolver = ResolverFactory::create(
        &settings.search_strategies,
        settings.directories(),
        Arc::new(RpmHeaderReader::new()),
    )?;
    let descriptions = settings.scrape_descriptions.then(|| {
        Arc::new(RhnDescriptionClient::new(fetcher.clone())) as Arc<dyn DescriptionRepository>
    });

    // Create use case with injected dependencies
    let use_case = ImportErrataUseCase::new(resolver, descriptions, StderrProgressReporter::new());
    let request = settings.import_request();

    if settings.test {
        let cache = use_case.prepare(&request, &records).await?;
        print_prepared(&cache);
        return Ok(());
    }

    let (host, credentials) = settings.credentials()?;
    let session = SessionClient::connect(XmlRpcErrataClient::new(&host)?, credentials)
        .await
        .map_err(|e| e.context(format!("Failed to connect to errata server {}", host)))?;
    let publisher = CachingPackageLookup::new(session);

    let summary = use_case.execute(&request, &records, &publisher).await?;
    log::info!("Import summary: {}", summary);

    Ok(())
}

/// Test mode output: every advisory that would be published
fn print_prepared(cache: &AdvisoryCache) {
    for architecture in cache.active_architectures() {
        println!("== {} ==", architecture);
        for advisory in cache.complete_for_architecture(architecture) {
            println!(
                "{} [{}] {}",
                advisory.name,
                advisory.advisory_type,
                advisory.synopsis.as_deref().unwrap_or_default()
            );
            println!("  channels: {}", advisory.channels().join(", "));
            for package in &advisory.packages {
                println!(
                    "  {} ({})",
                    package.nvra(),
                    package.path.as_deref().unwrap_or("-")
                );
            }
        }
    }
    if cache.complete_count() == 0 {
        println!("No advisories to publish");
    }
}

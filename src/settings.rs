//! Effective settings of a run: the configuration file merged with the
//! command line, which takes precedence.

use crate::cli::Args;
use errata_import::application::dto::{ChannelTargets, ImportRequest, SourceFormat};
use errata_import::application::factories::SourceOptions;
use errata_import::application::resolution::{ArchDirectories, LocalDirectory};
use errata_import::config::{ArchitectureConfig, ConfigFile, ServerConfig};
use errata_import::errata::domain::Architecture;
use errata_import::errata::parsers::{DEFAULT_MAIL_ARCHIVE_URL, DEFAULT_MAX_ERRATA};
use errata_import::errata::services::DEFAULT_LIST_TAG;
use errata_import::ports::outbound::Credentials;
use errata_import::shared::error::ErrataError;
use errata_import::shared::paths::check_package_dir;
use errata_import::shared::Result;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

const MASKED_PASSWORD: &str = "********";

#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub target_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    pub list_tag: String,
    #[serde(serialize_with = "as_display")]
    pub format: SourceFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    pub search_strategies: Vec<String>,
    pub max_errata: usize,
    pub scrape_descriptions: bool,
    pub mail_archive_url: String,
    pub server: ServerConfig,
    /// Interpolated per-architecture settings
    pub architectures: BTreeMap<String, ArchitectureConfig>,
    #[serde(skip)]
    pub test: bool,
}

fn as_display<S>(format: &SourceFormat, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(format)
}

impl Settings {
    /// Merges the command line over the configuration file.
    ///
    /// # Errors
    /// Returns `ErrataError::Configuration` if no target version is given
    pub fn resolve(
        args: &Args,
        config: Option<ConfigFile>,
    ) -> std::result::Result<Self, ErrataError> {
        let config = config.unwrap_or_default();

        let target_version = args
            .target_version
            .clone()
            .or(config.target_version)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ErrataError::configuration(
                    "No target version configured",
                    "Pass --target-version or set target_version in errata-import.config.yml",
                )
            })?;

        let format = match (args.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(label)) => label.parse::<SourceFormat>().map_err(|e| {
                ErrataError::configuration(e, "Use digest, archive or mail-archive")
            })?,
            (None, None) => SourceFormat::default(),
        };

        let max_errata = args
            .max_errata
            .or(config.max_errata)
            .unwrap_or(DEFAULT_MAX_ERRATA);
        if max_errata == 0 {
            return Err(ErrataError::configuration(
                "--max-errata must be greater than 0",
                "Omit the option to use the default limit",
            ));
        }

        let search_strategies = args
            .search_strategies
            .clone()
            .or(config.search_strategies)
            .unwrap_or_else(|| vec![LocalDirectory::NAME.to_string()]);

        let server = config.server.unwrap_or_default();
        let server = ServerConfig {
            host: args.server.clone().or(server.host),
            login: args.login.clone().or(server.login),
            password: args.password.clone().or(server.password),
        };

        let architectures = config
            .architectures
            .unwrap_or_default()
            .into_iter()
            .map(|(arch, values)| {
                let values = values.interpolated(&target_version, config.release.as_deref());
                (arch, values)
            })
            .collect();

        Ok(Self {
            target_version,
            release: config.release,
            list_tag: config
                .list_tag
                .unwrap_or_else(|| DEFAULT_LIST_TAG.to_string()),
            format,
            input: args.input.clone(),
            search_strategies,
            max_errata,
            scrape_descriptions: args.scrape_descriptions
                || config.scrape_descriptions.unwrap_or(false),
            mail_archive_url: args
                .mail_archive_url
                .clone()
                .or(config.mail_archive_url)
                .unwrap_or_else(|| DEFAULT_MAIL_ARCHIVE_URL.to_string()),
            server,
            architectures,
            test: args.test,
        })
    }

    /// Effective settings as YAML, with the password masked
    pub fn to_yaml(&self) -> Result<String> {
        let mut shown = self.clone();
        if shown.server.password.is_some() {
            shown.server.password = Some(MASKED_PASSWORD.to_string());
        }
        Ok(serde_yaml_ng::to_string(&shown)?)
    }

    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            format: self.format,
            input: self.input.clone(),
            mail_archive_url: self.mail_archive_url.clone(),
            max_errata: self.max_errata,
        }
    }

    pub fn import_request(&self) -> ImportRequest {
        let channels = self
            .architectures
            .iter()
            .map(|(arch, values)| {
                (
                    Architecture::new(arch.as_str()),
                    ChannelTargets::from_lists(
                        values.channel.as_deref(),
                        values.fasttrack_channel.as_deref(),
                    ),
                )
            })
            .collect();
        ImportRequest::new(&self.target_version, channels)
    }

    pub fn directories(&self) -> HashMap<Architecture, ArchDirectories> {
        self.architectures
            .iter()
            .map(|(arch, values)| {
                (
                    Architecture::new(arch.as_str()),
                    ArchDirectories::new(
                        values.package_dir.as_deref().map(PathBuf::from),
                        values.fasttrack_package_dir.as_deref().map(PathBuf::from),
                    ),
                )
            })
            .collect()
    }

    /// Checks the configured package directories before any work starts.
    ///
    /// Problems with existing entries are logged; in test mode they are
    /// fatal. The `dir` strategy needs a package directory for every
    /// architecture with a channel, and a fast-track directory wherever a
    /// fast-track channel is configured.
    ///
    /// # Errors
    /// Returns `ErrataError::Configuration` describing the first fatal problem
    pub fn check_directories(&self) -> std::result::Result<(), ErrataError> {
        let mut problems = Vec::new();
        for (arch, values) in &self.architectures {
            let configured = [
                ("package_dir", &values.package_dir),
                ("fasttrack_package_dir", &values.fasttrack_package_dir),
            ];
            for (field, dir) in configured {
                let Some(dir) = dir else { continue };
                if let Some(problem) = check_package_dir(PathBuf::from(dir).as_path()) {
                    log::warn!("{} for {}: {} {}", field, arch, dir, problem);
                    problems.push(format!("{}.{} ({} {})", arch, field, dir, problem));
                }
            }
        }

        if self.test && !problems.is_empty() {
            return Err(ErrataError::configuration(
                format!("Package directory problems: {}", problems.join(", ")),
                "Fix the package directories before running in test mode",
            ));
        }

        if self
            .search_strategies
            .iter()
            .any(|s| s.trim() == LocalDirectory::NAME)
        {
            for (arch, values) in &self.architectures {
                if values.channel.is_some() && values.package_dir.is_none() {
                    return Err(ErrataError::configuration(
                        format!("No package directory configured for {}", arch),
                        format!(
                            "The '{}' search strategy needs architectures.{}.package_dir",
                            LocalDirectory::NAME,
                            arch
                        ),
                    ));
                }
                if values.fasttrack_channel.is_some() && values.fasttrack_package_dir.is_none() {
                    return Err(ErrataError::configuration(
                        format!("No fast-track package directory configured for {}", arch),
                        format!(
                            "The '{}' search strategy needs architectures.{}.fasttrack_package_dir",
                            LocalDirectory::NAME,
                            arch
                        ),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Server host and login credentials
    ///
    /// # Errors
    /// Returns `ErrataError::Configuration` naming the first missing value
    pub fn credentials(&self) -> std::result::Result<(String, Credentials), ErrataError> {
        let missing = |what: &str, option: &str| {
            ErrataError::configuration(
                format!("No errata server {} configured", what),
                format!("Pass {} or set server.{} in the config file", option, what),
            )
        };
        let host = self.server.host.clone().ok_or_else(|| missing("host", "--server"))?;
        let login = self.server.login.clone().ok_or_else(|| missing("login", "--login"))?;
        let password = self
            .server
            .password
            .clone()
            .ok_or_else(|| missing("password", "--password or ERRATA_IMPORT_PASSWORD"))?;
        Ok((host, Credentials::new(login, password)))
    }
}

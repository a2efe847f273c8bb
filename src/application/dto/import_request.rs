use crate::errata::domain::Architecture;
use std::collections::HashMap;

/// Publish channels configured for one architecture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelTargets {
    pub channels: Vec<String>,
    pub fasttrack_channels: Vec<String>,
}

impl ChannelTargets {
    /// Builds targets from comma separated channel lists
    pub fn from_lists(channels: Option<&str>, fasttrack_channels: Option<&str>) -> Self {
        Self {
            channels: split_channels(channels),
            fasttrack_channels: split_channels(fasttrack_channels),
        }
    }

    /// Channels for regular or fast-track advisories
    pub fn for_advisory(&self, fast_track: bool) -> &[String] {
        if fast_track {
            &self.fasttrack_channels
        } else {
            &self.channels
        }
    }
}

fn split_channels(list: Option<&str>) -> Vec<String> {
    list.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// ImportRequest - Internal request DTO for the errata import use case
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Distribution major version the advisories must target
    pub target_version: String,
    /// Publish channels per architecture
    pub channels: HashMap<Architecture, ChannelTargets>,
}

impl ImportRequest {
    pub fn new(
        target_version: impl Into<String>,
        channels: HashMap<Architecture, ChannelTargets>,
    ) -> Self {
        Self {
            target_version: target_version.into(),
            channels,
        }
    }

    pub fn channels_for(&self, architecture: &Architecture, fast_track: bool) -> &[String] {
        self.channels
            .get(architecture)
            .map(|targets| targets.for_advisory(fast_track))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_lists_are_split_and_trimmed() {
        let targets = ChannelTargets::from_lists(Some("c9-updates, c9-extras,,"), None);

        assert_eq!(targets.channels, vec!["c9-updates", "c9-extras"]);
        assert!(targets.fasttrack_channels.is_empty());
    }

    #[test]
    fn test_channels_for_architecture() {
        let mut channels = HashMap::new();
        channels.insert(
            Architecture::new("x86_64"),
            ChannelTargets::from_lists(Some("c9-updates"), Some("c9-fasttrack")),
        );
        let request = ImportRequest::new("9", channels);

        assert_eq!(
            request.channels_for(&Architecture::new("x86_64"), false),
            ["c9-updates".to_string()]
        );
        assert_eq!(
            request.channels_for(&Architecture::new("x86_64"), true),
            ["c9-fasttrack".to_string()]
        );
        assert!(request.channels_for(&Architecture::new("i686"), false).is_empty());
    }
}

//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use strap::config::{Config, ConfigMerger};
///
/// let low = Config { manifest_file: Some("low".to_string()), ..Default::default() };
/// let high = Config { manifest_file: Some("high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.manifest_file.as_deref(), Some("high"));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge configuration sources into a single config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Every field is replaced whole when the source sets it. Command
    /// templates and the preflight list are never combined element-wise.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.root.is_some() {
            target.root.clone_from(&source.root);
        }

        if source.manifest_file.is_some() {
            target.manifest_file.clone_from(&source.manifest_file);
        }

        if source.defaults_file.is_some() {
            target.defaults_file.clone_from(&source.defaults_file);
        }

        if source.symlinks_dir.is_some() {
            target.symlinks_dir.clone_from(&source.symlinks_dir);
        }

        if source.link_target.is_some() {
            target.link_target.clone_from(&source.link_target);
        }

        if source.installer.is_some() {
            target.installer.clone_from(&source.installer);
        }

        if source.defaults_applier.is_some() {
            target.defaults_applier.clone_from(&source.defaults_applier);
        }

        if source.linker.is_some() {
            target.linker.clone_from(&source.linker);
        }

        if source.preflight.is_some() {
            target.preflight.clone_from(&source.preflight);
        }

        if source.skip_preflight.is_some() {
            target.skip_preflight = source.skip_preflight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::CommandTemplate;
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from("/test/config.yaml"),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(vec![]), Config::default());
    }

    #[test]
    fn test_merge_higher_precedence_wins() {
        let low = Config {
            manifest_file: Some("Low".to_string()),
            defaults_file: Some("low.yml".to_string()),
            ..Default::default()
        };
        let high = Config {
            manifest_file: Some("High".to_string()),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, low), source(2, high)]);
        assert_eq!(merged.manifest_file.as_deref(), Some("High"));
        assert_eq!(merged.defaults_file.as_deref(), Some("low.yml"));
    }

    #[test]
    fn test_merge_preflight_replaced_whole() {
        let mut target = Config {
            preflight: Some(vec![
                CommandTemplate::new("a", Vec::<String>::new()),
                CommandTemplate::new("b", Vec::<String>::new()),
            ]),
            ..Default::default()
        };
        let source = Config {
            preflight: Some(vec![CommandTemplate::new("c", Vec::<String>::new())]),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        let programs: Vec<&str> = target
            .preflight
            .as_ref()
            .unwrap()
            .iter()
            .map(|t| t.program.as_str())
            .collect();
        assert_eq!(programs, ["c"]);
    }

    #[test]
    fn test_merge_explicit_false_overrides_true() {
        let mut target = Config {
            skip_preflight: Some(true),
            ..Default::default()
        };
        let source = Config {
            skip_preflight: Some(false),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.skip_preflight, Some(false));
    }
}

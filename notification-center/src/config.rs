use std::{collections::BTreeMap, path::Path};

use chrono::Duration;
use domain_notification::{
    exception::NotificationResult,
    model::vo::{NotificationKind, NotificationPreferences, PreferenceLevel},
};
use getset::Getters;
use serde::Deserialize;

use crate::telemetry::TelemetryConfig;

const CONFIG: &str = "config";
const CONFIG_ENV_PREFIX: &str = "NOTIFICATION";
const CONFIG_ENV_SEPARATOR: &str = "__";
const MAX_DOSSIER_DEPOSE_DELAY_DAYS: i64 = 365;

#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct NotificationCenterConfig {
    #[serde(default)]
    telemetry: TelemetryConfig,
    #[serde(default)]
    notification: NotificationConfig,
}

#[derive(Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct NotificationConfig {
    /// Days a submitted dossier waits before it is announced to the instructors.
    #[serde(default = "NotificationConfig::default_dossier_depose_delay_days")]
    dossier_depose_delay_days: i64,
    /// Levels used when an instructor never saved preferences for a procedure, keyed by kind
    /// name. Kinds left out keep the system default.
    #[serde(default)]
    #[getset(skip)]
    default_preferences: BTreeMap<String, PreferenceLevel>,
}

impl NotificationConfig {
    fn default_dossier_depose_delay_days() -> i64 {
        7
    }

    /// Fails when the configured delay is negative or longer than a year.
    pub fn dossier_depose_delay(&self) -> anyhow::Result<Duration> {
        let days = self.dossier_depose_delay_days;
        anyhow::ensure!(
            (0..=MAX_DOSSIER_DEPOSE_DELAY_DAYS).contains(&days),
            "dossier_depose_delay_days must be between 0 and {MAX_DOSSIER_DEPOSE_DELAY_DAYS}, got {days}"
        );
        Duration::try_days(days)
            .ok_or_else(|| anyhow::anyhow!("dossier_depose_delay_days out of range: {days}"))
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.dossier_depose_delay()?;
        self.default_preferences()?;
        Ok(())
    }

    pub fn default_preferences(&self) -> NotificationResult<NotificationPreferences> {
        let mut preferences = NotificationPreferences::system_default();
        for (kind, level) in &self.default_preferences {
            preferences.set(kind.parse::<NotificationKind>()?, *level);
        }
        Ok(preferences)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dossier_depose_delay_days: Self::default_dossier_depose_delay_days(),
            default_preferences: Default::default(),
        }
    }
}

impl NotificationCenterConfig {
    /// Read `config.yaml` from the working directory, then `path` when given, then the
    /// `NOTIFICATION__` environment variables. Later sources win.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder().add_source(
            config::File::with_name(CONFIG)
                .required(false)
                .format(config::FileFormat::Yaml),
        );
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Yaml)
                    .required(true),
            );
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator(CONFIG_ENV_SEPARATOR)
                    .separator(CONFIG_ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;
        let config: Self = config.try_deserialize()?;
        config.notification.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()?;
        let config: Self = config.try_deserialize()?;
        config.notification.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use domain_notification::exception::NotificationException;
    use indoc::indoc;

    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = NotificationCenterConfig::from_yaml("{}").unwrap();
        assert_eq!(*config.notification().dossier_depose_delay_days(), 7);
        assert_eq!(
            config.notification().default_preferences().unwrap(),
            NotificationPreferences::system_default()
        );
        assert!(config.telemetry().enable);
    }

    #[test]
    fn partial_preference_table_keeps_other_defaults() {
        let config = NotificationCenterConfig::from_yaml(indoc! {"
            notification:
              dossier_depose_delay_days: 3
              default_preferences:
                message: all
        "})
        .unwrap();
        let notification = config.notification();
        assert_eq!(notification.dossier_depose_delay().unwrap(), Duration::days(3));
        let preferences = notification.default_preferences().unwrap();
        assert_eq!(preferences.level(NotificationKind::Message), PreferenceLevel::All);
        assert_eq!(
            preferences.level(NotificationKind::AvisExterne),
            PreferenceLevel::Followed
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let error = NotificationCenterConfig::from_yaml(indoc! {"
            notification:
              default_preferences:
                dossier_supprime: all
        "})
        .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<NotificationException>(),
            Some(NotificationException::UnknownKind { .. })
        ));
    }

    #[test]
    fn negative_depose_delay_is_rejected() {
        let error = NotificationCenterConfig::from_yaml(indoc! {"
            notification:
              dossier_depose_delay_days: -30
        "})
        .unwrap_err();
        assert!(error.to_string().contains("got -30"));
    }

    #[test]
    fn oversized_depose_delay_is_rejected() {
        assert!(NotificationCenterConfig::from_yaml(indoc! {"
            notification:
              dossier_depose_delay_days: 9223372036854775807
        "})
        .is_err());
        assert!(NotificationCenterConfig::from_yaml(indoc! {"
            notification:
              dossier_depose_delay_days: 366
        "})
        .is_err());
        let config = NotificationCenterConfig::from_yaml(indoc! {"
            notification:
              dossier_depose_delay_days: 365
        "})
        .unwrap();
        assert_eq!(
            config.notification().dossier_depose_delay().unwrap(),
            Duration::days(365)
        );
    }
}

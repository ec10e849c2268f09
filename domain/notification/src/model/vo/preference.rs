use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::NotificationKind;
use crate::exception::NotificationException;

/// How much an instructor wants to hear about one notification kind on one procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceLevel {
    /// Notify whether or not the instructor follows the dossier.
    All,
    /// Notify only while the instructor follows the dossier.
    Followed,
    /// Never notify.
    None,
}

impl PreferenceLevel {
    /// Whether an instructor with this level is notified, given its follow state.
    pub fn notifies(self, following: bool) -> bool {
        match self {
            PreferenceLevel::All => true,
            PreferenceLevel::Followed => following,
            PreferenceLevel::None => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceLevel::All => "all",
            PreferenceLevel::Followed => "followed",
            PreferenceLevel::None => "none",
        }
    }
}

impl fmt::Display for PreferenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceLevel {
    type Err = NotificationException;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(PreferenceLevel::All),
            "followed" => Ok(PreferenceLevel::Followed),
            "none" => Ok(PreferenceLevel::None),
            _ => Err(NotificationException::UnknownPreferenceLevel { name: s.to_owned() }),
        }
    }
}

/// Preference level per notification kind.
///
/// A kind missing from the map falls back to the system default table, so a partially
/// stored or partially configured map is always complete when read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationPreferences(BTreeMap<NotificationKind, PreferenceLevel>);

impl NotificationPreferences {
    /// System default table: new dossiers are announced to every instructor of the group,
    /// everything else only to followers.
    pub fn system_default() -> Self {
        Self(
            NotificationKind::ALL
                .into_iter()
                .map(|kind| (kind, system_default_level(kind)))
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn level(&self, kind: NotificationKind) -> PreferenceLevel {
        self.0.get(&kind).copied().unwrap_or_else(|| system_default_level(kind))
    }

    pub fn set(&mut self, kind: NotificationKind, level: PreferenceLevel) {
        self.0.insert(kind, level);
    }

    pub fn with_level(mut self, kind: NotificationKind, level: PreferenceLevel) -> Self {
        self.set(kind, level);
        self
    }

    /// Fill the kinds missing here with the ones of `defaults`.
    pub fn merged_over(mut self, defaults: &NotificationPreferences) -> Self {
        for (kind, level) in defaults.0.iter() {
            self.0.entry(*kind).or_insert(*level);
        }
        self
    }

    /// Kinds whose level is exactly `level`, in importance order.
    pub fn kinds_with(&self, level: PreferenceLevel) -> Vec<NotificationKind> {
        NotificationKind::ALL
            .into_iter()
            .filter(|kind| self.level(*kind) == level)
            .collect()
    }
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self::system_default()
    }
}

impl FromIterator<(NotificationKind, PreferenceLevel)> for NotificationPreferences {
    fn from_iter<T: IntoIterator<Item = (NotificationKind, PreferenceLevel)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn system_default_level(kind: NotificationKind) -> PreferenceLevel {
    match kind {
        NotificationKind::DossierDepose => PreferenceLevel::All,
        _ => PreferenceLevel::Followed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_default_table() {
        let defaults = NotificationPreferences::system_default();
        assert_eq!(defaults.level(NotificationKind::DossierDepose), PreferenceLevel::All);
        assert_eq!(
            defaults.kinds_with(PreferenceLevel::Followed),
            NotificationKind::ALL[1..].to_vec()
        );
        assert!(defaults.kinds_with(PreferenceLevel::None).is_empty());
    }

    #[test]
    fn missing_kind_reads_default() {
        let prefs: NotificationPreferences =
            [(NotificationKind::Message, PreferenceLevel::None)].into_iter().collect();
        assert_eq!(prefs.level(NotificationKind::Message), PreferenceLevel::None);
        assert_eq!(prefs.level(NotificationKind::AvisExterne), PreferenceLevel::Followed);
    }

    #[test]
    fn merge_keeps_own_levels() {
        let defaults = NotificationPreferences::empty()
            .with_level(NotificationKind::Message, PreferenceLevel::All)
            .with_level(NotificationKind::AttenteAvis, PreferenceLevel::None);
        let merged = NotificationPreferences::empty()
            .with_level(NotificationKind::Message, PreferenceLevel::Followed)
            .merged_over(&defaults);
        assert_eq!(merged.level(NotificationKind::Message), PreferenceLevel::Followed);
        assert_eq!(merged.level(NotificationKind::AttenteAvis), PreferenceLevel::None);
    }

    #[test]
    fn level_follow_semantics() {
        assert!(PreferenceLevel::All.notifies(false));
        assert!(PreferenceLevel::Followed.notifies(true));
        assert!(!PreferenceLevel::Followed.notifies(false));
        assert!(!PreferenceLevel::None.notifies(true));
    }

    #[test]
    fn deserialize_from_map() {
        let prefs: NotificationPreferences =
            serde_json::from_str(r#"{"message":"all","dossier_depose":"none"}"#).unwrap();
        assert_eq!(prefs.level(NotificationKind::Message), PreferenceLevel::All);
        assert_eq!(prefs.level(NotificationKind::DossierDepose), PreferenceLevel::None);
        assert_eq!("followed".parse::<PreferenceLevel>().unwrap(), PreferenceLevel::Followed);
    }
}

use std::{collections::HashMap, sync::Arc};

use courier_di::Build;
use courier_shared_contracts::settings::{Setting, SettingsService};

#[derive(Debug, Clone, Build)]
pub struct SettingsServiceImpl {
    config: SettingsServiceConfig,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsServiceConfig {
    values: Arc<HashMap<Setting, String>>,
}

impl SettingsServiceConfig {
    /// Creates the config from optional values. Blank values count as unset.
    pub fn new(values: impl IntoIterator<Item = (Setting, Option<String>)>) -> Self {
        let values = values
            .into_iter()
            .filter_map(|(setting, value)| {
                value
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (setting, value))
            })
            .collect();

        Self {
            values: Arc::new(values),
        }
    }
}

impl SettingsService for SettingsServiceImpl {
    fn get(&self, setting: Setting) -> Option<String> {
        self.config.values.get(&setting).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get() {
        let sut = SettingsServiceImpl {
            config: SettingsServiceConfig::new([
                (Setting::ContactAddress, Some("contact@example.com".into())),
                (Setting::ContactName, Some("  ".into())),
                (Setting::SiteUrl, None),
            ]),
        };

        assert_eq!(
            sut.get(Setting::ContactAddress).as_deref(),
            Some("contact@example.com")
        );
        assert_eq!(sut.get(Setting::ContactName), None);
        assert_eq!(sut.get(Setting::SiteUrl), None);
        assert_eq!(sut.get(Setting::AdminEmail), None);
    }
}

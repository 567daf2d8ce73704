use courier_api_rest::RestServerConfig;
use courier_config::Config;
use courier_core_health_impl::HealthFeatureConfig;
use courier_di::provider;
use courier_shared_contracts::settings::Setting;
use courier_shared_impl::{
    settings::SettingsServiceConfig, transient_state::TransientStateServiceConfig,
};
use types::{Cache, Email};

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        cache: Cache,
        email: Email,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Shared
            SettingsServiceConfig,
            TransientStateServiceConfig,

            // Core
            HealthFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, cache: Cache, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            cache,
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Shared
        settings_service_config: SettingsServiceConfig,
        transient_state_service_config: TransientStateServiceConfig,

        // Core
        health_feature_config: HealthFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
            honeypot_field: config.contact.honeypot_field.as_str().into(),
        };

        // Shared
        let settings_service_config = SettingsServiceConfig::new([
            (Setting::ContactAddress, config.contact.address.clone()),
            (Setting::ContactName, config.contact.name.clone()),
            (Setting::AdminEmail, config.site.admin_email.clone()),
            (Setting::SiteUrl, config.site.url.clone()),
        ]);

        let transient_state_service_config = TransientStateServiceConfig {
            ttl: config.contact.transient_state_ttl.into(),
        };

        // Core
        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Self {
            _cache: Default::default(),

            // API
            rest_server_config,

            // Shared
            settings_service_config,
            transient_state_service_config,

            // Core
            health_feature_config,
        }
    }
}

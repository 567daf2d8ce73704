use courier_cache_valkey::ValkeyCache;
use courier_core_contact_impl::ContactFeatureServiceImpl;
use courier_core_health_impl::HealthFeatureServiceImpl;
use courier_email_impl::EmailServiceImpl;
use courier_shared_impl::{
    settings::SettingsServiceImpl, time::TimeServiceImpl,
    transient_state::TransientStateServiceImpl,
};

// API
pub type RestServer = courier_api_rest::RestServer<HealthFeature, ContactFeature>;

// Cache
pub type Cache = ValkeyCache;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type Settings = SettingsServiceImpl;
pub type Time = TimeServiceImpl;
pub type TransientState = TransientStateServiceImpl<Cache>;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Cache, Email>;

pub type ContactFeature = ContactFeatureServiceImpl<Email, Settings, TransientState>;

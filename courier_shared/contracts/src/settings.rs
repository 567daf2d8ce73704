/// Site settings that operators may leave unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// Address that receives contact form notifications.
    ContactAddress,
    /// Display name of the contact address.
    ContactName,
    /// Address of the site administrator.
    AdminEmail,
    /// Public URL of the site.
    SiteUrl,
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SettingsService: Send + Sync + 'static {
    /// Returns the value of the given setting, or `None` if it is not set.
    fn get(&self, setting: Setting) -> Option<String>;
}

#[cfg(feature = "mock")]
impl MockSettingsService {
    pub fn with_get(mut self, setting: Setting, value: Option<&str>) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(setting))
            .return_const(value.map(String::from));
        self
    }
}

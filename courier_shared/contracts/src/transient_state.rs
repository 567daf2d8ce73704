use std::{collections::HashMap, future::Future};

use courier_models::transient_state::TransientStateKey;

/// Per-client storage for values that have to survive exactly until the next
/// page render, e.g. the result of a form submission followed by a redirect.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TransientStateService: Send + Sync + 'static {
    /// Replaces all values stored for the client with `values`.
    ///
    /// Values of a previous call are dropped, so readers only ever see one
    /// complete set of values.
    fn replace(
        &self,
        key: &TransientStateKey,
        values: HashMap<String, String>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Returns and removes all values stored for the client.
    fn take(
        &self,
        key: &TransientStateKey,
    ) -> impl Future<Output = anyhow::Result<HashMap<String, String>>> + Send;
}

#[cfg(feature = "mock")]
impl MockTransientStateService {
    pub fn with_replace(mut self, key: TransientStateKey, values: &[(&str, &str)]) -> Self {
        let values = values
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.to_owned()))
            .collect::<HashMap<_, _>>();
        self.expect_replace()
            .once()
            .with(
                mockall::predicate::eq(key),
                mockall::predicate::eq(values),
            )
            .return_once(|_, _| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_replace_error(mut self, key: TransientStateKey) -> Self {
        self.expect_replace()
            .once()
            .with(mockall::predicate::eq(key), mockall::predicate::always())
            .return_once(|_, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "connection refused"
                ))))
            });
        self
    }

    pub fn with_take(mut self, key: TransientStateKey, result: HashMap<String, String>) -> Self {
        self.expect_take()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}

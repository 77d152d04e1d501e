//! Resource collaborator and its memoizing cache
//!
//! Field names come from an external backend. The [`ResourceCache`] keeps
//! one shared future per distinct request, so concurrent identical lookups
//! wait on a single fetch and later ones reuse its result.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dialect::Dialect;
use crate::error::{ResourceError, Result};

/// Region and account a lookup is scoped to
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceScope {
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl ResourceScope {
    /// Create a new scope
    pub fn new(region: impl Into<String>, account_id: Option<String>) -> Self {
        Self {
            region: region.into(),
            account_id,
        }
    }
}

/// Backend that resolves dynamic names
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Deduplicated field names valid for the given groups
    async fn field_names(
        &self,
        dialect: Dialect,
        scope: &ResourceScope,
        groups: &[String],
    ) -> Result<Vec<String>>;

    /// Names of the template variables currently defined
    async fn template_variables(&self) -> Result<Vec<String>>;
}

type FieldNames = Arc<Vec<String>>;
type SharedFetch = Shared<BoxFuture<'static, std::result::Result<FieldNames, String>>>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheKey<'a> {
    dialect: Dialect,
    region: &'a str,
    account_id: Option<&'a str>,
    groups: &'a [String],
}

/// Process-wide memo of field lookups
pub struct ResourceCache {
    provider: Arc<dyn ResourceProvider>,
    entries: Mutex<HashMap<String, SharedFetch>>,
}

impl ResourceCache {
    /// Create a new cache in front of `provider`
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            provider,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Field names for a request, fetched at most once per distinct key.
    ///
    /// A failed fetch is evicted so the next request retries it.
    pub async fn field_names(
        &self,
        dialect: Dialect,
        scope: &ResourceScope,
        groups: &[String],
    ) -> Result<FieldNames> {
        let key = serde_json::to_string(&CacheKey {
            dialect,
            region: &scope.region,
            account_id: scope.account_id.as_deref(),
            groups,
        })?;

        let fetch = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            match entries.get(&key) {
                Some(fetch) => {
                    debug!(key = %key, "Resource cache hit");
                    fetch.clone()
                }
                None => {
                    debug!(key = %key, "Resource cache miss");
                    let fetch = self.start_fetch(dialect, scope.clone(), groups.to_vec());
                    entries.insert(key.clone(), fetch.clone());
                    fetch
                }
            }
        };

        match fetch.clone().await {
            Ok(fields) => Ok(fields),
            Err(message) => {
                let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
                if entries.get(&key).is_some_and(|stored| stored.ptr_eq(&fetch)) {
                    entries.remove(&key);
                }
                Err(ResourceError::Unavailable(message).into())
            }
        }
    }

    /// Template variable names; not cached, they change with the host's state
    pub async fn template_variables(&self) -> Result<Vec<String>> {
        self.provider.template_variables().await
    }

    /// Number of cached or in-flight lookups
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached lookup
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn start_fetch(&self, dialect: Dialect, scope: ResourceScope, groups: Vec<String>) -> SharedFetch {
        let provider = Arc::clone(&self.provider);
        async move {
            provider
                .field_names(dialect, &scope, &groups)
                .await
                .map(Arc::new)
                .map_err(|e| {
                    warn!(dialect = %dialect, region = %scope.region, "Field lookup failed: {}", e);
                    e.to_string()
                })
        }
        .boxed()
        .shared()
    }
}

/// Provider backed by a fixed catalog, as loaded from the configuration file
#[derive(Debug, Clone, Default)]
pub struct StaticResourceProvider {
    /// Field names per group
    fields: HashMap<String, Vec<String>>,
    variables: Vec<String>,
}

impl StaticResourceProvider {
    /// Create a new provider
    pub fn new(fields: HashMap<String, Vec<String>>, variables: Vec<String>) -> Self {
        Self { fields, variables }
    }
}

#[async_trait]
impl ResourceProvider for StaticResourceProvider {
    async fn field_names(
        &self,
        _dialect: Dialect,
        scope: &ResourceScope,
        groups: &[String],
    ) -> Result<Vec<String>> {
        if scope.region.trim().is_empty() {
            return Err(ResourceError::UnsupportedScope("empty region".to_string()).into());
        }

        let mut names: Vec<String> = Vec::new();
        for group in groups {
            let fields = self
                .fields
                .get(group)
                .ok_or_else(|| ResourceError::UnknownGroup(group.clone()))?;
            for field in fields {
                if !names.contains(field) {
                    names.push(field.clone());
                }
            }
        }
        Ok(names)
    }

    async fn template_variables(&self) -> Result<Vec<String>> {
        Ok(self.variables.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::error::QlError;

    /// Provider counting its calls, failing the first `failures` of them
    struct CountingProvider {
        calls: AtomicUsize,
        failures: usize,
    }

    impl CountingProvider {
        fn new(failures: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures,
            }
        }
    }

    #[async_trait]
    impl ResourceProvider for CountingProvider {
        async fn field_names(
            &self,
            _dialect: Dialect,
            _scope: &ResourceScope,
            _groups: &[String],
        ) -> Result<Vec<String>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if call < self.failures {
                return Err(ResourceError::Unavailable("backend down".to_string()).into());
            }
            Ok(vec!["@field".to_string(), "@message".to_string()])
        }

        async fn template_variables(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    fn scope() -> ResourceScope {
        ResourceScope::new("us-east-1", None)
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_fetch() {
        let provider = Arc::new(CountingProvider::new(0));
        let cache = ResourceCache::new(provider.clone());
        let groups = vec!["app".to_string()];
        let scope = scope();

        let lookups = (0..5).map(|_| cache.field_names(Dialect::Logs, &scope, &groups));
        let results = futures::future::join_all(lookups).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        for result in results {
            assert_eq!(result.unwrap().as_slice(), ["@field", "@message"]);
        }

        // Completed results are reused as well
        cache.field_names(Dialect::Logs, &scope, &groups).await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_separately() {
        let provider = Arc::new(CountingProvider::new(0));
        let cache = ResourceCache::new(provider.clone());
        let a = vec!["a".to_string()];
        let b = vec!["b".to_string()];

        cache.field_names(Dialect::Logs, &scope(), &a).await.unwrap();
        cache.field_names(Dialect::Logs, &scope(), &b).await.unwrap();
        cache.field_names(Dialect::Sql, &scope(), &a).await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_evicted() {
        let provider = Arc::new(CountingProvider::new(1));
        let cache = ResourceCache::new(provider.clone());
        let groups = vec!["app".to_string()];

        let err = cache
            .field_names(Dialect::Logs, &scope(), &groups)
            .await
            .unwrap_err();
        assert!(matches!(err, QlError::Resource(ResourceError::Unavailable(_))));
        assert!(cache.is_empty());

        let fields = cache
            .field_names(Dialect::Logs, &scope(), &groups)
            .await
            .unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_static_provider_dedups_across_groups() {
        let mut fields = HashMap::new();
        fields.insert(
            "app".to_string(),
            vec!["@timestamp".to_string(), "@message".to_string()],
        );
        fields.insert(
            "web".to_string(),
            vec!["@message".to_string(), "status".to_string()],
        );
        let provider = StaticResourceProvider::new(fields, vec!["env".to_string()]);

        let names = provider
            .field_names(
                Dialect::Logs,
                &scope(),
                &["app".to_string(), "web".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(names, vec!["@timestamp", "@message", "status"]);

        let variables = provider.template_variables().await.unwrap();
        assert_eq!(variables, vec!["env"]);
    }

    #[tokio::test]
    async fn test_static_provider_errors() {
        let provider = StaticResourceProvider::default();
        let err = provider
            .field_names(Dialect::Logs, &scope(), &["missing".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QlError::Resource(ResourceError::UnknownGroup(ref g)) if g == "missing"
        ));

        let err = provider
            .field_names(Dialect::Logs, &ResourceScope::default(), &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QlError::Resource(ResourceError::UnsupportedScope(_))
        ));
    }

    #[test]
    fn test_clear() {
        let provider = Arc::new(CountingProvider::new(0));
        let cache = ResourceCache::new(provider);
        tokio_test::block_on(cache.field_names(Dialect::Ppl, &scope(), &[])).unwrap();
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}

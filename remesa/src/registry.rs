use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use remesa_core::{ProviderCallArgs, QuoteProvider, QuoteRequest, RemesaError};

/// Immutable, ordered set of providers known to an orchestrator.
///
/// Built once by [`RemesaBuilder`](crate::RemesaBuilder) and shared read-only
/// by every request. Registration order is the tie-break order for ranking.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn QuoteProvider>>,
}

impl ProviderRegistry {
    /// Validate and freeze a provider list.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when the list is empty or two providers share a name.
    pub fn new(providers: Vec<Arc<dyn QuoteProvider>>) -> Result<Self, RemesaError> {
        if providers.is_empty() {
            return Err(RemesaError::invalid_config(
                "no providers registered; add at least one via with_provider(...)",
            ));
        }
        let mut seen = HashSet::with_capacity(providers.len());
        for p in &providers {
            if !seen.insert(p.name()) {
                return Err(RemesaError::invalid_config(format!(
                    "duplicate provider name {:?}",
                    p.name()
                )));
            }
        }
        Ok(Self { providers })
    }

    /// Providers in registry order, minus any whose name is in `exclude`.
    #[must_use]
    pub fn list_active(&self, exclude: &BTreeSet<String>) -> Vec<Arc<dyn QuoteProvider>> {
        self.providers
            .iter()
            .filter(|p| !exclude.contains(p.name()))
            .cloned()
            .collect()
    }

    /// Translate `req` into call arguments for `provider_id`.
    ///
    /// Unknown ids fall back to the canonical field mapping.
    ///
    /// # Errors
    /// Returns `MissingParameter` when the provider requires a field the
    /// request does not carry.
    pub fn adapt(
        &self,
        provider_id: &str,
        req: &QuoteRequest,
    ) -> Result<ProviderCallArgs, RemesaError> {
        self.get(provider_id).map_or_else(
            || Ok(ProviderCallArgs::canonical(req)),
            |p| p.adapt(req),
        )
    }

    /// Look up a provider by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn QuoteProvider>> {
        self.providers.iter().find(|p| p.name() == name).cloned()
    }

    /// Provider names in registry order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Always false for a registry built through [`ProviderRegistry::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Rs256, SigningMethod};

/// Signing methods keyed by algorithm name.
#[derive(Clone, Default)]
pub struct SigningMethodRegistry {
    methods: BTreeMap<String, Arc<dyn SigningMethod>>,
}

impl SigningMethodRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the software `RS256` method
    #[must_use]
    pub fn with_standard() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(Rs256));
        registry
    }

    /// Register `method` under its current `alg()`, returning the method it
    /// replaced.
    pub fn register(&mut self, method: Arc<dyn SigningMethod>) -> Option<Arc<dyn SigningMethod>> {
        let alg = method.alg().to_string();
        log::debug!("Registering signing method {alg}");
        self.methods.insert(alg, method)
    }

    #[must_use]
    pub fn get(&self, alg: &str) -> Option<Arc<dyn SigningMethod>> {
        self.methods.get(alg).cloned()
    }

    /// Registered algorithm names in sorted order
    #[must_use]
    pub fn algorithms(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for SigningMethodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningMethodRegistry")
            .field(&self.algorithms())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = SigningMethodRegistry::with_standard();
        assert_eq!(registry.algorithms(), vec!["RS256"]);
        assert!(registry.get("RS256").is_some());
        assert!(registry.get("HS256").is_none());
        assert!(SigningMethodRegistry::new().algorithms().is_empty());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = SigningMethodRegistry::with_standard();
        let previous = registry.register(Arc::new(Rs256));
        assert_eq!(previous.map(|m| m.alg().to_string()).as_deref(), Some("RS256"));
        assert_eq!(registry.algorithms().len(), 1);
    }
}

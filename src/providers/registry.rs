// Provider registry - built-in and user-registered model profiles

use crate::providers::profile::{
    ProviderKind, ProviderProfile, ResolutionMode, NATIVE_URL_TEMPLATE,
};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Lazily initialized built-in table
static BUILTIN_PROFILES: OnceLock<HashMap<&'static str, ProviderProfile>> = OnceLock::new();

fn builtin_profiles() -> &'static HashMap<&'static str, ProviderProfile> {
    BUILTIN_PROFILES.get_or_init(|| {
        let mut m = HashMap::new();

        // Native Chutes models with strict prompt-only payloads
        m.insert("z-image-turbo", ProviderProfile::native());
        m.insert("flux-dev-schnell", ProviderProfile::native());

        // Native models that accept a wider payload
        m.insert(
            "chroma",
            ProviderProfile {
                kind: ProviderKind::Native,
                url_template: NATIVE_URL_TEMPLATE.to_string(),
                supports_negative_prompt: true,
                resolution_mode: ResolutionMode::WidthHeight,
            },
        );
        m.insert(
            "neta-lumina",
            ProviderProfile {
                kind: ProviderKind::Native,
                url_template: NATIVE_URL_TEMPLATE.to_string(),
                supports_negative_prompt: true,
                resolution_mode: ResolutionMode::ResolutionString,
            },
        );

        // Third-party models reached through the unified endpoint
        m.insert("Illustrij", ProviderProfile::unified());
        m.insert("JuggernautXL", ProviderProfile::unified());
        m.insert("animagine-xl", ProviderProfile::unified());

        m
    })
}

/// Model-name → profile table: a fixed built-in set plus user-registered
/// entries persisted through the configuration layer.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    custom: HashMap<String, ProviderProfile>,
}

impl ProviderRegistry {
    /// Build a registry over the user-extended table loaded from
    /// configuration.
    pub fn new(custom: HashMap<String, ProviderProfile>) -> Self {
        Self { custom }
    }

    /// Resolve a model name to its profile.
    ///
    /// Lookup order: exact built-in match, case-insensitive built-in match,
    /// exact match in the user table. No fuzzier matching than case-folding.
    pub fn lookup(&self, model: &str) -> Option<&ProviderProfile> {
        let builtin = builtin_profiles();
        if let Some(profile) = builtin.get(model) {
            return Some(profile);
        }
        if let Some(profile) = builtin
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(model))
            .map(|(_, profile)| profile)
        {
            return Some(profile);
        }
        self.custom.get(model)
    }

    /// Add or overwrite a user-table entry. The entry is durable only once
    /// the configuration layer has saved it back to disk.
    pub fn register(&mut self, model: impl Into<String>, profile: ProviderProfile) {
        self.custom.insert(model.into(), profile);
    }

    /// The user-extended table, in persistence form.
    pub fn custom(&self) -> &HashMap<String, ProviderProfile> {
        &self.custom
    }

    /// Built-in model names, sorted for display.
    pub fn builtin_models() -> Vec<&'static str> {
        let mut names: Vec<_> = builtin_profiles().keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_builtin_lookup() {
        let registry = ProviderRegistry::default();
        let profile = registry.lookup("z-image-turbo").unwrap();
        assert_eq!(profile.kind, ProviderKind::Native);
        assert_eq!(profile.resolution_mode, ResolutionMode::None);
    }

    #[test]
    fn test_case_insensitive_builtin_lookup() {
        let registry = ProviderRegistry::default();
        let profile = registry.lookup("illustrij").unwrap();
        assert_eq!(profile.kind, ProviderKind::Unified);
        assert_eq!(
            profile,
            registry.lookup("ILLUSTRIJ").unwrap(),
            "case variants resolve to the same profile"
        );
    }

    #[test]
    fn test_user_table_lookup_is_exact_only() {
        let mut registry = ProviderRegistry::default();
        registry.register("my-model", ProviderProfile::unified());

        assert!(registry.lookup("my-model").is_some());
        assert!(
            registry.lookup("MY-MODEL").is_none(),
            "user table entries do not case-fold"
        );
    }

    #[test]
    fn test_builtin_shadows_user_entry() {
        let mut registry = ProviderRegistry::default();
        registry.register("z-image-turbo", ProviderProfile::unified());

        // Built-in table wins; the user entry only matters for unknown names.
        let profile = registry.lookup("z-image-turbo").unwrap();
        assert_eq!(profile.kind, ProviderKind::Native);
    }

    #[test]
    fn test_register_overwrites() {
        let mut registry = ProviderRegistry::default();
        registry.register("m", ProviderProfile::native());
        registry.register("m", ProviderProfile::unified());

        assert_eq!(registry.lookup("m").unwrap().kind, ProviderKind::Unified);
        assert_eq!(registry.custom().len(), 1);
    }

    #[test]
    fn test_unknown_model_not_found() {
        let registry = ProviderRegistry::default();
        assert!(registry.lookup("no-such-model").is_none());
    }
}

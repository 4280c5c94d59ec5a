// Providers and models the LLM form offers. The backend does not expose a
// catalogue endpoint yet, so this is the single source of truth.

pub struct ProviderModels {
    pub provider: &'static str,
    pub models: &'static [&'static str],
}

pub const MODEL_CATALOG: &[ProviderModels] = &[ProviderModels {
    provider: "Open AI",
    models: &["gpt-3", "gpt-4", "gpt-4o"],
}];

pub fn providers() -> impl Iterator<Item = &'static str> {
    MODEL_CATALOG.iter().map(|p| p.provider)
}

pub fn models_for(provider: &str) -> Option<&'static [&'static str]> {
    MODEL_CATALOG
        .iter()
        .find(|p| p.provider == provider)
        .map(|p| p.models)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ai_lists_gpt_4o() {
        assert!(models_for("Open AI").unwrap().contains(&"gpt-4o"));
        assert!(models_for("Nope").is_none());
        assert_eq!(providers().count(), MODEL_CATALOG.len());
    }
}

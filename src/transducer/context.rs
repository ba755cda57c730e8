use crate::mappings::MappingSet;

/// Per-batch conversion configuration. Built once, passed read-only to
/// every unit's conversion; never mutated mid-run.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    pub library: String,
    pub docs_url: Option<String>,
    pub mappings: MappingSet,
    /// Prefix mapped library calls with `await`, per the target library's
    /// asynchronous client convention.
    pub await_mapped_calls: bool,
}

impl ConversionContext {
    pub fn new(library: impl Into<String>, mappings: MappingSet) -> Self {
        Self {
            library: library.into(),
            docs_url: None,
            mappings,
            await_mapped_calls: true,
        }
    }

    pub fn with_docs_url(mut self, docs_url: impl Into<String>) -> Self {
        self.docs_url = Some(docs_url.into());
        self
    }

    pub fn with_await_convention(mut self, await_mapped_calls: bool) -> Self {
        self.await_mapped_calls = await_mapped_calls;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = ConversionContext::new("@azure/ai-agents", MappingSet::new());
        assert_eq!(ctx.library, "@azure/ai-agents");
        assert!(ctx.docs_url.is_none());
        assert!(ctx.await_mapped_calls);
    }

    #[test]
    fn test_builders() {
        let ctx = ConversionContext::new("lib", MappingSet::new())
            .with_docs_url("https://example.com/docs")
            .with_await_convention(false);
        assert_eq!(ctx.docs_url.as_deref(), Some("https://example.com/docs"));
        assert!(!ctx.await_mapped_calls);
    }
}

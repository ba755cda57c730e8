//! Batch orchestration: fetch, discover, merge mappings, convert each unit,
//! restore path order.
//!
//! Fetch and packaging problems are batch-level failures; a single unit
//! only ever degrades to annotated output, and discovery failures silently
//! fall back to the built-in mapping table.

use tracing::{debug, info};

use crate::discovery::MethodDiscoverer;
use crate::error::Result;
use crate::fetch::SampleSource;
use crate::mappings;
use crate::output::{BatchSummary, ConvertedUnit};
use crate::transducer::{self, ConversionContext};

/// Package-definition files carry no sample code worth porting.
const SKIPPED_FILES: &[&str] = &["__init__.py"];

pub struct Pipeline<'a> {
    fetcher: &'a dyn SampleSource,
    discoverer: &'a dyn MethodDiscoverer,
}

impl<'a> Pipeline<'a> {
    pub fn new(fetcher: &'a dyn SampleSource, discoverer: &'a dyn MethodDiscoverer) -> Self {
        Self {
            fetcher,
            discoverer,
        }
    }

    pub fn run(
        &self,
        repo_url: &str,
        library: &str,
        docs_url: Option<&str>,
    ) -> Result<Vec<ConvertedUnit>> {
        info!(repo_url, library, "starting conversion");

        let mut units = self.fetcher.fetch_units(repo_url)?;
        // Completion order must not affect archive layout.
        units.sort_by(|a, b| a.path.cmp(&b.path));

        let discovered = docs_url
            .map(|url| self.discoverer.discover(url))
            .unwrap_or_default();
        let merged = mappings::resolve(library, discovered);

        let mut context = ConversionContext::new(library, merged);
        if let Some(url) = docs_url {
            context = context.with_docs_url(url);
        }

        let converted: Vec<ConvertedUnit> = units
            .iter()
            .filter(|unit| !SKIPPED_FILES.contains(&unit.name.as_str()))
            .map(|unit| {
                debug!(path = %unit.path, "converting sample");
                let output = transducer::convert(&unit.content, &context);
                ConvertedUnit::new(unit.path.clone(), output)
            })
            .collect();

        info!(count = converted.len(), "conversion completed");
        Ok(converted)
    }
}

pub fn summarize(units: &[ConvertedUnit]) -> BatchSummary {
    BatchSummary::from_units(units)
}

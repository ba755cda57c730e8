//! Ports Python code samples to JavaScript-looking text: fetches `.py`
//! files from a GitHub repository subfolder, optionally scrapes a
//! documentation page for method-name mappings, runs each file through a
//! line-oriented rule transducer, and packages the results.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod mappings;
pub mod output;
pub mod pipeline;
pub mod transducer;

pub use error::{Error, Result};
pub use mappings::MappingSet;
pub use transducer::{convert, ConversionContext, FallbackAnnotation, TransduceOutput};

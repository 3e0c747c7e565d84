pub mod address;
pub mod encoding;
pub mod error;
pub mod fetch;
pub mod html;
pub mod labels;
pub mod merge;
pub mod mine;
pub mod normalize;
pub mod pipeline;
pub mod rules;
pub mod selector;
pub mod structured;
pub mod xpath;

pub use error::{ExtractError, FetchError};
pub use fetch::{DocumentFetcher, FetchedDocument, FileFetcher, HttpFetcher};
pub use merge::{merge, FieldRule, Policy, Source, SourceValues, Strategy, FIELD_REGISTRY};
pub use normalize::{normalize_text, TextNormalizer};
pub use pipeline::{extract_document, extract_html, Extraction};
pub use structured::{extract_structured, StructuredData};

pub mod page_extractor;

pub use page_extractor::{site_domain, PageExtractor, PageSignals};

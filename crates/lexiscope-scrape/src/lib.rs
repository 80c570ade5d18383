//! Lexiscope Scrape: page fetching and main-content extraction for
//! analyzing a URL instead of pasted text.

pub mod extractor;
pub mod html;

pub use extractor::{normalize_url, ExtractedPage, PageExtractor};
pub use html::{clean_content, parse_page, ParsedPage};

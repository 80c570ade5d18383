//! HTML to readable text.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Elements whose text never counts as page content.
const EXCLUDED: &[&str] = &["script", "style", "nav", "footer", "header", "aside", "noscript"];

/// Elements that break the text flow. Inline elements join their
/// neighbours directly, so `W<b>or</b>d` reads as one word.
const BLOCKS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "section",
    "article", "main", "blockquote", "pre", "table", "tr", "td", "th", "dd", "dt", "figcaption",
];

/// Containers tried in order for the main content.
const MAIN_SELECTORS: &[&str] = &[
    "main",
    "article",
    r#"[role="main"]"#,
    ".content",
    ".post-content",
    ".entry-content",
    ".article-content",
    "#content",
    "#main",
];

static MAIN: Lazy<Vec<Selector>> = Lazy::new(|| {
    MAIN_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("valid selector"))
        .collect()
});
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).expect("valid selector"));
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("valid selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").expect("valid selector"));

static BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)cookie\s+policy|privacy\s+policy|terms\s+of\s+service|subscribe\s+to\s+our\s+newsletter|follow\s+us\s+on|share\s+this\s+article|read\s+more|continue\s+reading|advertisement|ad\s+content",
    )
    .expect("valid regex")
});

/// Title and raw main text of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPage {
    pub title: String,
    pub content: String,
}

pub fn parse_page(html: &str) -> ParsedPage {
    let doc = Html::parse_document(html);
    ParsedPage {
        title: extract_title(&doc),
        content: extract_main_content(&doc),
    }
}

fn extract_title(doc: &Html) -> String {
    if let Some(title) = doc.select(&TITLE).next() {
        return collapse(&title.text().collect::<String>());
    }
    if let Some(content) = doc
        .select(&OG_TITLE)
        .next()
        .and_then(|meta| meta.value().attr("content"))
    {
        return content.trim().to_string();
    }
    if let Some(h1) = doc.select(&H1).find(|el| !is_excluded(el)) {
        return collapse(&visible_text(h1));
    }
    "Untitled".to_string()
}

fn extract_main_content(doc: &Html) -> String {
    for selector in MAIN.iter() {
        if let Some(el) = doc.select(selector).find(|el| !is_excluded(el)) {
            return visible_text(el);
        }
    }

    let paragraphs: Vec<String> = doc
        .select(&PARAGRAPH)
        .filter(|el| !is_excluded(el))
        .map(visible_text)
        .collect();
    if !paragraphs.is_empty() {
        return paragraphs.join(" ");
    }

    match doc.select(&BODY).next() {
        Some(body) => visible_text(body),
        None => visible_text(doc.root_element()),
    }
}

/// Whether `el` is itself, or sits inside, a non-content element.
fn is_excluded(el: &ElementRef<'_>) -> bool {
    EXCLUDED.contains(&el.value().name())
        || el
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|a| EXCLUDED.contains(&a.value().name()))
}

fn visible_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(el, &mut out);
    out
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if EXCLUDED.contains(&name) {
                continue;
            }
            let block = BLOCKS.contains(&name);
            if block {
                out.push(' ');
            }
            collect_text(child_el, out);
            if block {
                out.push(' ');
            }
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace and strip common site boilerplate.
pub fn clean_content(raw: &str) -> String {
    let collapsed = collapse(raw);
    collapse(&BOILERPLATE.replace_all(&collapsed, ""))
}

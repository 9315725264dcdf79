use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

use crate::domain::models::HeadingCounts;

/// Tokens this short are not counted as words.
const MIN_WORD_CHARS: usize = 3;

/// SEO signals pulled out of a single HTML document.
///
/// `PageSignals::default()` doubles as the "page could not be fetched" record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSignals {
    pub title: Option<String>,
    pub description: Option<String>,
    pub has_og_tags: bool,
    pub has_twitter_cards: bool,
    pub og_image: Option<String>,
    pub word_count: u32,
    pub headings: HeadingCounts,
    pub h1_text: Vec<String>,
    pub images_with_alt: u32,
    pub images_without_alt: u32,
    pub internal_links: u32,
    pub external_links: u32,
    pub has_viewport: bool,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub has_schema: bool,
}

impl PageSignals {
    pub fn title_len(&self) -> usize {
        self.title.as_deref().map(|t| t.chars().count()).unwrap_or(0)
    }

    pub fn description_len(&self) -> usize {
        self.description.as_deref().map(|d| d.chars().count()).unwrap_or(0)
    }
}

/// Host of `url` without a leading `www.`, used as the audited domain.
pub fn site_domain(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn normalize_text(text: &str) -> String {
    whitespace().replace_all(text.trim(), " ").into_owned()
}

pub struct PageExtractor;

impl PageExtractor {
    /// Best-effort extraction. Never fails: anything missing comes back empty.
    pub fn extract(html: &str, base_url: &Url) -> PageSignals {
        let document = Html::parse_document(html);
        let domain = site_domain(base_url);
        let headings = Self::count_headings(&document);
        let (images_with_alt, images_without_alt) = Self::count_images(&document);
        let (internal_links, external_links) = Self::count_links(&document, base_url, &domain);

        PageSignals {
            title: Self::extract_title(&document),
            description: Self::extract_meta_description(&document),
            has_og_tags: Self::has_match(&document, Self::og_selector()),
            has_twitter_cards: Self::has_match(&document, Self::twitter_selector()),
            og_image: Self::extract_og_image(&document),
            word_count: Self::extract_word_count(&document),
            headings,
            h1_text: Self::extract_h1_text(&document),
            images_with_alt,
            images_without_alt,
            internal_links,
            external_links,
            has_viewport: Self::has_match(&document, Self::viewport_selector()),
            canonical: Self::extract_canonical(&document),
            robots: Self::extract_robots(&document),
            has_schema: Self::has_match(&document, Self::schema_selector()),
        }
    }

    pub fn extract_title(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("title").unwrap());
        html.select(selector)
            .next()
            .map(|el| normalize_text(&el.text().collect::<String>()))
            .filter(|s| !s.is_empty())
    }

    pub fn extract_meta_description(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector =
            SELECTOR.get_or_init(|| Selector::parse("meta[name='description']").unwrap());
        Self::first_attr(html, selector, "content")
    }

    pub fn extract_canonical(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("link[rel='canonical']").unwrap());
        Self::first_attr(html, selector, "href")
    }

    pub fn extract_robots(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("meta[name='robots']").unwrap());
        Self::first_attr(html, selector, "content")
    }

    pub fn extract_og_image(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector =
            SELECTOR.get_or_init(|| Selector::parse("meta[property='og:image']").unwrap());
        Self::first_attr(html, selector, "content")
    }

    /// Words in `<body>` with script/style content removed. Tokens of two
    /// characters or fewer are skipped, so this undercounts on purpose.
    pub fn extract_word_count(html: &Html) -> u32 {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("body").unwrap());
        html.select(selector)
            .next()
            .map(|body| {
                Self::visible_text(body)
                    .split_whitespace()
                    .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
                    .count() as u32
            })
            .unwrap_or(0)
    }

    pub fn count_headings(html: &Html) -> HeadingCounts {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("h1, h2, h3").unwrap());

        html.select(selector)
            .fold(HeadingCounts::default(), |mut counts, el| {
                match el.value().name() {
                    "h1" => counts.h1 += 1,
                    "h2" => counts.h2 += 1,
                    _ => counts.h3 += 1,
                }
                counts
            })
    }

    pub fn extract_h1_text(html: &Html) -> Vec<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("h1").unwrap());
        html.select(selector)
            .map(|el| normalize_text(&el.text().collect::<String>()))
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Returns `(with_alt, without_alt)`. Blank alt text counts as missing.
    pub fn count_images(html: &Html) -> (u32, u32) {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("img").unwrap());

        html.select(selector).fold((0, 0), |(with, without), img| {
            let has_alt = img
                .value()
                .attr("alt")
                .map(|a| !a.trim().is_empty())
                .unwrap_or(false);
            if has_alt {
                (with + 1, without)
            } else {
                (with, without + 1)
            }
        })
    }

    /// Returns `(internal, external)` anchor counts relative to `domain`.
    pub fn count_links(html: &Html, base_url: &Url, domain: &str) -> (u32, u32) {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap());

        let mut internal = 0;
        let mut external = 0;

        for element in html.select(selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let href = href.trim();

            if href.is_empty()
                || href.starts_with('#')
                || href.starts_with("javascript:")
                || href.starts_with("mailto:")
                || href.starts_with("tel:")
            {
                continue;
            }

            let Ok(resolved) = base_url.join(href) else {
                continue;
            };
            if !matches!(resolved.scheme(), "http" | "https") {
                continue;
            }

            if Self::is_same_site(&resolved, domain) {
                internal += 1;
            } else {
                external += 1;
            }
        }

        (internal, external)
    }

    fn is_same_site(link: &Url, domain: &str) -> bool {
        let host = site_domain(link);
        !domain.is_empty() && (host == domain || host.ends_with(&format!(".{domain}")))
    }

    fn visible_text(root: ElementRef) -> String {
        let mut text = String::new();
        for node in root.descendants() {
            let Some(chunk) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|el| matches!(el.name(), "script" | "style" | "noscript"))
                    .unwrap_or(false)
            });
            if !hidden {
                text.push_str(chunk);
                text.push(' ');
            }
        }
        text
    }

    fn first_attr(html: &Html, selector: &Selector, attr: &str) -> Option<String> {
        html.select(selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn has_match(html: &Html, selector: &Selector) -> bool {
        html.select(selector).next().is_some()
    }

    fn og_selector() -> &'static Selector {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        SELECTOR.get_or_init(|| Selector::parse("meta[property^='og:']").unwrap())
    }

    fn twitter_selector() -> &'static Selector {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        SELECTOR.get_or_init(|| Selector::parse("meta[name^='twitter:']").unwrap())
    }

    fn viewport_selector() -> &'static Selector {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        SELECTOR.get_or_init(|| Selector::parse("meta[name='viewport']").unwrap())
    }

    fn schema_selector() -> &'static Selector {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        SELECTOR.get_or_init(|| Selector::parse("script[type='application/ld+json']").unwrap())
    }
}

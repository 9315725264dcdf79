//! Builds the final `AuditReport` from gathered inputs.
//!
//! Everything here is synchronous and side-effect free apart from the random
//! source, so the whole scoring path can be tested without a network.

use chrono::Utc;
use rand::Rng;
use url::Url;

use crate::domain::models::{
    AuditReport, ContentReport, MetaTagsReport, MobileReport, PageSpeedReport, SecurityHeader,
    SecurityReport,
};
use crate::error::Result;
use crate::extractor::{site_domain, PageSignals};
use crate::service::pagespeed::PageSpeedMetrics;
use crate::service::recommendations::{generate_recommendations, meta_tag_issues, mobile_issues};
use crate::service::scoring::{calculate_score, overall_score, ScoreFactor};
use crate::service::synthetic::{
    build_keywords, generate_backlinks, generate_competitors, niche_from_domain, RankingSource,
};

const HTTPS_SECURITY_SCORE: u8 = 75;
const HTTP_SECURITY_SCORE: u8 = 30;

/// What the I/O stage of an audit produced.
#[derive(Debug, Clone)]
pub struct AuditInputs {
    /// Normalized address as the caller supplied it; reported verbatim.
    pub website: String,
    pub url: Url,
    /// `PageSignals::default()` when the page could not be fetched.
    pub signals: PageSignals,
    /// `None` when the page-speed service was unavailable.
    pub page_speed: Option<PageSpeedMetrics>,
    /// One entry per checked keyword, in keyword order.
    pub rankings: Vec<RankingSource>,
}

pub fn meta_tags_score(signals: &PageSignals) -> Result<u8> {
    calculate_score(&[
        ScoreFactor::flag((30..=60).contains(&signals.title_len()), 3),
        ScoreFactor::flag((120..=160).contains(&signals.description_len()), 3),
        ScoreFactor::flag(signals.has_og_tags, 2),
        ScoreFactor::flag(signals.has_twitter_cards, 1),
        ScoreFactor::flag(signals.has_schema, 1),
    ])
}

pub fn content_score(signals: &PageSignals) -> Result<u8> {
    calculate_score(&[
        ScoreFactor::new(signals.word_count.min(2000), 3, 2000),
        ScoreFactor::flag(signals.headings.h1 == 1, 2),
        ScoreFactor::new(signals.headings.h2.min(5), 1, 5),
        ScoreFactor::new(signals.images_with_alt, 1, 10),
        ScoreFactor::new(signals.internal_links.min(20), 1, 20),
    ])
}

pub fn mobile_score(signals: &PageSignals, page_speed_measured: bool) -> Result<u8> {
    calculate_score(&[
        ScoreFactor::flag(signals.has_viewport, 3),
        ScoreFactor::flag(page_speed_measured, 1),
    ])
}

pub fn security_report(url: &Url) -> SecurityReport {
    let https = url.scheme() == "https";
    let header = |name: &str, present: bool| SecurityHeader {
        name: name.to_string(),
        present,
        value: None,
    };

    SecurityReport {
        has_https: https,
        valid_certificate: https,
        headers: vec![
            header("X-Frame-Options", false),
            header("X-Content-Type-Options", false),
            header("Strict-Transport-Security", https),
            header("Content-Security-Policy", false),
            header("X-XSS-Protection", false),
        ],
        score: if https { HTTPS_SECURITY_SCORE } else { HTTP_SECURITY_SCORE },
    }
}

fn page_speed_report(measured: Option<PageSpeedMetrics>) -> PageSpeedReport {
    let metrics = measured.unwrap_or_else(PageSpeedMetrics::fallback);
    PageSpeedReport {
        load_time: metrics.load_time,
        first_contentful_paint: metrics.first_contentful_paint,
        largest_contentful_paint: metrics.largest_contentful_paint,
        time_to_interactive: metrics.time_to_interactive,
        score: metrics.score,
    }
}

/// Compose the report. The overall score is always derived here from the
/// seven category scores.
pub fn assemble_report<R: Rng + ?Sized>(inputs: AuditInputs, rng: &mut R) -> Result<AuditReport> {
    let AuditInputs { website, url, signals, page_speed, rankings } = inputs;
    let domain = site_domain(&url);
    let niche = niche_from_domain(&domain);
    let measured_score = page_speed.map(|m| m.score);

    let meta_tags = MetaTagsReport {
        title: signals
            .title
            .clone()
            .unwrap_or_else(|| format!("{domain} - Website")),
        title_length: signals.title_len(),
        description: signals.description.clone().unwrap_or_default(),
        description_length: signals.description_len(),
        has_og_tags: signals.has_og_tags,
        has_twitter_cards: signals.has_twitter_cards,
        issues: meta_tag_issues(&signals),
        score: meta_tags_score(&signals)?,
    };

    let mobile = MobileReport {
        is_mobile_friendly: signals.has_viewport,
        viewport_configured: signals.has_viewport,
        text_readable: true,
        tap_targets_size: true,
        issues: mobile_issues(&signals, measured_score),
        score: mobile_score(&signals, page_speed.is_some())?,
    };

    let content = ContentReport {
        word_count: signals.word_count,
        headings_structure: signals.headings,
        images_with_alt: signals.images_with_alt,
        images_without_alt: signals.images_without_alt,
        internal_links: signals.internal_links,
        external_links: signals.external_links,
        score: content_score(&signals)?,
    };

    let backlinks = generate_backlinks(rng)?;
    let keywords = build_keywords(&niche, &rankings, rng)?;
    let competitors = generate_competitors(&niche);
    let recommendations = generate_recommendations(&signals, measured_score);

    let mut report = AuditReport {
        overall_score: 0,
        website,
        generated_at: Utc::now(),
        page_speed: page_speed_report(page_speed),
        meta_tags,
        backlinks,
        keywords,
        competitors,
        mobile,
        security: security_report(&url),
        content,
        recommendations,
    };
    report.overall_score = overall_score(&report.category_scores())?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::HeadingCounts;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn inputs(url: &str, signals: PageSignals, page_speed: Option<PageSpeedMetrics>) -> AuditInputs {
        AuditInputs {
            website: url.to_string(),
            url: Url::parse(url).unwrap(),
            signals,
            page_speed,
            rankings: vec![],
        }
    }

    fn rich_page() -> PageSignals {
        PageSignals {
            title: Some("Acme Plumbing | Emergency Plumbers in Springfield".into()),
            description: Some("d".repeat(140)),
            has_og_tags: true,
            has_twitter_cards: true,
            word_count: 2400,
            headings: HeadingCounts { h1: 1, h2: 6, h3: 3 },
            images_with_alt: 12,
            internal_links: 25,
            has_viewport: true,
            has_schema: true,
            ..Default::default()
        }
    }

    fn measured(score: u8) -> PageSpeedMetrics {
        PageSpeedMetrics { score, ..PageSpeedMetrics::fallback() }
    }

    #[test]
    fn test_category_scores_for_rich_page() {
        let signals = rich_page();
        assert_eq!(meta_tags_score(&signals).unwrap(), 100);
        assert_eq!(content_score(&signals).unwrap(), 100);
        assert_eq!(mobile_score(&signals, true).unwrap(), 100);
        assert_eq!(mobile_score(&signals, false).unwrap(), 75);
    }

    #[test]
    fn test_category_scores_for_empty_page() {
        let signals = PageSignals::default();
        assert_eq!(meta_tags_score(&signals).unwrap(), 0);
        assert_eq!(content_score(&signals).unwrap(), 0);
        assert_eq!(mobile_score(&signals, false).unwrap(), 0);
    }

    #[test]
    fn test_overall_is_mean_of_categories() {
        let mut rng = StdRng::seed_from_u64(11);
        let report =
            assemble_report(inputs("https://acme.com/", rich_page(), Some(measured(64))), &mut rng)
                .unwrap();

        let scores = report.category_scores();
        let mean = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / 7.0;
        assert_eq!(report.overall_score, mean.round() as u8);
        assert_eq!(report.page_speed.score, 64);
    }

    #[test]
    fn test_missing_title_falls_back_to_domain() {
        let mut rng = StdRng::seed_from_u64(2);
        let report =
            assemble_report(inputs("https://www.acme.com/", PageSignals::default(), None), &mut rng)
                .unwrap();

        assert_eq!(report.meta_tags.title, "acme.com - Website");
        assert_eq!(report.meta_tags.title_length, 0);
        assert!(report.meta_tags.issues.contains(&"Missing title tag".to_string()));
    }

    #[test]
    fn test_website_is_reported_as_given() {
        let mut rng = StdRng::seed_from_u64(3);
        let report =
            assemble_report(inputs("https://example.com", PageSignals::default(), None), &mut rng)
                .unwrap();
        assert_eq!(report.website, "https://example.com");
    }

    #[test]
    fn test_security_depends_only_on_scheme() {
        let https = security_report(&Url::parse("https://acme.com").unwrap());
        assert_eq!(https.score, 75);
        assert!(https.has_https && https.valid_certificate);
        assert_eq!(https.headers.len(), 5);
        assert!(https.headers.iter().any(|h| h.name == "Strict-Transport-Security" && h.present));

        let http = security_report(&Url::parse("http://acme.com").unwrap());
        assert_eq!(http.score, 30);
        assert!(http.headers.iter().all(|h| !h.present));
    }

    #[test]
    fn test_unavailable_services_still_produce_full_report() {
        let mut rng = StdRng::seed_from_u64(5);
        let report =
            assemble_report(inputs("https://acme-plumbing.com/", PageSignals::default(), None), &mut rng)
                .unwrap();

        assert_eq!(report.page_speed, page_speed_report(None));
        assert_eq!(report.page_speed.score, 70);
        assert_eq!(report.competitors.len(), 5);
        assert_eq!(report.keywords.ranking.len(), 4);
        assert_eq!(report.keywords.ranking[0].keyword, "acme plumbing");
        assert!(report.recommendations.len() <= 7);
        assert!(report.mobile.text_readable && report.mobile.tap_targets_size);
        assert!(report
            .recommendations
            .iter()
            .all(|r| r.category != "Performance"));
    }

    #[test]
    fn test_slow_measured_page_flags_mobile_issue() {
        let mut rng = StdRng::seed_from_u64(8);
        let report =
            assemble_report(inputs("https://acme.com/", rich_page(), Some(measured(35))), &mut rng)
                .unwrap();

        assert_eq!(report.mobile.issues, ["Mobile page speed needs improvement"]);
        assert_eq!(report.recommendations[0].title, "Improve Page Speed");
    }
}

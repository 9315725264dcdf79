//! Rule-based recommendations and issue lists.
//!
//! Rules run in a fixed order and each adds at most one entry. The list is cut
//! to [`MAX_RECOMMENDATIONS`] in that order; priority is descriptive only and is
//! never used for sorting.

use crate::domain::models::{Priority, Recommendation};
use crate::extractor::PageSignals;

pub const MAX_RECOMMENDATIONS: usize = 7;

const TITLE_MIN: usize = 30;
const TITLE_MAX: usize = 60;
const DESCRIPTION_MIN: usize = 120;
const MIN_WORDS: u32 = 500;
const SLOW_PAGE_SCORE: u8 = 50;
const OK_PAGE_SCORE: u8 = 80;

/// `page_speed_score` is the measured score only; fallback values must not be passed.
pub fn generate_recommendations(
    signals: &PageSignals,
    page_speed_score: Option<u8>,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    match signals.title_len() {
        0 => recs.push(Recommendation::new(
            Priority::High,
            "SEO",
            "Add a Title Tag",
            "Your page is missing a title tag. Add a unique, descriptive title between 50-60 characters.",
            "Critical for rankings and click-through rates",
        )),
        len if len < TITLE_MIN => recs.push(Recommendation::new(
            Priority::Medium,
            "SEO",
            "Expand Title Tag",
            "Your title tag is too short. Expand it to 50-60 characters with relevant keywords.",
            "May improve rankings and CTR by 15-25%",
        )),
        len if len > TITLE_MAX => recs.push(Recommendation::new(
            Priority::Low,
            "SEO",
            "Shorten Title Tag",
            "Your title tag may be truncated in search results. Keep it under 60 characters.",
            "Improves appearance in search results",
        )),
        _ => {}
    }

    match signals.description_len() {
        0 => recs.push(Recommendation::new(
            Priority::High,
            "SEO",
            "Add Meta Description",
            "Your page is missing a meta description. Add a compelling description of 150-160 characters.",
            "Can increase click-through rates by 20-30%",
        )),
        len if len < DESCRIPTION_MIN => recs.push(Recommendation::new(
            Priority::Medium,
            "SEO",
            "Expand Meta Description",
            "Your meta description is too short. Expand it to 150-160 characters to fully utilize search result space.",
            "May improve CTR by 10-15%",
        )),
        _ => {}
    }

    if !signals.has_og_tags {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Social",
            "Add Open Graph Tags",
            "Add Open Graph meta tags to control how your content appears when shared on social media.",
            "Improves social sharing appearance and engagement",
        ));
    }

    if signals.word_count < MIN_WORDS {
        recs.push(Recommendation::new(
            Priority::High,
            "Content",
            "Add More Content",
            format!(
                "Your page has only {} words. Add more comprehensive content (1500+ words recommended for ranking).",
                signals.word_count
            ),
            "Pages with 1500+ words rank significantly better",
        ));
    }

    match signals.headings.h1 {
        0 => recs.push(Recommendation::new(
            Priority::High,
            "SEO",
            "Add H1 Heading",
            "Your page is missing an H1 heading. Add exactly one H1 that describes the page content.",
            "H1 is a strong ranking signal for search engines",
        )),
        1 => {}
        count => recs.push(Recommendation::new(
            Priority::Medium,
            "SEO",
            "Use Single H1",
            format!("You have {count} H1 tags. Use exactly one H1 per page for optimal SEO."),
            "Clarifies page structure for search engines",
        )),
    }

    if signals.images_without_alt > 0 {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Accessibility",
            "Add Alt Text to Images",
            format!(
                "{} images are missing alt text. Add descriptive alt text for accessibility and SEO.",
                signals.images_without_alt
            ),
            "Improves accessibility and image search visibility",
        ));
    }

    if !signals.has_schema {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Technical",
            "Add Schema Markup",
            "Add structured data (JSON-LD) to help search engines understand your content better.",
            "May enable rich snippets in search results",
        ));
    }

    match page_speed_score.filter(|s| *s > 0) {
        Some(score) if score < SLOW_PAGE_SCORE => recs.push(Recommendation::new(
            Priority::High,
            "Performance",
            "Improve Page Speed",
            "Your page speed score is low. Optimize images, enable compression, and reduce JavaScript.",
            "Page speed is a ranking factor; could improve conversions by 20%+",
        )),
        Some(score) if score < OK_PAGE_SCORE => recs.push(Recommendation::new(
            Priority::Medium,
            "Performance",
            "Optimize Page Speed",
            "Your page speed could be better. Consider lazy loading images and optimizing CSS delivery.",
            "Could improve user experience and rankings",
        )),
        _ => {}
    }

    recs.push(Recommendation::new(
        Priority::Medium,
        "Backlinks",
        "Build Quality Backlinks",
        "Focus on acquiring backlinks from industry-relevant websites with high domain authority.",
        "Backlinks remain one of the top ranking factors",
    ));
    recs.push(Recommendation::new(
        Priority::Low,
        "Content",
        "Create Regular Content",
        "Publish fresh, valuable content regularly to attract more organic traffic and backlinks.",
        "Fresh content signals relevance to search engines",
    ));

    recs.truncate(MAX_RECOMMENDATIONS);
    recs
}

pub fn meta_tag_issues(signals: &PageSignals) -> Vec<String> {
    let mut issues = Vec::new();

    match signals.title_len() {
        0 => issues.push("Missing title tag"),
        len if len < TITLE_MIN => issues.push("Title tag is too short (under 30 characters)"),
        len if len > TITLE_MAX => issues.push("Title tag is too long (over 60 characters)"),
        _ => {}
    }
    match signals.description_len() {
        0 => issues.push("Missing meta description"),
        len if len < DESCRIPTION_MIN => issues.push("Meta description is too short"),
        _ => {}
    }
    if !signals.has_og_tags {
        issues.push("Missing Open Graph tags");
    }
    if !signals.has_twitter_cards {
        issues.push("Missing Twitter Card tags");
    }

    issues.into_iter().map(String::from).collect()
}

pub fn mobile_issues(signals: &PageSignals, page_speed_score: Option<u8>) -> Vec<String> {
    let mut issues = Vec::new();
    if !signals.has_viewport {
        issues.push("Viewport meta tag not configured".to_string());
    }
    if page_speed_score.is_some_and(|s| s < SLOW_PAGE_SCORE) {
        issues.push("Mobile page speed needs improvement".to_string());
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::HeadingCounts;

    fn healthy_page() -> PageSignals {
        PageSignals {
            title: Some("Acme Plumbing | 24/7 Emergency Plumbers".into()),
            description: Some("d".repeat(150)),
            has_og_tags: true,
            has_twitter_cards: true,
            word_count: 1800,
            headings: HeadingCounts { h1: 1, h2: 4, h3: 2 },
            images_with_alt: 5,
            has_viewport: true,
            has_schema: true,
            ..Default::default()
        }
    }

    fn titles(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_healthy_page_gets_only_general_advice() {
        let recs = generate_recommendations(&healthy_page(), Some(92));
        assert_eq!(titles(&recs), ["Build Quality Backlinks", "Create Regular Content"]);
    }

    #[test]
    fn test_empty_page_is_truncated_in_rule_order() {
        let recs = generate_recommendations(&PageSignals::default(), Some(30));

        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert_eq!(
            titles(&recs),
            [
                "Add a Title Tag",
                "Add Meta Description",
                "Add Open Graph Tags",
                "Add More Content",
                "Add H1 Heading",
                "Add Schema Markup",
                "Improve Page Speed",
            ]
        );
        // Low-priority and always-on entries fall off the end rather than being sorted in.
        assert!(!titles(&recs).contains(&"Build Quality Backlinks"));
    }

    #[test]
    fn test_priority_does_not_reorder() {
        let page = PageSignals {
            title: Some("t".repeat(70)),
            ..healthy_page()
        };
        let recs = generate_recommendations(&page, None);
        assert_eq!(recs[0].title, "Shorten Title Tag");
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[1].priority, Priority::Medium);
    }

    #[test]
    fn test_interpolated_descriptions() {
        let page = PageSignals {
            word_count: 120,
            headings: HeadingCounts { h1: 3, h2: 0, h3: 0 },
            images_without_alt: 4,
            ..healthy_page()
        };
        let recs = generate_recommendations(&page, None);

        let content = recs.iter().find(|r| r.title == "Add More Content").unwrap();
        assert!(content.description.contains("only 120 words"));
        let h1 = recs.iter().find(|r| r.title == "Use Single H1").unwrap();
        assert!(h1.description.starts_with("You have 3 H1 tags"));
        let alt = recs.iter().find(|r| r.title == "Add Alt Text to Images").unwrap();
        assert!(alt.description.starts_with("4 images are missing alt text"));
    }

    #[test]
    fn test_page_speed_rules_need_measured_score() {
        let medium = generate_recommendations(&healthy_page(), Some(65));
        assert_eq!(medium[0].title, "Optimize Page Speed");

        let unmeasured = generate_recommendations(&healthy_page(), None);
        assert!(unmeasured.iter().all(|r| r.category != "Performance"));

        let zero = generate_recommendations(&healthy_page(), Some(0));
        assert!(zero.iter().all(|r| r.category != "Performance"));
    }

    #[test]
    fn test_meta_tag_issues() {
        let issues = meta_tag_issues(&PageSignals::default());
        assert_eq!(
            issues,
            [
                "Missing title tag",
                "Missing meta description",
                "Missing Open Graph tags",
                "Missing Twitter Card tags",
            ]
        );

        let page = PageSignals {
            title: Some("Short".into()),
            description: Some("Also short".into()),
            ..healthy_page()
        };
        assert_eq!(
            meta_tag_issues(&page),
            ["Title tag is too short (under 30 characters)", "Meta description is too short"]
        );
        assert!(meta_tag_issues(&healthy_page()).is_empty());
    }

    #[test]
    fn test_mobile_issues() {
        assert_eq!(
            mobile_issues(&PageSignals::default(), Some(40)),
            ["Viewport meta tag not configured", "Mobile page speed needs improvement"]
        );
        assert!(mobile_issues(&healthy_page(), None).is_empty());
        assert!(mobile_issues(&healthy_page(), Some(75)).is_empty());
    }
}

//! Report and lead entities exchanged with the front end.
//!
//! Everything here serializes as camelCase JSON because the report is consumed
//! verbatim by the on-screen report, the PDF export and the lead webhook.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ====== Enums ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BacklinkQuality {
    Low,
    Medium,
    High,
}

impl BacklinkQuality {
    pub fn from_total(total: u32) -> Self {
        if total > 300 {
            Self::High
        } else if total > 150 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

// ====== Report blocks ======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedReport {
    pub load_time: f64,
    pub first_contentful_paint: f64,
    pub largest_contentful_paint: f64,
    pub time_to_interactive: f64,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTagsReport {
    pub title: String,
    pub title_length: usize,
    pub description: String,
    pub description_length: usize,
    pub has_og_tags: bool,
    pub has_twitter_cards: bool,
    pub issues: Vec<String>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAuthority {
    pub domain: String,
    pub authority: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklinksReport {
    pub total: u32,
    pub dofollow: u32,
    pub nofollow: u32,
    pub quality: BacklinkQuality,
    pub top_domains: Vec<DomainAuthority>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRanking {
    pub keyword: String,
    pub position: u32,
    pub search_volume: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordOpportunity {
    pub keyword: String,
    pub difficulty: u8,
    pub volume: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordsReport {
    pub ranking: Vec<KeywordRanking>,
    pub opportunities: Vec<KeywordOpportunity>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub domain: String,
    pub score: u8,
    pub traffic: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileReport {
    pub is_mobile_friendly: bool,
    pub viewport_configured: bool,
    pub text_readable: bool,
    pub tap_targets_size: bool,
    pub issues: Vec<String>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityHeader {
    pub name: String,
    pub present: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub has_https: bool,
    pub valid_certificate: bool,
    pub headers: Vec<SecurityHeader>,
    pub score: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCounts {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReport {
    pub word_count: u32,
    pub headings_structure: HeadingCounts,
    pub images_with_alt: u32,
    pub images_without_alt: u32,
    pub internal_links: u32,
    pub external_links: u32,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub title: String,
    pub description: String,
    pub impact: String,
}

impl Recommendation {
    pub fn new(
        priority: Priority,
        category: &str,
        title: &str,
        description: impl Into<String>,
        impact: &str,
    ) -> Self {
        Self {
            priority,
            category: category.to_string(),
            title: title.to_string(),
            description: description.into(),
            impact: impact.to_string(),
        }
    }
}

// ====== AuditReport ======

/// Complete audit result. Built once by the assembler and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub overall_score: u8,
    pub website: String,
    pub generated_at: DateTime<Utc>,
    pub page_speed: PageSpeedReport,
    pub meta_tags: MetaTagsReport,
    pub backlinks: BacklinksReport,
    pub keywords: KeywordsReport,
    pub competitors: Vec<Competitor>,
    pub mobile: MobileReport,
    pub security: SecurityReport,
    pub content: ContentReport,
    pub recommendations: Vec<Recommendation>,
}

impl AuditReport {
    /// The seven category scores in display order.
    pub fn category_scores(&self) -> [u8; 7] {
        [
            self.page_speed.score,
            self.meta_tags.score,
            self.backlinks.score,
            self.keywords.score,
            self.mobile.score,
            self.security.score,
            self.content.score,
        ]
    }

    /// Titles of the high-priority recommendations, in report order.
    pub fn top_recommendations(&self) -> Vec<String> {
        self.recommendations
            .iter()
            .filter(|r| r.priority == Priority::High)
            .map(|r| r.title.clone())
            .collect()
    }
}

// ====== Lead capture ======

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadData {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

//! Placeholder data for the categories we have no real source for yet.
//!
//! Backlinks, competitors and (without a SERP key) keyword positions are
//! generated from the audited domain. The shape of every record is fixed; the
//! magnitudes are random draws within documented ranges, so callers may only
//! rely on ranges, never on exact numbers. Swap these out for real provider
//! integrations without touching the assembler.

use rand::Rng;
use std::ops::Range;

use crate::domain::models::{
    BacklinkQuality, BacklinksReport, Competitor, DomainAuthority, KeywordOpportunity,
    KeywordRanking, KeywordsReport,
};
use crate::error::Result;
use crate::service::scoring::{calculate_score, ScoreFactor};

pub const BACKLINK_TOTAL_RANGE: Range<u32> = 100..500;
pub const DOFOLLOW_SHARE: f64 = 0.7;
pub const SEARCH_VOLUME_RANGE: Range<u32> = 500..5500;
/// Position used when the SERP API answered but the domain was not in the top results.
pub const UNRANKED_POSITION_RANGE: Range<u32> = 20..100;
/// Base spread for estimated positions; keyword `i` adds `10 * i`.
pub const ESTIMATED_POSITION_RANGE: Range<u32> = 5..45;
pub const COMPETITOR_COUNT: usize = 5;

const TOP_DOMAINS: [(&str, u8); 4] = [
    ("industry-directory.com", 65),
    ("local-business-listings.com", 52),
    ("niche-blog.com", 48),
    ("review-platform.com", 71),
];

/// Human-readable niche from the first label of the domain (`acme-plumbing.com` -> `acme plumbing`).
pub fn niche_from_domain(domain: &str) -> String {
    domain.split('.').next().unwrap_or_default().replace('-', " ")
}

/// Slug form of a niche for use inside made-up domain names.
fn niche_slug(niche: &str) -> String {
    niche.split_whitespace().collect::<Vec<_>>().join("-")
}

pub fn generate_backlinks<R: Rng + ?Sized>(rng: &mut R) -> Result<BacklinksReport> {
    let total = rng.gen_range(BACKLINK_TOTAL_RANGE);
    let dofollow = (f64::from(total) * DOFOLLOW_SHARE).floor() as u32;

    let score = calculate_score(&[
        ScoreFactor::new(total, 2, 500),
        ScoreFactor::new(dofollow, 3, 350),
    ])?;

    Ok(BacklinksReport {
        total,
        dofollow,
        nofollow: total - dofollow,
        quality: BacklinkQuality::from_total(total),
        top_domains: TOP_DOMAINS
            .iter()
            .map(|(domain, authority)| DomainAuthority {
                domain: domain.to_string(),
                authority: *authority,
            })
            .collect(),
        score,
    })
}

struct CompetitorTemplate {
    name: &'static str,
    /// `{niche}` is replaced with the niche slug.
    domain: &'static str,
    score: u8,
    traffic: &'static str,
    strengths: &'static [&'static str],
    weaknesses: &'static [&'static str],
}

const COMPETITORS: [CompetitorTemplate; COMPETITOR_COUNT] = [
    CompetitorTemplate {
        name: "Industry Leader",
        domain: "top-{niche}-company.com",
        score: 92,
        traffic: "150K/month",
        strengths: &["Strong brand authority", "Extensive backlink profile", "Fast page speed"],
        weaknesses: &["High competition keywords only", "Limited local presence"],
    },
    CompetitorTemplate {
        name: "Local Champion",
        domain: "local-{niche}-services.com",
        score: 78,
        traffic: "45K/month",
        strengths: &["Excellent local SEO", "Strong Google Business Profile", "Good reviews"],
        weaknesses: &["Limited content depth", "Few quality backlinks"],
    },
    CompetitorTemplate {
        name: "Content Leader",
        domain: "{niche}-experts.com",
        score: 85,
        traffic: "80K/month",
        strengths: &["Comprehensive blog", "High content volume", "Good keyword coverage"],
        weaknesses: &["Slower site speed", "Weak technical SEO"],
    },
    CompetitorTemplate {
        name: "Rising Star",
        domain: "modern-{niche}.com",
        score: 71,
        traffic: "25K/month",
        strengths: &["Modern website design", "Fast growing authority", "Active social media"],
        weaknesses: &["New domain age", "Limited backlinks", "Fewer pages indexed"],
    },
    CompetitorTemplate {
        name: "Established Business",
        domain: "trusted-{niche}.com",
        score: 82,
        traffic: "60K/month",
        strengths: &["Long domain history", "Trusted brand", "Quality service pages"],
        weaknesses: &["Outdated design", "Poor mobile experience", "Slow updates"],
    },
];

/// The five competitor archetypes, in fixed order.
pub fn generate_competitors(niche: &str) -> Vec<Competitor> {
    let slug = niche_slug(niche);
    COMPETITORS
        .iter()
        .map(|t| Competitor {
            name: t.name.to_string(),
            domain: t.domain.replace("{niche}", &slug),
            score: t.score,
            traffic: t.traffic.to_string(),
            strengths: t.strengths.iter().map(|s| s.to_string()).collect(),
            weaknesses: t.weaknesses.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

/// Keywords whose rankings are reported for `niche`, in report order.
pub fn keywords_to_check(niche: &str) -> [String; 4] {
    [
        niche.to_string(),
        format!("{niche} near me"),
        format!("best {niche}"),
        format!("{niche} services"),
    ]
}

pub fn keyword_opportunities(niche: &str) -> Vec<KeywordOpportunity> {
    vec![
        KeywordOpportunity { keyword: format!("affordable {niche}"), difficulty: 35, volume: 2500 },
        KeywordOpportunity { keyword: format!("{niche} reviews"), difficulty: 28, volume: 1800 },
        KeywordOpportunity { keyword: format!("local {niche} company"), difficulty: 22, volume: 1200 },
    ]
}

/// Where the ranking for one keyword came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingSource {
    /// SERP API found the domain at this position.
    Found(u32),
    /// SERP API answered but the domain was not in the results.
    NotRanked,
    /// No SERP data at all.
    Unavailable,
}

/// Build the keyword block. `sources[i]` is the lookup outcome for keyword `i`.
pub fn build_keywords<R: Rng + ?Sized>(
    niche: &str,
    sources: &[RankingSource],
    rng: &mut R,
) -> Result<KeywordsReport> {
    let ranking: Vec<KeywordRanking> = keywords_to_check(niche)
        .into_iter()
        .enumerate()
        .map(|(idx, keyword)| {
            let source = sources.get(idx).copied().unwrap_or(RankingSource::Unavailable);
            let position = match source {
                RankingSource::Found(position) => position,
                RankingSource::NotRanked => rng.gen_range(UNRANKED_POSITION_RANGE),
                RankingSource::Unavailable => {
                    rng.gen_range(ESTIMATED_POSITION_RANGE) + 10 * idx as u32
                }
            };
            KeywordRanking {
                keyword,
                position,
                search_volume: rng.gen_range(SEARCH_VOLUME_RANGE),
            }
        })
        .collect();

    let top_ten = ranking.iter().filter(|k| k.position <= 10).count() as u32;
    let top_thirty = ranking.iter().filter(|k| k.position <= 30).count() as u32;
    let score = calculate_score(&[
        ScoreFactor::new(top_ten, 4, 4),
        ScoreFactor::new(top_thirty, 2, 4),
        ScoreFactor::new(ranking.len() as u32, 1, 10),
    ])?;

    Ok(KeywordsReport {
        ranking,
        opportunities: keyword_opportunities(niche),
        score,
    })
}

use async_trait::async_trait;
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::Instrument;
use uuid::Uuid;

use super::{AuditTarget, Auditor};
use crate::config::AppConfig;
use crate::domain::models::AuditReport;
use crate::error::Result;
use crate::extractor::{site_domain, PageExtractor, PageSignals};
use crate::service::fetcher::PageFetcher;
use crate::service::pagespeed::PageSpeedService;
use crate::service::report_assembler::{assemble_report, AuditInputs};
use crate::service::serp::SerpService;
use crate::service::synthetic::{keywords_to_check, niche_from_domain, RankingSource};

/// Production auditor: real page data first, placeholders where no source exists.
pub struct SeoAuditor {
    fetcher: PageFetcher,
    pagespeed: PageSpeedService,
    serp: SerpService,
}

impl SeoAuditor {
    pub fn new(fetcher: PageFetcher, pagespeed: PageSpeedService, serp: SerpService) -> Self {
        Self { fetcher, pagespeed, serp }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self::new(
            PageFetcher::new(config.fetcher.clone())?,
            PageSpeedService::new(config.pagespeed.clone())?,
            SerpService::new(config.serp.clone())?,
        ))
    }

    /// Run every outbound call and collect the results. Never fails.
    pub async fn gather(&self, target: &AuditTarget) -> AuditInputs {
        let url = &target.url;
        let (html, page_speed) = tokio::join!(self.fetcher.fetch(url), self.pagespeed.analyze(url));

        let signals = match html {
            Some(html) => {
                let signals = PageExtractor::extract(&html, url);
                tracing::debug!(
                    "[AUDIT] Parsed page: title={:?}, words={}, h1={}",
                    signals.title,
                    signals.word_count,
                    signals.headings.h1
                );
                signals
            }
            None => {
                tracing::info!("[AUDIT] Could not fetch HTML, using empty page signals");
                PageSignals::default()
            }
        };

        let rankings = self.lookup_rankings(&site_domain(url)).await;

        AuditInputs {
            website: target.website.clone(),
            url: url.clone(),
            signals,
            page_speed,
            rankings,
        }
    }

    async fn lookup_rankings(&self, domain: &str) -> Vec<RankingSource> {
        let keywords = keywords_to_check(&niche_from_domain(domain));
        if !self.serp.is_configured() {
            return vec![RankingSource::Unavailable; keywords.len()];
        }

        // With SERP configured, a failed lookup is treated like "not in the results".
        let lookups = keywords.iter().map(|keyword| self.serp.find_ranking(keyword, domain));
        join_all(lookups)
            .await
            .into_iter()
            .map(|position| match position {
                Some(position) => RankingSource::Found(position),
                None => RankingSource::NotRanked,
            })
            .collect()
    }
}

#[async_trait]
impl Auditor for SeoAuditor {
    async fn audit(&self, target: &AuditTarget) -> Result<AuditReport> {
        let span = tracing::info_span!("audit", audit_id = %Uuid::new_v4());
        self.run(target).instrument(span).await
    }

    fn name(&self) -> &'static str {
        "SEO Auditor"
    }
}

impl SeoAuditor {
    async fn run(&self, target: &AuditTarget) -> Result<AuditReport> {
        tracing::info!("[AUDIT] Starting audit for {}", target.website);
        let inputs = self.gather(target).await;

        let mut rng = StdRng::from_entropy();
        let report = assemble_report(inputs, &mut rng)?;

        tracing::info!(
            "[AUDIT] Final score {} (speed {}, meta {}, backlinks {}, keywords {}, mobile {}, security {}, content {})",
            report.overall_score,
            report.page_speed.score,
            report.meta_tags.score,
            report.backlinks.score,
            report.keywords.score,
            report.mobile.score,
            report.security.score,
            report.content.score
        );
        Ok(report)
    }
}

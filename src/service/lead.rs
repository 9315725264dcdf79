//! Lead capture: validate the form and forward it with a report summary.

use anyhow::Context;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use std::sync::OnceLock;

use crate::config::LeadConfig;
use crate::domain::models::{AuditReport, LeadData};
use crate::error::{AppError, Result};
use crate::service::http::{create_client, ClientType};

pub const MISSING_FIELDS: &str = "All fields are required: fullName, email, phone, website";
pub const INVALID_EMAIL: &str = "Invalid email format";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// Required fields must be non-blank and the email must look like one.
pub fn validate_lead(lead: &LeadData) -> Result<()> {
    let fields = [&lead.full_name, &lead.email, &lead.phone, &lead.website];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::validation(MISSING_FIELDS));
    }
    if !email_regex().is_match(lead.email.trim()) {
        return Err(AppError::validation(INVALID_EMAIL));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookLead<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub website: &'a str,
    pub audit_score: u8,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub overall_score: u8,
    pub page_speed_score: u8,
    pub meta_tags_score: u8,
    pub backlinks_score: u8,
    pub keywords_score: u8,
    pub mobile_score: u8,
    pub security_score: u8,
    pub content_score: u8,
    pub top_recommendations: Vec<String>,
    pub competitor_count: usize,
}

impl From<&AuditReport> for AuditSummary {
    fn from(report: &AuditReport) -> Self {
        Self {
            overall_score: report.overall_score,
            page_speed_score: report.page_speed.score,
            meta_tags_score: report.meta_tags.score,
            backlinks_score: report.backlinks.score,
            keywords_score: report.keywords.score,
            mobile_score: report.mobile.score,
            security_score: report.security.score,
            content_score: report.content.score,
            top_recommendations: report.top_recommendations(),
            competitor_count: report.competitors.len(),
        }
    }
}

/// Body POSTed to the CRM webhook.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload<'a> {
    pub timestamp: DateTime<Utc>,
    pub source: &'a str,
    pub lead: WebhookLead<'a>,
    pub audit_summary: AuditSummary,
    pub full_report: &'a AuditReport,
}

pub struct LeadService {
    client: Client,
    config: LeadConfig,
}

impl LeadService {
    pub fn new(config: LeadConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: create_client(ClientType::Standard, config.timeout())?,
            config,
        })
    }

    pub fn build_payload<'a>(&'a self, lead: &'a LeadData, report: &'a AuditReport) -> WebhookPayload<'a> {
        let now = Utc::now();
        WebhookPayload {
            timestamp: now,
            source: &self.config.source,
            lead: WebhookLead {
                full_name: lead.full_name.trim(),
                email: lead.email.trim(),
                phone: lead.phone.trim(),
                website: lead.website.trim(),
                audit_score: report.overall_score,
                submitted_at: lead.submitted_at.unwrap_or(now),
            },
            audit_summary: AuditSummary::from(report),
            full_report: report,
        }
    }

    /// Validate and forward. Delivery problems are logged and swallowed; only
    /// validation errors reach the caller.
    pub async fn submit(&self, lead: &LeadData, report: &AuditReport) -> Result<()> {
        validate_lead(lead)?;
        let payload = self.build_payload(lead, report);

        if !self.config.is_configured() {
            let pretty = serde_json::to_string_pretty(&payload).unwrap_or_default();
            tracing::info!("[LEAD] Webhook URL not configured. Lead data: {}", pretty);
            return Ok(());
        }

        match self.forward(&payload).await {
            Ok(()) => tracing::info!("[LEAD] Forwarded lead for {}", payload.lead.website),
            Err(e) => tracing::error!("[LEAD] Webhook delivery failed: {:#}", e),
        }
        Ok(())
    }

    async fn forward(&self, payload: &WebhookPayload<'_>) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(payload)
            .send()
            .await
            .context("Failed to send webhook request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("webhook returned {}: {}", status, body);
        }
        Ok(())
    }
}

pub mod auditor;
pub mod fetcher;
pub mod http;
pub mod lead;
pub mod pagespeed;
pub mod recommendations;
pub mod report_assembler;
pub mod scoring;
pub mod serp;
pub mod synthetic;

pub use auditor::{AuditTarget, Auditor, SeoAuditor};
pub use fetcher::PageFetcher;
pub use lead::LeadService;
pub use pagespeed::{PageSpeedMetrics, PageSpeedService};
pub use serp::SerpService;

//! Error types for extraction and handoff.
//!
//! Per-row problems are never errors — missing fields are defaulted and bad
//! rows are skipped, so one malformed row cannot abort the batch. Only the
//! two terminal, user-facing failures and handshake breakdowns surface here.

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("لم يتم العثور على اي مادة")]
    NoCourses,
    #[error("failed to read registration page from {path}")]
    ReadPage {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("تعذر فتح صفحة العرض — يرجى السماح بالنوافذ المنبثقة: {0}")]
    ViewerBlocked(String),
    #[error("viewer closed before requesting the course list")]
    ViewerClosed,
    #[error("failed to deliver course list to viewer")]
    DeliveryFailed(#[source] anyhow::Error),
    #[error("handoff cancelled before the viewer signalled readiness")]
    Cancelled,
}

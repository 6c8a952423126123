use chrono::{DateTime, Utc};
use serde::Serialize;

/// One diagnostic record of a resolution step.
///
/// Only the fields a step actually knows are serialized.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TraceEntry {
    pub time: DateTime<Utc>,
    pub step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_skin_url: Option<bool>,
}

impl TraceEntry {
    pub fn new(step: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            step: step.into(),
            phase: None,
            source: None,
            url: None,
            status: None,
            ok: None,
            content_type: None,
            duration_ms: None,
            outcome: None,
            error: None,
            bytes: None,
            uuid: None,
            has_skin_url: None,
        }
    }

    pub fn phase(mut self, phase: &'static str) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn source(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self.ok = Some((200..300).contains(&status));
        self
    }

    pub fn content_type(mut self, content_type: Option<&str>) -> Self {
        self.content_type = Some(content_type.unwrap_or_default().to_string());
        self
    }

    pub fn duration_ms(mut self, millis: u128) -> Self {
        self.duration_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    pub fn outcome(mut self, outcome: &'static str) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn bytes(mut self, bytes: usize) -> Self {
        self.bytes = Some(bytes);
        self
    }

    pub fn uuid(mut self, uuid: &str) -> Self {
        self.uuid = Some(uuid.to_string());
        self
    }

    pub fn has_skin_url(mut self, has_skin_url: bool) -> Self {
        self.has_skin_url = Some(has_skin_url);
        self
    }
}

/// Ordered log of every upstream call made during one resolution.
///
/// A disabled trace drops entries, so callers can record unconditionally.
#[derive(Debug, Clone, Default)]
pub struct ResolutionTrace {
    entries: Option<Vec<TraceEntry>>,
}

impl ResolutionTrace {
    pub fn enabled() -> Self {
        Self {
            entries: Some(Vec::new()),
        }
    }

    pub fn disabled() -> Self {
        Self { entries: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    pub fn push(&mut self, entry: TraceEntry) {
        if let Some(entries) = &mut self.entries {
            entries.push(entry);
        }
    }

    pub fn entries(&self) -> &[TraceEntry] {
        self.entries.as_deref().unwrap_or_default()
    }

    /// `None` when tracing was disabled.
    pub fn into_entries(self) -> Option<Vec<TraceEntry>> {
        self.entries
    }
}

use serde::Serialize;
use url::Url;

use crate::metrics::SmsMessage;

/// Host and path of a parsed campaign link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedLink {
    /// Lowercased hostname; empty for URLs without an authority.
    pub host: String,
    pub path: String,
}

/// Parse a raw link into its host and path.
///
/// Returns `None` for absent or unparseable input; such links are simply left
/// out of matching.
#[must_use]
pub fn normalize_link(raw: Option<&str>) -> Option<NormalizedLink> {
    let raw = raw?;
    let url = Url::parse(raw).ok()?;
    Some(NormalizedLink {
        host: url.host_str().unwrap_or_default().to_lowercase(),
        path: url.path().to_owned(),
    })
}

/// A message whose link parsed, paired with the parsed form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmsLink {
    pub message: SmsMessage,
    pub host: String,
    pub path: String,
    pub full_url: String,
}

impl SmsLink {
    /// Build the day's link set, keeping the messages' order and dropping
    /// any message without a usable link.
    #[must_use]
    pub fn collect(messages: &[SmsMessage]) -> Vec<SmsLink> {
        messages
            .iter()
            .filter_map(|message| {
                let raw = message.link_url.as_deref()?;
                let Some(link) = normalize_link(Some(raw)) else {
                    tracing::debug!(message_id = message.id, link = raw, "skipping unparseable link");
                    return None;
                };
                Some(SmsLink {
                    message: message.clone(),
                    host: link.host,
                    path: link.path,
                    full_url: raw.to_owned(),
                })
            })
            .collect()
    }
}

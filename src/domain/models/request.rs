#[cfg(test)]
#[path = "request_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

pub const TARGET_LANGUAGE: &str = "French";

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum RequestKind {
    #[strum(serialize = "health")]
    Ask,
    #[strum(serialize = "translate")]
    Translate,
    #[strum(serialize = "summary")]
    Summary,
}

impl RequestKind {
    pub fn path(&self) -> &'static str {
        match self {
            RequestKind::Ask => return "/ask",
            RequestKind::Translate => return "/translate",
            RequestKind::Summary => return "/summary",
        }
    }

    /// Shown in the answer pane while the request is in flight.
    pub fn progress_text(&self) -> &'static str {
        match self {
            RequestKind::Ask => return "Đang tư vấn sức khỏe...",
            RequestKind::Translate => return "Đang dịch...",
            RequestKind::Summary => return "Đang tóm tắt...",
        }
    }

    pub fn empty_content_notice(&self) -> &'static str {
        match self {
            RequestKind::Ask => return "Vui lòng nhập câu hỏi.",
            RequestKind::Translate => return "Chưa có nội dung để dịch.",
            RequestKind::Summary => return "Chưa có nội dung để tóm tắt.",
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

impl RequestEnvelope {
    pub fn new(kind: RequestKind, content: &str) -> RequestEnvelope {
        if kind == RequestKind::Ask {
            return RequestEnvelope {
                question: Some(content.to_string()),
                ..Default::default()
            };
        }

        return RequestEnvelope {
            text: Some(content.to_string()),
            target_language: Some(TARGET_LANGUAGE.to_string()),
            ..Default::default()
        };
    }
}

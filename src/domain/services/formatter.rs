#[cfg(test)]
#[path = "formatter_test.rs"]
mod tests;

use crate::domain::models::RequestKind;
use crate::domain::models::ResponseStatus;

pub const FOLLOW_UP_HINT: &str = "Bạn có thể dịch hoặc tóm tắt nội dung.";

pub fn format_answer(kind: RequestKind, answer: &str, status: &ResponseStatus) -> String {
    let prefix = status.prefix();

    match kind {
        RequestKind::Ask => {
            return format!("{prefix}Tư vấn:\n\n{answer}\n\n{FOLLOW_UP_HINT}");
        }
        RequestKind::Translate => {
            return format!("{prefix}Bản dịch:\n\n{answer}");
        }
        RequestKind::Summary => {
            return format!("{prefix}Tóm tắt:\n\n{answer}");
        }
    }
}

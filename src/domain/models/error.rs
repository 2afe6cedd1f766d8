use thiserror::Error;

/// Every way a request can end without an answer. The `Display` output is the
/// text shown to the user.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("{0}")]
    Validation(String),

    #[error("Đang xử lý yêu cầu trước, vui lòng chờ hoặc hủy.")]
    Busy,

    #[error("Lỗi server: {0}")]
    Server(u16),

    #[error("Lỗi kết nối: {0}")]
    Connectivity(String),

    #[error("Đã hủy thao tác!")]
    Cancelled,

    #[error("Lỗi không xác định: {0}")]
    Unexpected(String),
}

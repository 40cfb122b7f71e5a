//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::WalinkError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 活动与推广员错误
/// - 4000-4099: 导出错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 业务错误 3000-3099
    ValidationFailed = 3000,
    SlugConflict = 3001,
    DatabaseError = 3005,

    // 导出错误 4000-4099
    ExportFailed = 4001,
}

impl From<&WalinkError> for ErrorCode {
    fn from(err: &WalinkError) -> Self {
        match err {
            WalinkError::Validation(_) => ErrorCode::ValidationFailed,
            WalinkError::NotFound(_) => ErrorCode::NotFound,
            WalinkError::Conflict(_) => ErrorCode::SlugConflict,
            WalinkError::DatabaseConnection(_) => ErrorCode::ServiceUnavailable,
            WalinkError::DatabaseConfig(_) | WalinkError::DatabaseOperation(_) => {
                ErrorCode::DatabaseError
            }
            WalinkError::Serialization(_) => ErrorCode::ExportFailed,
            WalinkError::FileOperation(_) => ErrorCode::InternalServerError,
        }
    }
}

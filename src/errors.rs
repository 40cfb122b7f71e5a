use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum WalinkError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    Serialization(String),
}

impl WalinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            WalinkError::DatabaseConfig(_) => "E001",
            WalinkError::DatabaseConnection(_) => "E002",
            WalinkError::DatabaseOperation(_) => "E003",
            WalinkError::FileOperation(_) => "E004",
            WalinkError::Validation(_) => "E005",
            WalinkError::NotFound(_) => "E006",
            WalinkError::Conflict(_) => "E007",
            WalinkError::Serialization(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            WalinkError::DatabaseConfig(_) => "Database Configuration Error",
            WalinkError::DatabaseConnection(_) => "Database Connection Error",
            WalinkError::DatabaseOperation(_) => "Database Operation Error",
            WalinkError::FileOperation(_) => "File Operation Error",
            WalinkError::Validation(_) => "Validation Error",
            WalinkError::NotFound(_) => "Resource Not Found",
            WalinkError::Conflict(_) => "Resource Conflict",
            WalinkError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            WalinkError::DatabaseConfig(msg)
            | WalinkError::DatabaseConnection(msg)
            | WalinkError::DatabaseOperation(msg)
            | WalinkError::FileOperation(msg)
            | WalinkError::Validation(msg)
            | WalinkError::NotFound(msg)
            | WalinkError::Conflict(msg)
            | WalinkError::Serialization(msg) => msg,
        }
    }

    /// HTTP 状态码映射（Admin API 使用）
    pub fn http_status(&self) -> StatusCode {
        match self {
            WalinkError::Validation(_) => StatusCode::BAD_REQUEST,
            WalinkError::NotFound(_) => StatusCode::NOT_FOUND,
            WalinkError::Conflict(_) => StatusCode::CONFLICT,
            WalinkError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    #[cfg(feature = "server")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for WalinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for WalinkError {}

// 便捷的构造函数
impl WalinkError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        WalinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        WalinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        WalinkError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        WalinkError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        WalinkError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        WalinkError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        WalinkError::Conflict(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        WalinkError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for WalinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        WalinkError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for WalinkError {
    fn from(err: std::io::Error) -> Self {
        WalinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for WalinkError {
    fn from(err: serde_json::Error) -> Self {
        WalinkError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for WalinkError {
    fn from(err: csv::Error) -> Self {
        WalinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WalinkError>;

//! API 模块常量定义

/// 请求 ID 响应头
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 客户端传入的请求 ID 最大长度，超出则重新生成
pub const MAX_REQUEST_ID_LEN: usize = 64;

/// Admin API 版本路径
pub const ADMIN_API_VERSION: &str = "/v1";

/// 表单提交体大小上限
pub const FORM_PAYLOAD_LIMIT: usize = 256 * 1024;

//! Admin API 服务模块
//!
//! 该模块包含管理 API 的所有端点：
//! - 活动 CRUD 与推荐链接
//! - 推广员 CRUD
//! - 表单记录查询与 CSV 导出

mod agents;
mod campaigns;
mod entries;
pub mod error_code;
mod helpers;
pub mod routes;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{api_result, error_from_walink, error_response, success_response};

// 重新导出错误码
pub use error_code::ErrorCode;

pub use routes::admin_v1_routes;

pub mod attribution;
pub mod auth;
pub mod request_id;

pub use attribution::{AttributionContext, AttributionLayer};
pub use auth::AdminAuth;
pub use request_id::{RequestId, RequestIdMiddleware};

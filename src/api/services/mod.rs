pub mod admin;
pub mod campaign;
pub mod forms;
pub mod health;

pub use admin::admin_v1_routes;
pub use campaign::{CampaignViewService, campaign_routes};
pub use forms::{FormService, form_routes};
pub use health::{AppStartTime, HealthService, health_routes};

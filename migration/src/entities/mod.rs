pub mod agent;
pub mod campaign;
pub mod form_entry;

pub use agent::Entity as AgentEntity;
pub use campaign::Entity as CampaignEntity;
pub use form_entry::Entity as FormEntryEntity;

//! Service layer for business logic
//!
//! Attribution, redirect and form handling only see the storage traits.
//! Campaign and agent management is shared between the admin API and the CLI.

pub mod agent_service;
pub mod attribution;
pub mod campaign_service;
pub mod form_bridge;
pub mod redirect;
pub mod roles;

#[cfg(test)]
pub(crate) mod test_support;

pub use agent_service::{AgentInput, AgentRow, AgentService, Contact};
pub use attribution::{
    AttributionWrite, read_attribution, resolve_and_store_attribution,
};
pub use campaign_service::{
    CampaignInput, CampaignLinks, CampaignRow, CampaignService, ReferralLink,
};
pub use form_bridge::{
    FormSubmission, HiddenFields, SubmissionOutcome, annotate_submission, hidden_fields,
    redirect_after_submission, submit_form,
};
pub use redirect::{build_whatsapp_redirect, campaign_redirect};
pub use roles::{Capability, Role};

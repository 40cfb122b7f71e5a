use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::errors::Result;
use crate::storage::models::{
    Agent, AgentDraft, Campaign, CampaignDraft, FormEntry, FormField, NewFormEntry,
};
use migration::entities::{agent, campaign, form_entry};

pub fn model_to_campaign(model: campaign::Model) -> Campaign {
    Campaign {
        id: model.id,
        title: model.title,
        slug: model.slug,
        admin_phone: model.admin_phone,
        whatsapp_message: model.whatsapp_message,
        zapier_link: model.zapier_link,
        published: model.published,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn model_to_agent(model: agent::Model) -> Agent {
    Agent {
        id: model.id,
        display_name: model.display_name,
        email: model.email,
        referral_code: model.referral_code,
        phone_number: model.phone_number,
        role: model.role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// fields 列保存为 JSON 数组，解析失败视为数据损坏
pub fn model_to_form_entry(model: form_entry::Model) -> Result<FormEntry> {
    let fields: Vec<FormField> = serde_json::from_str(&model.fields)?;
    Ok(FormEntry {
        id: model.id,
        form_id: model.form_id,
        campaign_id: model.campaign_id,
        agent_id: model.agent_id,
        fields,
        created_at: model.created_at,
    })
}

/// 新建时 id 交给数据库自增；更新时保留 created_at
pub fn campaign_draft_to_active_model(
    draft: &CampaignDraft,
    id: Option<i64>,
    now: DateTime<Utc>,
) -> campaign::ActiveModel {
    campaign::ActiveModel {
        id: id.map(Set).unwrap_or(NotSet),
        title: Set(draft.title.clone()),
        slug: Set(draft.slug.clone()),
        admin_phone: Set(draft.admin_phone.clone()),
        whatsapp_message: Set(draft.whatsapp_message.clone()),
        zapier_link: Set(draft.zapier_link.clone()),
        published: Set(draft.published),
        created_at: if id.is_none() { Set(now) } else { NotSet },
        updated_at: Set(now),
    }
}

pub fn agent_draft_to_active_model(
    draft: &AgentDraft,
    role: &str,
    id: Option<i64>,
    now: DateTime<Utc>,
) -> agent::ActiveModel {
    agent::ActiveModel {
        id: id.map(Set).unwrap_or(NotSet),
        display_name: Set(draft.display_name.clone()),
        email: Set(draft.email.clone()),
        referral_code: Set(draft.referral_code.clone()),
        phone_number: Set(draft.phone_number.clone()),
        role: if id.is_none() {
            Set(role.to_string())
        } else {
            NotSet
        },
        created_at: if id.is_none() { Set(now) } else { NotSet },
        updated_at: Set(now),
    }
}

pub fn new_entry_to_active_model(
    entry: &NewFormEntry,
    now: DateTime<Utc>,
) -> Result<form_entry::ActiveModel> {
    Ok(form_entry::ActiveModel {
        id: NotSet,
        form_id: Set(entry.form_id.clone()),
        campaign_id: Set(entry.campaign_id),
        agent_id: Set(entry.agent_id),
        fields: Set(serde_json::to_string(&entry.fields)?),
        created_at: Set(now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn draft() -> CampaignDraft {
        CampaignDraft {
            title: "Promo Ramadan".to_string(),
            slug: "promo-ramadan".to_string(),
            admin_phone: "6281111111111".to_string(),
            whatsapp_message: "Halo".to_string(),
            zapier_link: None,
            published: true,
        }
    }

    #[test]
    fn test_new_campaign_leaves_id_to_database() {
        let now = Utc::now();
        let active = campaign_draft_to_active_model(&draft(), None, now);
        assert!(matches!(active.id, ActiveValue::NotSet));
        assert_eq!(active.created_at, ActiveValue::Set(now));
        assert_eq!(active.slug, ActiveValue::Set("promo-ramadan".to_string()));
    }

    #[test]
    fn test_update_campaign_keeps_created_at() {
        let active = campaign_draft_to_active_model(&draft(), Some(7), Utc::now());
        assert_eq!(active.id, ActiveValue::Set(7));
        assert!(matches!(active.created_at, ActiveValue::NotSet));
    }

    #[test]
    fn test_update_agent_does_not_touch_role() {
        let draft = AgentDraft {
            display_name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            referral_code: "budi".to_string(),
            phone_number: "6282222222222".to_string(),
        };
        let active = agent_draft_to_active_model(&draft, "agent", Some(3), Utc::now());
        assert!(matches!(active.role, ActiveValue::NotSet));

        let active = agent_draft_to_active_model(&draft, "agent", None, Utc::now());
        assert_eq!(active.role, ActiveValue::Set("agent".to_string()));
    }

    #[test]
    fn test_form_entry_fields_keep_order() {
        let model = form_entry::Model {
            id: 1,
            form_id: "contact".to_string(),
            campaign_id: Some(12),
            agent_id: None,
            fields: r#"[{"name":"campaign","value":"Promo (#12)"},{"name":"email","value":"a@b.c"}]"#
                .to_string(),
            created_at: Utc::now(),
        };
        let entry = model_to_form_entry(model).unwrap();
        assert_eq!(entry.fields[0].name, "campaign");
        assert_eq!(entry.fields[1], FormField::new("email", "a@b.c"));
    }

    #[test]
    fn test_form_entry_with_corrupt_fields_is_error() {
        let model = form_entry::Model {
            id: 1,
            form_id: "contact".to_string(),
            campaign_id: None,
            agent_id: None,
            fields: "not json".to_string(),
            created_at: Utc::now(),
        };
        assert!(model_to_form_entry(model).is_err());
    }
}

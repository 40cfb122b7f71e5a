//! 表单桥接
//!
//! 嵌入表单时输出两个隐藏字段（affiliate_id、campaign_id），提交时据此把
//! 活动与推广员的可读标签加到字段列表最前面，保存记录，并在能解析到活动时
//! 跳回活动页。

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::Result;
use crate::storage::{EntryStore, FormEntry, FormField, IdentityStore, NewFormEntry};
use crate::utils::leading_int;

/// 隐藏字段名
pub const AFFILIATE_FIELD: &str = "affiliate_id";
pub const CAMPAIGN_FIELD: &str = "campaign_id";

/// 标注字段名
pub const CAMPAIGN_LABEL_KEY: &str = "campaign";
pub const AGENT_LABEL_KEY: &str = "agent";

/// 一次表单提交
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_id: String,
    pub campaign_id: Option<String>,
    pub affiliate_id: Option<String>,
    pub fields: Vec<FormField>,
}

/// 空串与 "0" 视为未设置
fn hidden_value(value: String) -> Option<String> {
    match value.trim() {
        "" | "0" => None,
        _ => Some(value),
    }
}

impl FormSubmission {
    /// 从提交的键值对构造，两个隐藏字段被取出，其余字段保持原顺序
    pub fn from_pairs<I>(form_id: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut submission = FormSubmission {
            form_id: form_id.into(),
            ..Default::default()
        };

        for (name, value) in pairs {
            match name.as_str() {
                AFFILIATE_FIELD => submission.affiliate_id = hidden_value(value),
                CAMPAIGN_FIELD => submission.campaign_id = hidden_value(value),
                _ => submission.fields.push(FormField { name, value }),
            }
        }

        submission
    }

    /// 可查询的活动 id
    fn campaign_key(&self) -> Option<i64> {
        self.campaign_id
            .as_deref()
            .map(leading_int)
            .filter(|id| *id > 0)
    }

    fn agent_key(&self) -> Option<i64> {
        self.affiliate_id
            .as_deref()
            .map(leading_int)
            .filter(|id| *id > 0)
    }
}

/// 嵌入表单的隐藏字段值，0 表示未设置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HiddenFields {
    pub affiliate_id: i64,
    pub campaign_id: i64,
}

impl HiddenFields {
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HiddenFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<input type="hidden" name="{}" value="{}" />"#,
            AFFILIATE_FIELD, self.affiliate_id
        )?;
        write!(
            f,
            r#"<input type="hidden" name="{}" value="{}" />"#,
            CAMPAIGN_FIELD, self.campaign_id
        )
    }
}

/// 计算隐藏字段
///
/// 活动 id 来自表单标签：含 `#` 的标签去掉 `#` 后取开头整数，多个时最后一个生效。
/// 推广员 id 取归因 Cookie 开头的整数。
pub fn hidden_fields<'a, I>(form_tags: I, attribution_cookie: Option<&str>) -> HiddenFields
where
    I: IntoIterator<Item = &'a str>,
{
    let campaign_id = form_tags
        .into_iter()
        .filter(|tag| tag.contains('#'))
        .map(|tag| leading_int(&tag.replace('#', "")))
        .last()
        .unwrap_or(0);

    HiddenFields {
        affiliate_id: attribution_cookie.map(leading_int).unwrap_or(0),
        campaign_id,
    }
}

/// 在字段列表前插入活动与推广员标签
///
/// 活动标签 `"<标题> (#<id>)"`，推广员标签 `"<名称> - <号码> (#<id>)"`；
/// 查不到或查询出错时使用原始 id。不会失败。
pub async fn annotate_submission(
    store: &dyn IdentityStore,
    submission: &FormSubmission,
) -> Vec<FormField> {
    let mut fields = Vec::with_capacity(submission.fields.len() + 2);

    if let Some(raw) = &submission.campaign_id {
        let label = match submission.campaign_key() {
            Some(id) => match store.get_campaign(id).await {
                Ok(Some(c)) => format!("{} (#{})", c.title, c.id),
                Ok(None) => raw.clone(),
                Err(e) => {
                    warn!("Failed to load campaign #{} for form label: {}", id, e);
                    raw.clone()
                }
            },
            None => raw.clone(),
        };
        fields.push(FormField::new(CAMPAIGN_LABEL_KEY, label));
    }

    if let Some(raw) = &submission.affiliate_id {
        let label = match submission.agent_key() {
            Some(id) => match store.get_agent(id).await {
                Ok(Some(a)) => format!("{} - {} (#{})", a.display_name, a.phone_number, a.id),
                Ok(None) => raw.clone(),
                Err(e) => {
                    warn!("Failed to load agent #{} for form label: {}", id, e);
                    raw.clone()
                }
            },
            None => raw.clone(),
        };
        fields.push(FormField::new(AGENT_LABEL_KEY, label));
    }

    fields.extend(submission.fields.iter().cloned());
    fields
}

/// 活动公开页面地址：`<base_url><prefix>/<slug>`
pub fn campaign_page_url(base_url: &str, campaign_prefix: &str, slug: &str) -> String {
    let base = base_url.trim_end_matches('/');
    match campaign_prefix.trim_matches('/') {
        "" => format!("{}/{}", base, slug),
        prefix => format!("{}/{}/{}", base, prefix, slug),
    }
}

/// 提交后跳转地址：能解析到活动时为活动页，否则 None
pub async fn redirect_after_submission(
    store: &dyn IdentityStore,
    submission: &FormSubmission,
    base_url: &str,
    campaign_prefix: &str,
) -> Option<String> {
    let id = submission.campaign_key()?;
    match store.get_campaign(id).await {
        Ok(Some(c)) => Some(campaign_page_url(base_url, campaign_prefix, &c.slug)),
        Ok(None) => None,
        Err(e) => {
            warn!("Failed to load campaign #{} for form redirect: {}", id, e);
            None
        }
    }
}

/// 提交处理结果
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub entry: FormEntry,
    pub redirect: Option<String>,
}

/// 标注、保存并计算跳转
pub async fn submit_form(
    identity: &dyn IdentityStore,
    entries: &dyn EntryStore,
    submission: FormSubmission,
    base_url: &str,
    campaign_prefix: &str,
) -> Result<SubmissionOutcome> {
    let fields = annotate_submission(identity, &submission).await;
    let redirect = redirect_after_submission(identity, &submission, base_url, campaign_prefix).await;

    // 仅记录能查到的关联
    let campaign_id = match submission.campaign_key() {
        Some(id) => identity.get_campaign(id).await.ok().flatten().map(|c| c.id),
        None => None,
    };
    let agent_id = match submission.agent_key() {
        Some(id) => identity.get_agent(id).await.ok().flatten().map(|a| a.id),
        None => None,
    };

    let entry = entries
        .save_entry(NewFormEntry {
            form_id: submission.form_id,
            campaign_id,
            agent_id,
            fields,
        })
        .await?;

    info!(
        "Form '{}' submitted: entry #{} redirect={:?}",
        entry.form_id, entry.id, redirect
    );
    Ok(SubmissionOutcome { entry, redirect })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{MemoryStore, agent, campaign};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn store() -> MemoryStore {
        let mut promo = campaign(12, "promo", "6281111111111", "Halo");
        promo.title = "Promo".to_string();
        let mut budi = agent(7, "budi", "6282222222222");
        budi.display_name = "Budi".to_string();
        MemoryStore::new().with_campaign(promo).with_agent(budi)
    }

    #[test]
    fn test_from_pairs_extracts_hidden_fields() {
        let s = FormSubmission::from_pairs(
            "contact",
            pairs(&[
                ("name", "Ani"),
                ("affiliate_id", "0"),
                ("campaign_id", "12"),
                ("email", "ani@example.com"),
            ]),
        );
        assert_eq!(s.affiliate_id, None);
        assert_eq!(s.campaign_id.as_deref(), Some("12"));
        assert_eq!(
            s.fields,
            vec![
                FormField::new("name", "Ani"),
                FormField::new("email", "ani@example.com")
            ]
        );
    }

    #[test]
    fn test_hidden_fields_last_hash_tag_wins() {
        let h = hidden_fields(["lead", "#5", "#9y", "promo"], Some("7"));
        assert_eq!(h, HiddenFields { affiliate_id: 7, campaign_id: 9 });
        // 去掉 # 后开头不是数字，按 0 处理且仍然覆盖之前的值
        let h = hidden_fields(["#5", "x#9"], None);
        assert_eq!(h.campaign_id, 0);
    }

    #[test]
    fn test_hidden_fields_defaults_to_zero() {
        let h = hidden_fields(Vec::<&str>::new(), None);
        assert_eq!(h, HiddenFields::default());
        let h = hidden_fields(["#abc"], Some("junk"));
        assert_eq!(h, HiddenFields::default());
    }

    #[test]
    fn test_hidden_fields_html() {
        let html = HiddenFields { affiliate_id: 7, campaign_id: 12 }.to_html();
        assert!(html.contains(r#"<input type="hidden" name="affiliate_id" value="7" />"#));
        assert!(html.contains(r#"<input type="hidden" name="campaign_id" value="12" />"#));
    }

    #[test]
    fn test_campaign_page_url() {
        assert_eq!(
            campaign_page_url("https://shop.example/", "/c", "promo"),
            "https://shop.example/c/promo"
        );
        assert_eq!(
            campaign_page_url("https://shop.example", "c/", "promo"),
            "https://shop.example/c/promo"
        );
    }

    #[tokio::test]
    async fn test_annotate_prepends_labels_in_order() {
        let s = FormSubmission {
            form_id: "contact".to_string(),
            campaign_id: Some("12".to_string()),
            affiliate_id: Some("7".to_string()),
            fields: vec![FormField::new("email", "ani@example.com")],
        };
        let fields = annotate_submission(&store(), &s).await;
        assert_eq!(
            fields,
            vec![
                FormField::new("campaign", "Promo (#12)"),
                FormField::new("agent", "Budi - 6282222222222 (#7)"),
                FormField::new("email", "ani@example.com"),
            ]
        );
    }

    #[tokio::test]
    async fn test_annotate_uses_raw_ids_when_unresolved() {
        let s = FormSubmission {
            form_id: "contact".to_string(),
            campaign_id: Some("404".to_string()),
            affiliate_id: Some("abc".to_string()),
            fields: vec![],
        };
        let fields = annotate_submission(&store(), &s).await;
        assert_eq!(
            fields,
            vec![FormField::new("campaign", "404"), FormField::new("agent", "abc")]
        );
    }

    #[tokio::test]
    async fn test_annotate_never_fails_on_store_error() {
        let s = FormSubmission {
            form_id: "contact".to_string(),
            campaign_id: Some("12".to_string()),
            affiliate_id: None,
            fields: vec![],
        };
        let fields = annotate_submission(&MemoryStore::new().failing(), &s).await;
        assert_eq!(fields, vec![FormField::new("campaign", "12")]);
    }

    #[tokio::test]
    async fn test_redirect_after_submission() {
        let mut s = FormSubmission {
            form_id: "contact".to_string(),
            campaign_id: Some("12".to_string()),
            ..Default::default()
        };
        assert_eq!(
            redirect_after_submission(&store(), &s, "https://shop.example", "/c").await,
            Some("https://shop.example/c/promo".to_string())
        );

        s.campaign_id = None;
        assert_eq!(
            redirect_after_submission(&store(), &s, "https://shop.example", "/c").await,
            None
        );
    }

    #[tokio::test]
    async fn test_submit_form_saves_annotated_entry() {
        let store = store();
        let s = FormSubmission::from_pairs(
            "contact",
            pairs(&[("campaign_id", "12"), ("affiliate_id", "99"), ("name", "Ani")]),
        );
        let outcome = submit_form(&store, &store, s, "https://shop.example", "/c")
            .await
            .unwrap();

        assert_eq!(outcome.redirect.as_deref(), Some("https://shop.example/c/promo"));
        assert_eq!(outcome.entry.campaign_id, Some(12));
        // 推广员不存在，只保留原始标签
        assert_eq!(outcome.entry.agent_id, None);
        assert_eq!(outcome.entry.fields[1], FormField::new("agent", "99"));
        assert_eq!(store.saved_entries().len(), 1);
    }
}

//! 活动页跳转
//!
//! 访问活动页时不渲染页面，直接 302 到预填消息的 WhatsApp 会话。
//! 号码优先用归因推广员的，没有归因时用活动默认号码。

use tracing::{debug, warn};

use crate::errors::Result;
use crate::services::attribution::read_attribution;
use crate::storage::{Agent, Campaign, IdentityStore};

/// WhatsApp 发送接口，参数名 phone/text 与顺序固定
pub const WHATSAPP_SEND_URL: &str = "https://api.whatsapp.com/send";

/// 拼接 WhatsApp 跳转地址
///
/// 号码原样输出；消息按 RFC 3986 百分号编码（空格为 `%20`）。
pub fn build_whatsapp_redirect(campaign: &Campaign, agent: Option<&Agent>) -> String {
    let phone = agent
        .map(|a| a.phone_number.as_str())
        .unwrap_or(campaign.admin_phone.as_str());

    format!(
        "{}?phone={}&text={}",
        WHATSAPP_SEND_URL,
        phone,
        urlencoding::encode(&campaign.whatsapp_message)
    )
}

/// 查找可公开访问的活动
///
/// `key` 先按 slug 匹配，纯数字时再按 id 匹配；未发布的活动视为不存在
pub async fn find_viewable_campaign(
    store: &dyn IdentityStore,
    key: &str,
) -> Result<Option<Campaign>> {
    let mut campaign = store.find_campaign_by_slug(key).await?;

    if campaign.is_none()
        && !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && let Ok(id) = key.parse::<i64>()
    {
        campaign = store.get_campaign(id).await?;
    }

    Ok(campaign.filter(|c| {
        if !c.published {
            debug!("Campaign #{} is not published", c.id);
        }
        c.published
    }))
}

/// 计算活动页的跳转地址
///
/// 活动不存在返回 `Ok(None)`；读取归因失败时降级为默认号码
pub async fn campaign_redirect(
    store: &dyn IdentityStore,
    key: &str,
    attribution: Option<&str>,
) -> Result<Option<String>> {
    let Some(campaign) = find_viewable_campaign(store, key).await? else {
        return Ok(None);
    };

    let agent = match read_attribution(store, attribution).await {
        Ok(agent) => agent,
        Err(e) => {
            warn!(
                "Failed to read attribution for campaign #{}, using default number: {}",
                campaign.id, e
            );
            None
        }
    };

    Ok(Some(build_whatsapp_redirect(&campaign, agent.as_ref())))
}

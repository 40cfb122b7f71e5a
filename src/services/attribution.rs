//! 推荐归因
//!
//! 访问链接带 `?ref=<推荐码>` 时查找对应推广员并写入归因 Cookie，
//! 之后的请求通过 Cookie 中的推广员 id 取回推广员。最后一次成功解析覆盖之前的值。

use actix_web::cookie::{Cookie, SameSite};
use tracing::{debug, info};

use crate::config::AttributionConfig;
use crate::errors::Result;
use crate::storage::{Agent, IdentityStore};
use crate::utils::leading_int;

/// 一次请求的归因写入结果
#[derive(Debug, Clone)]
pub enum AttributionWrite {
    /// 没有 ref 参数或推荐码无匹配，已有 Cookie 保持不变
    Unchanged { existing: Option<String> },
    /// 解析成功，需要把 Cookie 写回客户端
    Stored {
        agent: Agent,
        cookie: Cookie<'static>,
    },
}

impl AttributionWrite {
    /// 本次请求后续处理应看到的归因值（推广员 id 字符串）
    pub fn effective_value(&self) -> Option<String> {
        match self {
            AttributionWrite::Unchanged { existing } => existing.clone(),
            AttributionWrite::Stored { agent, .. } => Some(agent.id.to_string()),
        }
    }

    pub fn cookie(&self) -> Option<&Cookie<'static>> {
        match self {
            AttributionWrite::Stored { cookie, .. } => Some(cookie),
            AttributionWrite::Unchanged { .. } => None,
        }
    }
}

/// 从查询串中取 ref 参数；重复出现时取最后一个
pub fn extract_ref_param(query_string: &str, param: &str) -> Option<String> {
    url::form_urlencoded::parse(query_string.as_bytes())
        .filter(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
        .last()
        .filter(|value| !value.is_empty())
}

/// 构造归因 Cookie：Path=/，无过期时间，HttpOnly，SameSite=Lax
pub fn attribution_cookie(agent_id: i64, config: &AttributionConfig) -> Cookie<'static> {
    let mut builder = Cookie::build(config.cookie_name.clone(), agent_id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure);

    if let Some(domain) = config.cookie_domain.as_ref().filter(|d| !d.is_empty()) {
        builder = builder.domain(domain.clone());
    }

    builder.finish()
}

/// 解析查询串中的推荐码，匹配成功时生成新的归因 Cookie
///
/// 查询失败以 `Err` 返回，由调用方决定如何降级
pub async fn resolve_and_store_attribution(
    store: &dyn IdentityStore,
    config: &AttributionConfig,
    query_string: &str,
    existing_cookie: Option<&str>,
) -> Result<AttributionWrite> {
    let unchanged = || AttributionWrite::Unchanged {
        existing: existing_cookie.map(str::to_string),
    };

    let Some(code) = extract_ref_param(query_string, &config.ref_param) else {
        return Ok(unchanged());
    };

    match store.find_agent_by_referral_code(&code).await? {
        Some(agent) => {
            info!("Attribution resolved: ref={} -> agent #{}", code, agent.id);
            let cookie = attribution_cookie(agent.id, config);
            Ok(AttributionWrite::Stored { agent, cookie })
        }
        None => {
            debug!("Unknown referral code: {}", code);
            Ok(unchanged())
        }
    }
}

/// 读取归因 Cookie 对应的推广员
///
/// Cookie 缺失、无法解析或推广员已删除时返回 `Ok(None)`
pub async fn read_attribution(
    store: &dyn IdentityStore,
    cookie_value: Option<&str>,
) -> Result<Option<Agent>> {
    let Some(raw) = cookie_value else {
        return Ok(None);
    };

    let id = leading_int(raw);
    if id <= 0 {
        debug!("Ignoring unparsable attribution cookie: {:?}", raw);
        return Ok(None);
    }

    let agent = store.get_agent(id).await?;
    if agent.is_none() {
        debug!("Attribution cookie points to missing agent #{}", id);
    }
    Ok(agent)
}

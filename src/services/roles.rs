//! 推广员角色与能力

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::storage::models::AGENT_ROLE;

/// 角色可授予的能力
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    /// 基础读取权限
    Read,
    /// 管理自己的推荐链接
    ManageOwnAffiliateLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Role {
    pub name: &'static str,
    pub display_name: &'static str,
    pub capabilities: &'static [Capability],
}

impl Role {
    pub fn has_cap(&self, cap: Capability) -> bool {
        self.capabilities.contains(&cap)
    }
}

/// 推广员角色：基础读取 + 管理自己的推荐链接
pub const AGENT: Role = Role {
    name: AGENT_ROLE,
    display_name: "Agent",
    capabilities: &[Capability::Read, Capability::ManageOwnAffiliateLink],
};

const ROLES: &[Role] = &[AGENT];

pub fn role_by_name(name: &str) -> Option<&'static Role> {
    ROLES.iter().find(|r| r.name == name)
}

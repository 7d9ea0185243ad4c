use serde::{Deserialize, Serialize};

// 记录状态（评分类型、评分、公式共用）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Active, // 启用
    Inactive, // 停用
}

impl Status {
    pub const ACTIVE: &'static str = "active";
    pub const INACTIVE: &'static str = "inactive";
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Active => write!(f, "{}", Status::ACTIVE),
            Status::Inactive => write!(f, "{}", Status::INACTIVE),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Status::ACTIVE => Ok(Status::Active),
            Status::INACTIVE => Ok(Status::Inactive),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

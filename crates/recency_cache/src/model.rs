use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub version: u8,
    pub capacity: i64,
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default)]
    pub operations: Vec<Step>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Lru,
    Fifo,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Lru => "lru",
            PolicyKind::Fifo => "fifo",
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    Put { key: i64, value: i64 },
    Get { key: i64 },
    Remove { key: i64 },
    Resize { capacity: i64 },
    Clear,
}

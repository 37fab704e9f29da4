use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: i32,
    pub total: i64,
    #[serde(rename = "lastPage")]
    pub last_page: i64,
}

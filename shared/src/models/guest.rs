//! Guest Model

use serde::{Deserialize, Serialize};

/// Guest entity (receptionist listing)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

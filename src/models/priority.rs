use serde::{Deserialize, Serialize};

/// Immutable priority reference data fetched from the server.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Priority {
    pub id: i32,
    pub name: String,
}

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    // Wire format for due dates: date and wall-clock time joined by 'T'.
    static ref DUE_DATE_REGEX: regex::Regex =
        regex::Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$").unwrap();
}

/// Represents a task as exchanged with the API.
///
/// The `id` is server-assigned and therefore absent until the task has been
/// persisted; absent fields are left off the wire entirely. `title` and a
/// well-formed `due_date` are required for creation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned by the server on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    /// Identifier of the owning user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    /// Reference to one of the server's priority records.
    pub priority_id: i32,
    /// Completion flag; new tasks start out not completed.
    #[serde(default)]
    pub is_completed: bool,
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Due timestamp, string-encoded as `YYYY-MM-DDTHH:MM`.
    #[validate(regex(
        path = "DUE_DATE_REGEX",
        message = "Due date must be formatted as YYYY-MM-DDTHH:MM"
    ))]
    pub due_date: String,
}

impl Task {
    /// Creates a new, not-yet-persisted `Task` owned by `user_id`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority_id: i32,
        due_date: impl Into<String>,
        user_id: Option<i32>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            priority_id,
            is_completed: false,
            title: title.into(),
            description: description.into(),
            due_date: due_date.into(),
        }
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated message from the announcements feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    /// Posting date as received
    pub date: String,

    /// Free-text category; the renderer maps it to an icon and color
    pub category: String,

    /// Message body
    pub message: String,
}

/// One event inside the recent-activity window, date already parsed so
/// the timeline can be ordered and bounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub date: NaiveDate,
    pub description: String,
}

use chrono::{Duration, NaiveDate};

use crate::errors::DashboardError;
use crate::models::announcement::{ActivityEvent, Announcement};
use crate::models::columns;
use crate::models::feed::{FeedKind, FeedTable};

use super::normalize::parse_feed_date;

/// Parses the announcements board and the recent-activity timeline.
///
/// Pure business logic, no I/O.
pub struct BulletinService;

impl BulletinService {
    pub fn new() -> Self {
        Self
    }

    /// All announcements, feed order preserved. The message column is
    /// required; date and category read as empty when absent. Rows
    /// without a message are skipped.
    pub fn announcements(&self, table: &FeedTable) -> Result<Vec<Announcement>, DashboardError> {
        let message_col = table.column_index(columns::MESSAGE).ok_or_else(|| {
            DashboardError::MissingColumn {
                feed: FeedKind::Announcements.label().into(),
                column: columns::MESSAGE.into(),
            }
        })?;
        let date_col = table.column_index(columns::DATE);
        let category_col = table.column_index(columns::CATEGORY);

        let mut out = Vec::new();
        for i in 0..table.row_count() {
            let message = table.cell(i, message_col).trim();
            if message.is_empty() {
                continue;
            }
            out.push(Announcement {
                date: date_col.map_or("", |c| table.cell(i, c)).trim().to_string(),
                category: category_col.map_or("", |c| table.cell(i, c)).trim().to_string(),
                message: message.to_string(),
            });
        }
        Ok(out)
    }

    /// Timeline events dated inside `[today - window_days, today]`,
    /// newest first. Rows whose date does not parse are skipped.
    pub fn recent_activity(
        &self,
        table: &FeedTable,
        today: NaiveDate,
        window_days: i64,
    ) -> Result<Vec<ActivityEvent>, DashboardError> {
        let date_col = table.column_index(columns::DATE).ok_or_else(|| {
            DashboardError::MissingColumn {
                feed: FeedKind::RecentActivity.label().into(),
                column: columns::DATE.into(),
            }
        })?;
        let desc_col = table.column_index(columns::ACTIVITY);

        let cutoff = today - Duration::days(window_days);

        let mut out = Vec::new();
        for i in 0..table.row_count() {
            let date = match parse_feed_date(table.cell(i, date_col)) {
                Some(d) => d,
                None => continue,
            };
            if date < cutoff || date > today {
                continue;
            }
            out.push(ActivityEvent {
                date,
                description: desc_col.map_or("", |c| table.cell(i, c)).trim().to_string(),
            });
        }

        out.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(out)
    }
}

impl Default for BulletinService {
    fn default() -> Self {
        Self::new()
    }
}

//! Date-window liveness shared by banners and posts.

use chrono::NaiveDate;

/// `start <= as_of <= end`, both ends inclusive. A missing `end` is open-ended.
pub fn is_live(as_of: NaiveDate, start: NaiveDate, end: Option<NaiveDate>) -> bool {
    start <= as_of && end.is_none_or(|end| end >= as_of)
}

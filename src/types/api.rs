use crate::config::SITE_ORIGIN;
use crate::db::{Board, NewBanner, NewPost};
use crate::service::AdminSession;
use crate::service::rotation::Step;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct RotateRequest {
    pub direction: Step,
}

#[derive(Debug, Default, Deserialize)]
pub struct AsOfQuery {
    pub as_of: Option<NaiveDate>,
}

/// Board listing query. With `as_of`, only posts live on that day are listed.
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    pub limit: Option<u32>,
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub is_admin: bool,
    pub admin_username: Option<String>,
}

impl From<&AdminSession> for SessionStatus {
    fn from(s: &AdminSession) -> Self {
        Self {
            is_admin: s.is_admin(),
            admin_username: s.username().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: i64,
    pub removed: bool,
}

/// Banner registration form. Omitted fields take the form's pre-filled values;
/// an omitted or null `end_date` leaves the banner open-ended.
#[derive(Debug, Deserialize)]
pub struct BannerForm {
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    pub link_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub order_index: Option<i64>,
}

impl BannerForm {
    pub fn into_new_banner(self, today: NaiveDate) -> NewBanner {
        NewBanner {
            title: self.title,
            image_url: self.image_url,
            link_url: self.link_url.unwrap_or_else(|| SITE_ORIGIN.to_string()),
            start_date: self.start_date.unwrap_or(today),
            end_date: self.end_date,
            order_index: self.order_index.unwrap_or(1),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub board: Board,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl PostForm {
    pub fn into_new_post(self, today: NaiveDate) -> NewPost {
        NewPost {
            board: self.board,
            title: self.title,
            content: self.content,
            image_url: self.image_url.filter(|s| !s.is_empty()),
            link_url: Some(
                self.link_url
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| SITE_ORIGIN.to_string()),
            ),
            start_date: self.start_date.unwrap_or(today),
            end_date: self.end_date,
            created_at: None,
        }
    }
}

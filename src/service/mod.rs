pub mod admin;
pub mod homepage;
pub mod rotation;
pub mod session;
pub mod visibility;

pub use admin::{AdminConsole, AdminSession, authorize};
pub use rotation::{BannerRotation, Step};
pub use session::{SESSION_COOKIE, SessionContext};

//! First-run content. Every set is inserted only into an empty table.

use super::models::{Board, NewBanner, NewPost};
use chrono::NaiveDate;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Documented first-run password; expected to be changed after first login.
pub const DEFAULT_ADMIN_PASSWORD: &str = "kita_admin_1234";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    // Constant dates below are all valid calendar days.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn default_banners() -> Vec<NewBanner> {
    vec![
        NewBanner {
            title: "프로세스 혁신으로 만드는 더 나은 내일".to_string(),
            image_url:
                "https://via.placeholder.com/1200x400/004080/FFFFFF?text=한국프로세스혁신협회+배너1"
                    .to_string(),
            link_url: "https://kpii.or.kr/".to_string(),
            start_date: ymd(2025, 1, 1),
            end_date: Some(ymd(2026, 12, 31)),
            order_index: 1,
        },
        NewBanner {
            title: "디지털 전환(DT)·RPA·AI 혁신 세미나".to_string(),
            image_url: "https://via.placeholder.com/1200x400/0066CC/FFFFFF?text=디지털+Insight+세미나"
                .to_string(),
            link_url: "https://event-us.kr/rpamaster/event/111478".to_string(),
            start_date: ymd(2025, 1, 1),
            end_date: Some(ymd(2026, 12, 31)),
            order_index: 2,
        },
    ]
}

const INTRO_GREETING: &str = "한국프로세스혁신협회 홈페이지를 방문해주신 여러분 진심으로 환영합니다.

일 자체의 혁신, 디지털을 이용한 혁신, 조직 문화의 혁신 등 모든 업무에 대한 개선과 발전을 주제로,
고착화 된 비효율을 제거하고 프로세스를 개선하는 토론과 공유의 장을 지향합니다.

협회가 조직 경영과 업무 혁신에 도움이 되는 소중한 장이 되기를 바라며 여러분의 믿음직한 동반자가 되도록 최선을 다하겠습니다.

한국프로세스혁신협회 설립자 강 승 원
";

/// One post per board, csr excluded: that board is filled by the listing migration.
pub fn default_posts() -> Vec<NewPost> {
    let post = |board: Board,
                title: &str,
                content: &str,
                image_url: Option<&str>,
                link_url: &str,
                start_date: NaiveDate,
                end_date: Option<NaiveDate>| NewPost {
        board,
        title: title.to_string(),
        content: content.to_string(),
        image_url: image_url.map(str::to_string),
        link_url: Some(link_url.to_string()),
        start_date,
        end_date,
        created_at: None,
    };

    vec![
        post(
            Board::Notice,
            "한국프로세스혁신협회 홈페이지 오픈 안내",
            "한국프로세스혁신협회 홈페이지를 방문해주신 여러분 진심으로 환영합니다.",
            None,
            "https://kpii.or.kr/",
            ymd(2025, 1, 1),
            Some(ymd(2026, 12, 31)),
        ),
        post(
            Board::Goodmorning,
            "굿모닝 KPII - 프로세스 혁신의 시작",
            "일 자체의 혁신, 디지털을 이용한 혁신, 조직 문화의 혁신을 함께 고민합니다.",
            Some("https://via.placeholder.com/400x250/007BFF/FFFFFF?text=Good+Morning+KPII"),
            "https://kpii.or.kr/shopinfo/company.html",
            ymd(2025, 12, 1),
            None,
        ),
        post(
            Board::Report,
            "프로세스 혁신 사례집 2025",
            "국내 공공기관과 민간기업의 프로세스 혁신 우수사례를 정리한 보고서입니다.",
            Some("https://via.placeholder.com/200x150/0056B3/FFFFFF?text=사례집+2025"),
            "https://kpii.or.kr/",
            ymd(2025, 12, 10),
            None,
        ),
        post(
            Board::Photo,
            "디지털 Insight 세미나 현장",
            "참석자들과 함께한 네트워킹 및 세션 전경입니다.",
            Some("https://via.placeholder.com/300x200/003366/FFFFFF?text=세미나+현장"),
            "https://event-us.kr/rpamaster/event/111478",
            ymd(2025, 9, 26),
            None,
        ),
        post(
            Board::Intro,
            "협회소개 및 인사말",
            INTRO_GREETING,
            None,
            "https://kpii.or.kr/shopinfo/company.html",
            ymd(2025, 1, 1),
            None,
        ),
        post(
            Board::Library,
            "자료실 안내",
            "프로세스 혁신, 디지털 전환, RPA, AI 관련 자료를 모아 제공합니다.",
            None,
            "https://kpii.or.kr/board/%EC%9E%90%EB%A3%8C%EC%8B%A4/7/",
            ymd(2025, 1, 1),
            None,
        ),
    ]
}

/// What `init_schema` inserted on this run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub banners_inserted: usize,
    pub posts_inserted: usize,
}

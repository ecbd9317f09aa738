use super::context::normalize_path;

pub const HOME_PATH: &str = "/";
pub const SIGN_IN_PATH: &str = "/login";
pub const QUIZ_HOME_PATH: &str = "/quiz";
pub const QUIZ_HISTORY_PATH: &str = "/quiz/history";
pub const QUIZ_QUESTION_PATH: &str = "/quiz/question";
pub const QUIZ_REPORT_PATH: &str = "/quiz/report";

const APP_NAME: &str = "algoscent";
const DEFAULT_TITLE: &str = "Page";

/// Access requirements and presentation data attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_guest: bool,
    pub title: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub meta: RouteMeta,
}

/// Known routes and their metadata.
///
/// Paths not in the table have no access requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::quiz_routes()
    }
}

impl RouteTable {
    #[must_use]
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Routes of the quiz feature plus the pages it redirects to.
    #[must_use]
    pub fn quiz_routes() -> Self {
        let authed = |title: &'static str| RouteMeta {
            requires_auth: true,
            requires_guest: false,
            title: Some(title),
        };
        Self::new(vec![
            RouteEntry {
                path: HOME_PATH,
                meta: RouteMeta {
                    title: Some("Home"),
                    ..RouteMeta::default()
                },
            },
            RouteEntry {
                path: SIGN_IN_PATH,
                meta: RouteMeta {
                    requires_guest: true,
                    title: Some("Sign in"),
                    ..RouteMeta::default()
                },
            },
            RouteEntry {
                path: QUIZ_HOME_PATH,
                meta: authed("Quiz"),
            },
            RouteEntry {
                path: QUIZ_HISTORY_PATH,
                meta: authed("Quiz history"),
            },
            RouteEntry {
                path: QUIZ_QUESTION_PATH,
                meta: authed("Questions"),
            },
            RouteEntry {
                path: QUIZ_REPORT_PATH,
                meta: authed("Report"),
            },
        ])
    }

    #[must_use]
    pub fn meta_for(&self, path: &str) -> RouteMeta {
        let path = normalize_path(path);
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.meta)
            .unwrap_or_default()
    }

    /// Document title shown while `path` is active.
    #[must_use]
    pub fn document_title(&self, path: &str) -> String {
        let title = self.meta_for(path).title.unwrap_or(DEFAULT_TITLE);
        format!("{APP_NAME} - {title}")
    }
}

//! Navigation rules for quiz pages.

mod context;
mod guard;
mod routes;

pub use context::{NavigationContext, NavigationParseError, normalize_path};
pub use guard::{
    AuthState, NavigationDecision, NavigationGuard, RedirectTarget, SESSION_QUERY_KEY,
    can_enter_question_view,
};
pub use routes::{
    HOME_PATH, QUIZ_HISTORY_PATH, QUIZ_HOME_PATH, QUIZ_QUESTION_PATH, QUIZ_REPORT_PATH,
    RouteEntry, RouteMeta, RouteTable, SIGN_IN_PATH,
};

use std::fmt;

use super::context::{NavigationContext, normalize_path};
use super::routes::{
    HOME_PATH, QUIZ_HISTORY_PATH, QUIZ_HOME_PATH, QUIZ_QUESTION_PATH, RouteTable,
};

/// Query key that lets a navigation reach the question view directly.
pub const SESSION_QUERY_KEY: &str = "sessionId";

/// Whether the current user holds an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    Anonymous,
}

impl AuthState {
    #[must_use]
    pub fn from_flag(authenticated: bool) -> Self {
        if authenticated {
            Self::Authenticated
        } else {
            Self::Anonymous
        }
    }

    #[must_use]
    pub fn is_authenticated(self) -> bool {
        matches!(self, AuthState::Authenticated)
    }
}

/// Where a refused navigation should go instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// The sign-in flow; the router decides its concrete location.
    SignIn { return_to: String },
    Home,
    QuizHome,
}

impl RedirectTarget {
    /// Concrete path, when the target has a fixed one.
    #[must_use]
    pub fn path(&self) -> Option<&'static str> {
        match self {
            RedirectTarget::SignIn { .. } => None,
            RedirectTarget::Home => Some(HOME_PATH),
            RedirectTarget::QuizHome => Some(QUIZ_HOME_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(RedirectTarget),
}

impl NavigationDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, NavigationDecision::Allow)
    }
}

impl fmt::Display for NavigationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationDecision::Allow => f.write_str("allow"),
            NavigationDecision::Redirect(RedirectTarget::SignIn { return_to }) => {
                write!(f, "redirect to sign-in (return to {return_to})")
            }
            NavigationDecision::Redirect(target) => {
                write!(f, "redirect to {}", target.path().unwrap_or_default())
            }
        }
    }
}

/// Access policy evaluated before every navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationGuard {
    routes: RouteTable,
    question_origins: Vec<String>,
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new(
            RouteTable::default(),
            vec![QUIZ_HOME_PATH.to_owned(), QUIZ_HISTORY_PATH.to_owned()],
        )
    }
}

impl NavigationGuard {
    #[must_use]
    pub fn new(routes: RouteTable, question_origins: Vec<String>) -> Self {
        Self {
            routes,
            question_origins,
        }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide whether `ctx` may proceed.
    ///
    /// Rules apply in order: authentication, guest-only pages, then the
    /// question view, which is only reachable from the quiz home or history
    /// pages, or with a `sessionId` query parameter.
    #[must_use]
    pub fn decide(&self, ctx: &NavigationContext, auth: AuthState) -> NavigationDecision {
        let meta = self.routes.meta_for(&ctx.target_path);

        if meta.requires_auth && !auth.is_authenticated() {
            return NavigationDecision::Redirect(RedirectTarget::SignIn {
                return_to: ctx.target_path.clone(),
            });
        }

        if meta.requires_guest && auth.is_authenticated() {
            return NavigationDecision::Redirect(RedirectTarget::Home);
        }

        if normalize_path(&ctx.target_path) == QUIZ_QUESTION_PATH {
            let origin = normalize_path(&ctx.origin_path);
            let from_allowed = self
                .question_origins
                .iter()
                .any(|allowed| normalize_path(allowed) == origin);
            if !from_allowed && !ctx.has_query(SESSION_QUERY_KEY) {
                return NavigationDecision::Redirect(RedirectTarget::QuizHome);
            }
        }

        NavigationDecision::Allow
    }
}

/// Evaluate the default quiz navigation policy.
#[must_use]
pub fn can_enter_question_view(ctx: &NavigationContext, auth: AuthState) -> NavigationDecision {
    NavigationGuard::default().decide(ctx, auth)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHED: AuthState = AuthState::Authenticated;

    fn question_from(origin: &str) -> NavigationContext {
        NavigationContext::new(QUIZ_QUESTION_PATH, origin)
    }

    #[test]
    fn allows_from_quiz_home() {
        let decision = can_enter_question_view(&question_from("/quiz"), AUTHED);
        assert_eq!(decision, NavigationDecision::Allow);
    }

    #[test]
    fn allows_from_history_with_trailing_slash() {
        let decision = can_enter_question_view(&question_from("/quiz/history/"), AUTHED);
        assert!(decision.is_allowed());
    }

    #[test]
    fn redirects_from_unrelated_origin() {
        let decision = can_enter_question_view(&question_from("/profile"), AUTHED);
        assert_eq!(
            decision,
            NavigationDecision::Redirect(RedirectTarget::QuizHome)
        );
        assert_eq!(decision.to_string(), "redirect to /quiz");
    }

    #[test]
    fn session_query_allows_any_origin() {
        let ctx = question_from("/profile").with_query(SESSION_QUERY_KEY, "AROMA_1");
        assert!(can_enter_question_view(&ctx, AUTHED).is_allowed());

        let ctx = question_from("").with_query(SESSION_QUERY_KEY, "");
        assert!(can_enter_question_view(&ctx, AUTHED).is_allowed());
    }

    #[test]
    fn anonymous_user_is_sent_to_sign_in_first() {
        let ctx = question_from("/quiz");
        let decision = can_enter_question_view(&ctx, AuthState::Anonymous);
        assert_eq!(
            decision,
            NavigationDecision::Redirect(RedirectTarget::SignIn {
                return_to: QUIZ_QUESTION_PATH.to_owned()
            })
        );
    }

    #[test]
    fn signed_in_user_skips_guest_pages() {
        let ctx = NavigationContext::new("/login", "/quiz");
        assert_eq!(
            can_enter_question_view(&ctx, AUTHED),
            NavigationDecision::Redirect(RedirectTarget::Home)
        );
        assert!(can_enter_question_view(&ctx, AuthState::Anonymous).is_allowed());
    }

    #[test]
    fn unrelated_targets_are_allowed() {
        let ctx = NavigationContext::new("/about", "/profile");
        assert!(can_enter_question_view(&ctx, AuthState::Anonymous).is_allowed());
    }

    #[test]
    fn custom_origins_replace_defaults() {
        let guard = NavigationGuard::new(RouteTable::default(), vec!["/quiz/report".into()]);
        assert!(guard.decide(&question_from("/quiz/report"), AUTHED).is_allowed());
        assert!(!guard.decide(&question_from("/quiz"), AUTHED).is_allowed());
    }

    #[test]
    fn from_flag_maps_booleans() {
        assert!(AuthState::from_flag(true).is_authenticated());
        assert!(!AuthState::from_flag(false).is_authenticated());
    }
}

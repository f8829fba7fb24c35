//! Navigable routes and the route guard
//!
//! The guard is a pure function of the current session: it never touches the
//! network or the session store and is evaluated before every protected view.

use super::session::Session;
use super::user::Role;

/// Application views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    /// Default protected view (job seeker dashboard)
    Dashboard,
    AdminDashboard,
}

impl Route {
    /// Route a user lands on after logging in
    pub fn landing_for(role: Role) -> Self {
        if role.is_admin() {
            Route::AdminDashboard
        } else {
            Route::Dashboard
        }
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Route::Dashboard | Route::AdminDashboard)
    }

    pub fn requires_admin(self) -> bool {
        matches!(self, Route::AdminDashboard)
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::AdminDashboard => "/admin/dashboard",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of evaluating the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

impl GuardDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    /// Where to send the user instead, if anywhere
    pub fn redirect(self) -> Option<Route> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(Route::Login),
            GuardDecision::RedirectToDashboard => Some(Route::Dashboard),
        }
    }
}

/// Decides whether a protected view may render
pub fn guard(session: Option<&Session>, requires_admin: bool) -> GuardDecision {
    match session {
        None => GuardDecision::RedirectToLogin,
        Some(session) if requires_admin && !session.is_admin() => {
            GuardDecision::RedirectToDashboard
        }
        Some(_) => GuardDecision::Allow,
    }
}

/// Applies [`guard`] for a specific route; public routes always allow
pub fn guard_route(session: Option<&Session>, route: Route) -> GuardDecision {
    if !route.is_protected() {
        return GuardDecision::Allow;
    }
    guard(session, route.requires_admin())
}

use crate::settings::types::Settings;

/// What the decision engine knows about a single incoming request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub is_admin_context: bool,
    pub is_authenticated: bool,
    pub is_homepage: bool,
    /// Raw value of the marker cookie, if the client sent one.
    pub marker: Option<String>,
}

impl RequestContext {
    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }
}

/// Whether a request may be considered for a redirect at all.
///
/// Rules are checked in order and the first failing one wins: administrative
/// views, logged in users, a disabled feature, then the homepage restriction.
pub fn is_eligible(ctx: &RequestContext, settings: &Settings) -> bool {
    if ctx.is_admin_context {
        return false;
    }
    if ctx.is_authenticated {
        return false;
    }
    if !settings.is_enabled() {
        return false;
    }
    if settings.only_homepage && !ctx.is_homepage {
        return false;
    }
    true
}

/// Whether `path` addresses `route`, ignoring a trailing slash on either side.
pub fn matches_route(path: &str, route: &str) -> bool {
    path.trim_end_matches('/') == route.trim_end_matches('/')
}

/// Whether `path` is `prefix` itself or lives below it.
pub fn is_under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::timeout::TimeoutUnit;

    fn settings() -> Settings {
        Settings {
            redirect_url: "https://example.com/landing".into(),
            timeout_value: 30,
            timeout_unit: TimeoutUnit::Minutes,
            only_homepage: false,
        }
    }

    fn visitor() -> RequestContext {
        RequestContext::default()
    }

    #[test]
    fn anonymous_visitor_is_eligible() {
        assert!(is_eligible(&visitor(), &settings()));
    }

    #[test]
    fn admin_and_authenticated_are_never_eligible() {
        let admin = RequestContext {
            is_admin_context: true,
            is_homepage: true,
            ..visitor()
        };
        let user = RequestContext {
            is_authenticated: true,
            is_homepage: true,
            ..visitor()
        };
        assert!(!is_eligible(&admin, &settings()));
        assert!(!is_eligible(&user, &settings()));
    }

    #[test]
    fn empty_url_disables() {
        let disabled = Settings {
            redirect_url: String::new(),
            ..settings()
        };
        assert!(!is_eligible(&visitor(), &disabled));
    }

    #[test]
    fn homepage_restriction() {
        let restricted = Settings {
            only_homepage: true,
            ..settings()
        };
        let home = RequestContext {
            is_homepage: true,
            ..visitor()
        };
        assert!(!is_eligible(&visitor(), &restricted));
        assert!(is_eligible(&home, &restricted));
    }

    #[test]
    fn route_matching() {
        assert!(matches_route("/", "/"));
        assert!(matches_route("/home/", "/home"));
        assert!(!matches_route("/about", "/"));

        assert!(is_under_prefix("/admin", "/admin"));
        assert!(is_under_prefix("/admin/settings", "/admin/"));
        assert!(!is_under_prefix("/administrator", "/admin"));
        assert!(!is_under_prefix("/blog/admin", "/admin"));
    }
}

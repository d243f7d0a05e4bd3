use super::{
    scope::{RequestContext, is_eligible},
    timeout::convert,
};
use crate::settings::types::Settings;

/// Outcome of evaluating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    NoAction,
    Redirect {
        url: String,
        marker_expiry_seconds: u64,
    },
}

/// Decides whether this request is the one that moves the client from
/// unmarked to marked.
///
/// Marker trust is presence only: its value and freshness are not inspected,
/// the client is relied upon to drop it once it expires.
pub fn decide(ctx: &RequestContext, settings: &Settings) -> Decision {
    if !is_eligible(ctx, settings) {
        return Decision::NoAction;
    }
    if ctx.has_marker() {
        return Decision::NoAction;
    }
    Decision::Redirect {
        url: settings.redirect_url.clone(),
        marker_expiry_seconds: convert(settings.timeout_value, settings.timeout_unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::timeout::TimeoutUnit;

    fn landing() -> Settings {
        Settings {
            redirect_url: "https://example.com/landing".into(),
            timeout_value: 30,
            timeout_unit: TimeoutUnit::Minutes,
            only_homepage: false,
        }
    }

    #[test]
    fn first_visit_redirects_with_converted_expiry() {
        let decision = decide(&RequestContext::default(), &landing());
        assert_eq!(
            decision,
            Decision::Redirect {
                url: "https://example.com/landing".into(),
                marker_expiry_seconds: 1800,
            }
        );
    }

    #[test]
    fn marker_suppresses_every_later_visit() {
        let marked = RequestContext {
            marker: Some("1".into()),
            ..Default::default()
        };
        for _ in 0..3 {
            assert_eq!(decide(&marked, &landing()), Decision::NoAction);
        }
    }

    #[test]
    fn marker_value_is_not_inspected() {
        let marked = RequestContext {
            marker: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(decide(&marked, &landing()), Decision::NoAction);
    }

    #[test]
    fn bypass_wins_over_everything() {
        for (admin, authenticated) in [(true, false), (false, true), (true, true)] {
            let ctx = RequestContext {
                is_admin_context: admin,
                is_authenticated: authenticated,
                is_homepage: true,
                marker: None,
            };
            assert_eq!(decide(&ctx, &landing()), Decision::NoAction);
        }
    }

    #[test]
    fn disabled_feature_never_redirects() {
        let disabled = Settings {
            redirect_url: String::new(),
            ..landing()
        };
        let home = RequestContext {
            is_homepage: true,
            ..Default::default()
        };
        assert_eq!(decide(&home, &disabled), Decision::NoAction);
    }

    #[test]
    fn homepage_only_skips_other_pages() {
        let restricted = Settings {
            only_homepage: true,
            ..landing()
        };
        assert_eq!(
            decide(&RequestContext::default(), &restricted),
            Decision::NoAction
        );
    }

    #[test]
    fn expiry_is_the_converted_timeout() {
        for (value, unit) in [(30, "minutes"), (12, "hours"), (7, "days")] {
            let settings = Settings {
                timeout_value: value,
                timeout_unit: unit.into(),
                ..landing()
            };
            assert_eq!(
                decide(&RequestContext::default(), &settings),
                Decision::Redirect {
                    url: "https://example.com/landing".into(),
                    marker_expiry_seconds: convert(value, unit),
                }
            );
        }
    }

    #[test]
    fn expiry_follows_unit() {
        let daily = Settings {
            timeout_value: 2,
            timeout_unit: TimeoutUnit::Days,
            ..landing()
        };
        match decide(&RequestContext::default(), &daily) {
            Decision::Redirect {
                marker_expiry_seconds,
                ..
            } => assert_eq!(marker_expiry_seconds, 172800),
            other => panic!("expected redirect, got {other:?}"),
        }
    }
}

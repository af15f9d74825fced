use std::time::Duration;

use oobflash_core::{FlashConfig, InjectionOutcome};

use super::{policy_report, timeline_report};
use crate::cli::{PolicyArgs, TimelineArgs};

fn policy_args(partial: bool, pending: bool, headers: &[&str]) -> PolicyArgs {
    PolicyArgs {
        partial,
        pending,
        headers: headers.iter().map(ToString::to_string).collect(),
    }
}

#[test]
fn policy_report_injects_for_partial_update_with_pending_notifications() {
    let report = policy_report(&FlashConfig::default(), &policy_args(true, true, &[]));
    assert!(report.decision);
    assert_eq!(report.outcome, InjectionOutcome::Injected);
    assert_eq!(
        report.override_headers,
        vec!["hx-location", "hx-redirect", "hx-refresh"]
    );
}

#[test]
fn policy_report_names_the_override_header() {
    let report = policy_report(
        &FlashConfig::default(),
        &policy_args(true, true, &["HX-Redirect"]),
    );
    assert!(!report.decision);
    assert_eq!(
        report.outcome,
        InjectionOutcome::NavigationOverride("hx-redirect".to_string())
    );

    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["decision"], false);
    assert_eq!(json["outcome"], "navigation_override");
    assert_eq!(json["header"], "hx-redirect");
}

#[test]
fn policy_report_uses_configured_extra_headers() {
    let config = FlashConfig {
        extra_override_headers: vec!["X-Up-Location".to_string()],
        ..FlashConfig::default()
    };
    let report = policy_report(&config, &policy_args(true, true, &["x-up-location"]));
    assert!(!report.decision);
    assert!(report.override_headers.contains(&"x-up-location".to_string()));
}

#[test]
fn policy_report_for_full_navigation() {
    let report = policy_report(&FlashConfig::default(), &policy_args(false, true, &[]));
    assert!(!report.decision);
    assert_eq!(report.outcome, InjectionOutcome::FullNavigation);
}

#[test]
fn timeline_report_uses_configured_delay_unless_overridden() {
    let args = TimelineArgs {
        at: vec![0, 500],
        dismiss_ms: None,
        transition_ms: None,
    };
    let report = timeline_report(&FlashConfig::default(), &args);
    assert_eq!(report.dismiss_ms, 2_000);
    assert_eq!(report.transition_ms, 300);
    assert_eq!(report.dismissals.len(), 2);
    assert_eq!(report.dismissals[0].hidden_at, Duration::from_millis(2_000));
    assert_eq!(report.dismissals[1].hidden_at, Duration::from_millis(2_500));

    let args = TimelineArgs {
        at: vec![100],
        dismiss_ms: Some(1_000),
        transition_ms: Some(0),
    };
    let report = timeline_report(&FlashConfig::default(), &args);
    assert_eq!(report.dismissals[0].hidden_at, Duration::from_millis(1_100));
    assert_eq!(report.dismissals[0].removed_at, Duration::from_millis(1_100));
}

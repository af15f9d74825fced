use super::*;
use clap::Parser;

#[test]
fn serve_defaults_to_local_listener() {
    let cli = Cli::try_parse_from(["oobflash", "serve"]).expect("parse");
    match cli.command {
        Commands::Serve(WebArgs { host, port }) => {
            assert_eq!(host, "127.0.0.1");
            assert_eq!(port, 8788);
        }
        _ => panic!("expected serve command"),
    }
}

#[test]
fn policy_collects_repeated_headers() {
    let cli = Cli::try_parse_from([
        "oobflash",
        "policy",
        "--partial",
        "--pending",
        "--header",
        "HX-Refresh",
        "--header",
        "HX-Trigger",
    ])
    .expect("parse");
    match cli.command {
        Commands::Policy(PolicyArgs {
            partial,
            pending,
            headers,
        }) => {
            assert!(partial);
            assert!(pending);
            assert_eq!(headers, vec!["HX-Refresh".to_string(), "HX-Trigger".to_string()]);
        }
        _ => panic!("expected policy command"),
    }
}

#[test]
fn timeline_requires_at_least_one_offset() {
    assert!(Cli::try_parse_from(["oobflash", "timeline"]).is_err());
}

#[test]
fn timeline_parses_offsets_and_overrides() {
    let cli = Cli::try_parse_from([
        "oobflash",
        "timeline",
        "--at",
        "0",
        "500",
        "--dismiss-ms",
        "1500",
    ])
    .expect("parse");
    match cli.command {
        Commands::Timeline(TimelineArgs {
            at,
            dismiss_ms,
            transition_ms,
        }) => {
            assert_eq!(at, vec![0, 500]);
            assert_eq!(dismiss_ms, Some(1500));
            assert_eq!(transition_ms, None);
        }
        _ => panic!("expected timeline command"),
    }
}

#[test]
fn timeline_rejects_zero_dismiss_delay() {
    let parsed = Cli::try_parse_from(["oobflash", "timeline", "--at", "0", "--dismiss-ms", "0"]);
    assert!(parsed.is_err(), "zero delay must be rejected");
}

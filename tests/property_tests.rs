//! Property-based tests for fingerprints and duplicate matching.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use compat_reporter::core::config::ReporterConfig;
use compat_reporter::core::fingerprint::Fingerprint;
use compat_reporter::core::platform::Platform;
use compat_reporter::core::report::Report;
use compat_reporter::engine::find_duplicate;
use compat_reporter::forge::Issue;

/// Strategy for OS names seen on CI runners.
fn os_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Linux".to_string()),
        Just("Darwin".to_string()),
        Just("Windows".to_string()),
    ]
}

/// Strategy for machine names seen on CI runners.
fn machine_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("x86_64".to_string()),
        Just("aarch64".to_string()),
        Just("arm64".to_string()),
        Just("AMD64".to_string()),
    ]
}

fn config(title: &str) -> ReporterConfig {
    let title = title.to_string();
    ReporterConfig::from_lookup(move |key| match key {
        "GITHUB_REPOSITORY" => Some("acme/widgets".into()),
        "GITHUB_RUN_ID" => Some("1".into()),
        "GITHUB_SHA" => Some("abc".into()),
        "ISSUE_TITLE" => Some(title.clone()),
        "GITHUB_TOKEN" => Some("t".into()),
        _ => None,
    })
    .unwrap()
}

proptest! {
    #[test]
    fn fingerprint_is_deterministic(body in ".*", os in os_name(), machine in machine_name()) {
        prop_assert_eq!(
            Fingerprint::compute(&body, &os, &machine),
            Fingerprint::compute(&body, &os, &machine)
        );
    }

    #[test]
    fn fingerprint_is_short_lowercase_hex(body in ".*", os in os_name(), machine in machine_name()) {
        let fp = Fingerprint::compute(&body, &os, &machine);
        prop_assert!(!fp.as_str().is_empty() && fp.as_str().len() <= 8);
        prop_assert!(fp.as_str().chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        prop_assert!(fp.as_str() == "0" || !fp.as_str().starts_with('0'));
    }

    #[test]
    fn single_byte_edits_change_fingerprint(body in "[a-z]{1,64}", idx in any::<prop::sample::Index>()) {
        let i = idx.index(body.len());
        let mut edited = body.clone().into_bytes();
        edited[i] = if edited[i] == b'z' { b'a' } else { edited[i] + 1 };
        let edited = String::from_utf8(edited).unwrap();

        // CRC-32 detects every single-byte change.
        prop_assert_ne!(
            Fingerprint::compute(&body, "Linux", "x86_64"),
            Fingerprint::compute(&edited, "Linux", "x86_64")
        );
    }

    #[test]
    fn rendered_issue_is_its_own_duplicate(
        body in "[ -~\n]{0,200}",
        title in "[A-Za-z0-9 ]{1,30}",
        os in os_name(),
        machine in machine_name(),
    ) {
        let platform = Platform::new(os, machine);
        let report = Report::render(&config(&title), &platform, &body);

        let issues = vec![Issue { number: 1, title: report.title.clone(), body: Some(report.body.clone()) }];
        prop_assert!(find_duplicate(&issues, &report.fingerprint).is_some());
        prop_assert_eq!(report.fingerprint, Fingerprint::for_platform(&body, &platform));
    }

    #[test]
    fn template_inputs_do_not_affect_fingerprint(body in ".*", a in "[a-z]{1,10}", b in "[a-z]{1,10}") {
        let platform = Platform::new("Linux", "x86_64");
        let first = Report::render(&config(&a), &platform, &body);
        let second = Report::render(&config(&b), &platform.clone().with_summary("elsewhere"), &body);
        prop_assert_eq!(first.fingerprint, second.fingerprint);
    }
}

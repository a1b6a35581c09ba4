use std::thread;
use std::time::Duration;

use tracing::Level;

use passcode_otp::domain::types::{OtpPolicy, ValidationOutcome};
use passcode_otp::error::OtpServiceError;
use passcode_otp::usecase::generate::GenerateOtpInput;

use crate::helpers::{Harness, LogCapture, TEST_IDENTIFIER, validate_input, wrong_code};

// ── GenerateOtpUseCase ───────────────────────────────────────────────────────

#[test]
fn should_generate_six_digit_code_with_thirty_second_window() {
    let harness = Harness::new();
    let output = harness.generate(TEST_IDENTIFIER);

    assert_eq!(output.code.len(), 6);
    assert!(output.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(output.expires_in_secs, 30);
    assert!(harness.store.contains(TEST_IDENTIFIER));
}

#[test]
fn should_honor_configured_code_length() {
    let harness = Harness::with_policy(OtpPolicy::new(10, Duration::from_secs(60)));
    let output = harness.generate(TEST_IDENTIFIER);

    assert_eq!(output.code.len(), 10);
    assert_eq!(output.expires_in_secs, 60);
}

#[test]
fn should_trim_identifier_before_storing() {
    let harness = Harness::new();
    let output = harness.generate("  a@b.com \n");

    assert_eq!(output.identifier, TEST_IDENTIFIER);
    assert!(harness.store.contains(TEST_IDENTIFIER));

    let outcome = harness
        .validator()
        .execute(validate_input(" a@b.com ", &format!(" {} ", output.code)))
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::Success);
}

#[test]
fn should_reject_blank_identifier_on_generate() {
    let harness = Harness::new();

    for identifier in ["", "   ", "\t\n"] {
        let result = harness.generator().execute(GenerateOtpInput {
            identifier: identifier.to_owned(),
        });
        assert!(
            matches!(result, Err(OtpServiceError::InvalidInput("identifier"))),
            "expected InvalidInput, got {result:?}"
        );
    }
    assert!(harness.store.is_empty());
}

// ── ValidateOtpUseCase ───────────────────────────────────────────────────────

#[test]
fn should_succeed_once_then_report_not_found() {
    let harness = Harness::new();
    let output = harness.generate(TEST_IDENTIFIER);
    let validator = harness.validator();

    let first = validator
        .execute(validate_input(TEST_IDENTIFIER, &output.code))
        .unwrap();
    let second = validator
        .execute(validate_input(TEST_IDENTIFIER, &output.code))
        .unwrap();

    assert_eq!(first, ValidationOutcome::Success);
    assert_eq!(second, ValidationOutcome::NotFound);
}

#[test]
fn should_allow_retry_after_mismatch() {
    let harness = Harness::new();
    let output = harness.generate(TEST_IDENTIFIER);
    let validator = harness.validator();

    for _ in 0..5 {
        let outcome = validator
            .execute(validate_input(TEST_IDENTIFIER, &wrong_code(&output.code)))
            .unwrap();
        assert_eq!(outcome, ValidationOutcome::Mismatch);
    }

    let outcome = validator
        .execute(validate_input(TEST_IDENTIFIER, &output.code))
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::Success);
}

#[test]
fn should_report_not_found_without_generate() {
    let harness = Harness::new();
    let outcome = harness
        .validator()
        .execute(validate_input(TEST_IDENTIFIER, "123456"))
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::NotFound);
}

#[test]
fn should_reject_blank_fields_without_touching_store() {
    let harness = Harness::new();
    let output = harness.generate(TEST_IDENTIFIER);
    let validator = harness.validator();

    let missing_identifier = validator.execute(validate_input(" ", &output.code));
    assert!(
        matches!(missing_identifier, Err(OtpServiceError::InvalidInput("identifier"))),
        "expected InvalidInput(identifier), got {missing_identifier:?}"
    );

    let missing_code = validator.execute(validate_input(TEST_IDENTIFIER, "  "));
    assert!(
        matches!(missing_code, Err(OtpServiceError::InvalidInput("code"))),
        "expected InvalidInput(code), got {missing_code:?}"
    );

    let both_missing = validator.execute(validate_input("", ""));
    assert!(
        matches!(both_missing, Err(OtpServiceError::InvalidInput("identifier"))),
        "expected InvalidInput(identifier), got {both_missing:?}"
    );

    assert!(harness.store.contains(TEST_IDENTIFIER));
}

// ── Expiry boundary ──────────────────────────────────────────────────────────

#[test]
fn should_accept_code_at_exact_window_boundary() {
    let harness = Harness::new();
    let output = harness.generate(TEST_IDENTIFIER);

    harness.clock.advance(Duration::from_secs(30));

    let outcome = harness
        .validator()
        .execute(validate_input(TEST_IDENTIFIER, &output.code))
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::Success);
}

#[test]
fn should_expire_code_just_past_window() {
    let harness = Harness::new();
    let output = harness.generate(TEST_IDENTIFIER);

    harness
        .clock
        .advance(Duration::from_secs(30) + Duration::from_nanos(1));

    let validator = harness.validator();
    let outcome = validator
        .execute(validate_input(TEST_IDENTIFIER, &output.code))
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::Expired);
    assert!(!harness.store.contains(TEST_IDENTIFIER));

    let again = validator
        .execute(validate_input(TEST_IDENTIFIER, &output.code))
        .unwrap();
    assert_eq!(again, ValidationOutcome::NotFound);
}

#[test]
fn should_expire_before_comparing_wrong_code() {
    let harness = Harness::new();
    let output = harness.generate(TEST_IDENTIFIER);

    harness.clock.advance(Duration::from_secs(31));

    let outcome = harness
        .validator()
        .execute(validate_input(TEST_IDENTIFIER, &wrong_code(&output.code)))
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::Expired);
}

#[test]
fn should_keep_expired_record_until_checked() {
    let harness = Harness::new();
    harness.generate(TEST_IDENTIFIER);

    harness.clock.advance(Duration::from_secs(3600));

    assert!(harness.store.contains(TEST_IDENTIFIER));
}

// ── Overwrite ────────────────────────────────────────────────────────────────

#[test]
fn should_invalidate_first_code_after_regenerate() {
    let harness = Harness::new();
    let first = harness.generate(TEST_IDENTIFIER);
    let second = harness.generate(TEST_IDENTIFIER);
    let validator = harness.validator();

    if first.code != second.code {
        let outcome = validator
            .execute(validate_input(TEST_IDENTIFIER, &first.code))
            .unwrap();
        assert_eq!(outcome, ValidationOutcome::Mismatch);
    }

    let outcome = validator
        .execute(validate_input(TEST_IDENTIFIER, &second.code))
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::Success);
}

#[test]
fn should_restart_window_on_regenerate() {
    let harness = Harness::new();
    harness.generate(TEST_IDENTIFIER);

    harness.clock.advance(Duration::from_secs(25));
    let second = harness.generate(TEST_IDENTIFIER);
    harness.clock.advance(Duration::from_secs(25));

    let outcome = harness
        .validator()
        .execute(validate_input(TEST_IDENTIFIER, &second.code))
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::Success);
}

// ── Concurrency ──────────────────────────────────────────────────────────────

#[test]
fn should_allow_exactly_one_concurrent_success() {
    let harness = Harness::new();
    let output = harness.generate(TEST_IDENTIFIER);

    let outcomes: Vec<ValidationOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let validator = harness.validator();
                let code = output.code.clone();
                scope.spawn(move || {
                    validator
                        .execute(validate_input(TEST_IDENTIFIER, &code))
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let successes = outcomes
        .iter()
        .filter(|o| **o == ValidationOutcome::Success)
        .count();
    assert_eq!(successes, 1, "outcomes: {outcomes:?}");
    assert!(
        outcomes
            .iter()
            .all(|o| matches!(o, ValidationOutcome::Success | ValidationOutcome::NotFound)),
        "outcomes: {outcomes:?}"
    );
}

#[test]
fn should_handle_distinct_identifiers_in_parallel() {
    let harness = Harness::new();
    let issued: Vec<(String, String)> = (0..32)
        .map(|i| {
            let identifier = format!("user{i}@example.com");
            let code = harness.generate(&identifier).code;
            (identifier, code)
        })
        .collect();

    thread::scope(|scope| {
        for (identifier, code) in &issued {
            let validator = harness.validator();
            scope.spawn(move || {
                let outcome = validator
                    .execute(validate_input(identifier, code))
                    .unwrap();
                assert_eq!(outcome, ValidationOutcome::Success);
            });
        }
    });

    assert!(harness.store.is_empty());
}

// ── Logging ──────────────────────────────────────────────────────────────────

#[test]
fn should_keep_identifier_out_of_info_logs() {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let harness = Harness::new();
        let output = harness.generate(TEST_IDENTIFIER);
        let validator = harness.validator();
        validator
            .execute(validate_input(TEST_IDENTIFIER, &wrong_code(&output.code)))
            .unwrap();
        validator
            .execute(validate_input(TEST_IDENTIFIER, &output.code))
            .unwrap();
    });

    let logs = capture.contents();
    assert!(logs.contains("otp issued"), "logs: {logs}");
    assert!(logs.contains("otp consumed"), "logs: {logs}");
    assert!(!logs.contains(TEST_IDENTIFIER), "identifier leaked: {logs}");
}

use docseb_core::error::SessionError;
use docseb_core::session::{sanitize_pin_input, verify_pin, SessionContext, DEFAULT_SESSION_DURATION};
use jiff::{SignedDuration, Timestamp};

fn at(seconds: i64) -> Timestamp {
    Timestamp::from_second(seconds).unwrap()
}

#[test]
fn fresh_session_is_not_valid() {
    let session = SessionContext::default();
    assert_eq!(session.started_at(), None);
    assert!(!session.is_valid(at(1_700_000_000)));
}

#[test]
fn session_lasts_seven_days_inclusive() {
    let start = at(1_700_000_000);
    let mut session = SessionContext::default();
    session.start(start);

    let week = 7 * 24 * 60 * 60;
    assert!(session.is_valid(start));
    assert!(session.is_valid(at(1_700_000_000 + week)));
    assert!(!session.is_valid(at(1_700_000_000 + week + 1)));
    assert_eq!(session.expires_at(), Some(at(1_700_000_000 + week)));
    assert_eq!(session.duration(), DEFAULT_SESSION_DURATION);
}

#[test]
fn clear_ends_the_session() {
    let start = at(1_700_000_000);
    let mut session = SessionContext::new(SignedDuration::from_hours(1));
    session.start(start);
    session.clear();
    assert!(!session.is_valid(start));
    assert_eq!(session.expires_at(), None);
}

#[test]
fn resumed_session_uses_its_own_lifetime() {
    let session = SessionContext::resume(at(1_000), SignedDuration::from_secs(60));
    assert!(session.is_valid(at(1_060)));
    assert!(!session.is_valid(at(1_061)));
}

#[test]
fn restarting_moves_the_window() {
    let mut session = SessionContext::new(SignedDuration::from_secs(10));
    session.start(at(0));
    assert!(!session.is_valid(at(20)));
    session.start(at(15));
    assert!(session.is_valid(at(20)));
}

#[test]
fn future_start_is_not_valid() {
    let session = SessionContext::resume(at(4_000_000_000), DEFAULT_SESSION_DURATION);
    assert!(!session.is_valid(at(1_700_000_000)));
    assert!(session.is_valid(at(4_000_000_000)));
    assert!(!session.is_valid(at(3_999_999_999)));
}

#[test]
fn pin_must_be_six_digits() {
    assert_eq!(verify_pin("12345", "123456"), Err(SessionError::MalformedPin));
    assert_eq!(verify_pin("12345a", "123456"), Err(SessionError::MalformedPin));
    assert_eq!(verify_pin("1234567", "123456"), Err(SessionError::MalformedPin));
}

#[test]
fn pin_must_match() {
    assert_eq!(verify_pin("654321", "123456"), Err(SessionError::PinMismatch));
    assert_eq!(verify_pin("123456", "123456"), Ok(()));
    assert_eq!(verify_pin("123457", "123456"), Err(SessionError::PinMismatch));
    assert_eq!(verify_pin("123456", "1234567"), Err(SessionError::PinMismatch));
}

#[test]
fn pasted_pin_keeps_first_six_digits() {
    assert_eq!(sanitize_pin_input("48-29 31 77"), "482931");
    assert_eq!(sanitize_pin_input("abc"), "");
    assert_eq!(sanitize_pin_input("12"), "12");
}

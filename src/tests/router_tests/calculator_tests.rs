// src/tests/router_tests/calculator_tests.rs

use crate::config::AppConfig;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::*;

const SUBJECT_SHEET: &str = "\
Property Address: 123 Main St
Asking Price: $250,000
Acres: 5
Flood Zone: 100-Year Floodplain
Heavy debris from old structure
";

#[test]
fn first_visit_issues_a_session_cookie() {
    let state = test_state();
    let mut resp = send(&state, get("/", None));

    assert_eq!(resp.status(), 200);
    let cookie = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with("landcalc_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(body_string(&mut resp).contains("Land Evaluation Calculator"));
}

#[test]
fn known_cookie_is_not_reissued() {
    let state = test_state();
    let token = start_session(&state);

    let resp = send(&state, get("/", Some(&token)));
    assert!(resp.headers().get("Set-Cookie").is_none());
}

#[test]
fn unknown_cookie_starts_a_fresh_session() {
    let state = test_state();
    let resp = send(&state, get("/", Some("forged-token")));
    assert_ne!(session_token(&resp), "forged-token");
}

#[test]
fn paste_merges_into_the_slot() {
    let state = test_state();
    let token = start_session(&state);

    let mut resp = send(
        &state,
        post_form("/slots/subject/paste", Some(&token), &[("text", SUBJECT_SHEET)]),
    );
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("123 Main St"));

    let session = state.sessions.snapshot(&handle_for(&token)).unwrap();
    assert_eq!(session.subject.acres(), Some(5.0));
    assert_eq!(session.subject.price(), Some(250_000.0));
}

#[test]
fn repaste_with_new_price_refreshes_per_unit_figures() {
    let state = test_state();
    let token = start_session(&state);

    send(
        &state,
        post_form(
            "/slots/comp1/paste",
            Some(&token),
            &[("text", "Sale Price: $100,000\nAcres: 2")],
        ),
    );
    send(
        &state,
        post_form("/slots/comp1/paste", Some(&token), &[("text", "Sale Price: $200,000")]),
    );

    let session = state.sessions.snapshot(&handle_for(&token)).unwrap();
    assert_eq!(session.comps[0].price(), Some(200_000.0));
    assert_eq!(session.comps[0].price_per_acre(), Some(100_000.0));
    assert_eq!(session.comps[0].price_per_sqft(), Some(2.3));
}

#[test]
fn failed_paste_shows_message_and_keeps_slot() {
    let config = AppConfig {
        max_input_bytes: 64,
        ..AppConfig::default()
    };
    let state = test_state_with(config);
    let token = start_session(&state);

    send(
        &state,
        post_form("/slots/comp1", Some(&token), &[("acres", "2"), ("price", "40000")]),
    );
    let before = state.sessions.snapshot(&handle_for(&token)).unwrap();

    let long_paste = "Acres: 9\n".repeat(20);
    let mut resp = send(
        &state,
        post_form("/slots/comp1/paste", Some(&token), &[("text", &long_paste)]),
    );
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp)
        .contains("Could not parse the input data. Please check the format and try again."));

    let mut resp = send(
        &state,
        post_form("/slots/comp1/paste", Some(&token), &[("text", "Acres: 9\0")]),
    );
    assert!(body_string(&mut resp).contains("Could not parse the input data."));

    let after = state.sessions.snapshot(&handle_for(&token)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn manual_edit_updates_the_slot() {
    let state = test_state();
    let token = start_session(&state);

    send(
        &state,
        post_form(
            "/slots/active",
            Some(&token),
            &[("acres", "2"), ("price", "$150,000"), ("status", "Active")],
        ),
    );

    let session = state.sessions.snapshot(&handle_for(&token)).unwrap();
    assert_eq!(session.active_listing.price_per_acre(), Some(75_000.0));
    assert_eq!(session.active_listing.status.as_deref(), Some("Active"));
}

#[test]
fn clear_resets_only_that_slot() {
    let state = test_state();
    let token = start_session(&state);

    send(&state, post_form("/slots/comp2", Some(&token), &[("acres", "3")]));
    send(&state, post_form("/slots/subject", Some(&token), &[("acres", "4")]));
    send(&state, post_form("/slots/comp2/clear", Some(&token), &[]));

    let session = state.sessions.snapshot(&handle_for(&token)).unwrap();
    assert!(session.comps[1].is_blank());
    assert_eq!(session.subject.acres(), Some(4.0));
}

#[test]
fn unknown_slot_and_route_are_not_found() {
    let state = test_state();
    let token = start_session(&state);

    let err = handle(post_form("/slots/comp4/paste", Some(&token), &[]), &state).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));

    let err = handle(get("/nowhere", None), &state).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn oversized_body_is_a_bad_request() {
    let config = AppConfig {
        max_input_bytes: 16,
        ..AppConfig::default()
    };
    let state = test_state_with(config);
    let big = "x".repeat(2_000);

    let err = handle(post_form("/slots/subject/paste", None, &[("text", &big)]), &state)
        .unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

fn handle_for(token: &str) -> crate::session::SessionHandle {
    crate::session::SessionHandle {
        token: token.to_string(),
        is_new: false,
    }
}

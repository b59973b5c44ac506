// src/tests/router_tests/calculators_tests.rs

use crate::tests::utils::*;

#[test]
fn offer_page_renders_empty_form() {
    let state = test_state();
    let mut resp = send(&state, get("/offer", None));
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("Land Offer Calculator"));
}

#[test]
fn offer_page_prefills_from_session() {
    let state = test_state();
    let token = start_session(&state);
    send(
        &state,
        post_form(
            "/slots/comp1",
            Some(&token),
            &[("address", "9 Elm Rd"), ("acres", "2"), ("price", "20000")],
        ),
    );

    let mut resp = send(&state, get("/offer", Some(&token)));
    assert!(body_string(&mut resp).contains("9 Elm Rd"));
}

#[test]
fn offer_post_calculates() {
    let state = test_state();
    let mut resp = send(
        &state,
        post_form(
            "/offer",
            None,
            &[
                ("acreage", "10"),
                ("comp1_acreage", "2"),
                ("comp1_sale_price", "20000"),
                ("comp2_acreage", "4"),
                ("comp2_sale_price", "60000"),
                ("location", "10"),
            ],
        ),
    );
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("$125,000"), "{body}");
    assert!(body.contains("$137,500"), "{body}");
}

#[test]
fn offer_without_comparables_says_so() {
    let state = test_state();
    let mut resp = send(&state, post_form("/offer", None, &[("acreage", "10")]));
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("Add at least one comparable"));
}

#[test]
fn amortization_post_lays_out_schedule() {
    let state = test_state();
    let mut resp = send(
        &state,
        post_form(
            "/amortization",
            None,
            &[("principal", "100000"), ("annual_rate", "6"), ("years", "30")],
        ),
    );
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("$599.55"), "{body}");
}

#[test]
fn amortization_rejects_zero_term() {
    let state = test_state();
    let mut resp = send(
        &state,
        post_form("/amortization", None, &[("principal", "1000"), ("years", "0")]),
    );
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("loan term"));
}

// src/tests/router_tests/report_tests.rs

use crate::responses::XLSX_CONTENT_TYPE;
use crate::tests::utils::*;

#[test]
fn report_downloads_as_xlsx() {
    let state = test_state();
    let token = start_session(&state);
    send(
        &state,
        post_form("/slots/subject", Some(&token), &[("acres", "5"), ("price", "250000")]),
    );

    let resp = send(&state, get("/report.xlsx", Some(&token)));
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        XLSX_CONTENT_TYPE
    );
    let disposition = resp.headers().get("Content-Disposition").unwrap();
    assert!(disposition.to_str().unwrap().contains("land_valuation.xlsx"));
}

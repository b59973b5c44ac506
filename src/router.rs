// src/router.rs
use crate::calculators::{amortize, calculate_offer, LoanTerms, OfferComparable, OfferInput};
use crate::config::AppConfig;
use crate::domain::{Session, SlotId};
use crate::errors::{ResultResp, ServerError};
use crate::extractor::{ExtractError, ListingExtractor};
use crate::forms::{apply_slot_edits, loan_terms, offer_input, Form};
use crate::responses::html_response_with_cookie;
use crate::session::{SessionHandle, SessionStore, SESSION_COOKIE};
use crate::spreadsheets::export_report_xlsx;
use crate::templates::pages::{
    amortization_page, calculator_page, offer_page, AmortizationVm, CalculatorVm, OfferVm,
    SlotNotice, OFFER_COMPARABLE_ROWS, PARSE_FAILURE_MESSAGE,
};
use crate::valuation::evaluate_session;
use astra::Request;
use std::io::Read;
use tracing::{info, warn};

/// Shared by every worker thread.
pub struct AppState {
    pub extractor: ListingExtractor,
    pub sessions: SessionStore,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, ExtractError> {
        let extractor = ListingExtractor::new()?.with_max_input_bytes(config.max_input_bytes);
        Ok(Self {
            extractor,
            sessions: SessionStore::new(),
            config,
        })
    }

    /// Form bodies are url-encoded, so a paste right at the extractor's
    /// limit can take up to three bytes per input byte.
    fn max_body_bytes(&self) -> usize {
        self.config.max_input_bytes.saturating_mul(3).saturating_add(1024)
    }
}

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    info!(%method, %path, "request");

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => {
            let handle = begin_session(&req, state)?;
            render_calculator(state, &handle, None)
        }
        ("POST", ["slots", key, "paste"]) => {
            let slot = slot_from_key(key)?;
            let handle = begin_session(&req, state)?;
            let form = read_form(&mut req, state.max_body_bytes())?;
            paste_into_slot(state, &handle, slot, form.get("text").unwrap_or_default())
        }
        ("POST", ["slots", key]) => {
            let slot = slot_from_key(key)?;
            let handle = begin_session(&req, state)?;
            let form = read_form(&mut req, state.max_body_bytes())?;
            state
                .sessions
                .with_session(&handle, |s| apply_slot_edits(s.slot_mut(slot), &form))?;
            render_calculator(state, &handle, None)
        }
        ("POST", ["slots", key, "clear"]) => {
            let slot = slot_from_key(key)?;
            let handle = begin_session(&req, state)?;
            state.sessions.with_session(&handle, |s| s.clear(slot))?;
            info!(slot = slot.key(), "slot cleared");
            render_calculator(state, &handle, None)
        }
        ("GET", ["report.xlsx"]) => {
            let handle = begin_session(&req, state)?;
            let session = state.sessions.snapshot(&handle)?;
            export_report_xlsx(&session)
        }
        ("GET", ["offer"]) => {
            let handle = begin_session(&req, state)?;
            let session = state.sessions.snapshot(&handle)?;
            let vm = OfferVm {
                input: offer_prefill(&session),
                result: None,
            };
            html_response_with_cookie(offer_page(&vm), new_cookie(&handle).as_deref())
        }
        ("POST", ["offer"]) => {
            let form = read_form(&mut req, state.max_body_bytes())?;
            let input = offer_input(&form, OFFER_COMPARABLE_ROWS);
            let result = calculate_offer(&input);
            if let Err(e) = &result {
                warn!(error = %e, "offer not calculated");
            }
            let vm = OfferVm {
                input,
                result: Some(result),
            };
            html_response_with_cookie(offer_page(&vm), None)
        }
        ("GET", ["amortization"]) => {
            let vm = AmortizationVm {
                terms: LoanTerms::default(),
                result: None,
            };
            html_response_with_cookie(amortization_page(&vm), None)
        }
        ("POST", ["amortization"]) => {
            let form = read_form(&mut req, state.max_body_bytes())?;
            let terms = loan_terms(&form);
            let result = amortize(&terms);
            if let Err(e) = &result {
                warn!(error = %e, "schedule not calculated");
            }
            let vm = AmortizationVm {
                terms,
                result: Some(result),
            };
            html_response_with_cookie(amortization_page(&vm), None)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn slot_from_key(key: &str) -> Result<SlotId, ServerError> {
    SlotId::from_key(key).ok_or(ServerError::NotFound)
}

fn begin_session(req: &Request, state: &AppState) -> Result<SessionHandle, ServerError> {
    state.sessions.begin(cookie_value(req, SESSION_COOKIE).as_deref())
}

fn new_cookie(handle: &SessionHandle) -> Option<String> {
    handle.is_new.then(|| handle.set_cookie())
}

/// Value of one cookie from the `Cookie` request header.
fn cookie_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}

fn read_form(req: &mut Request, limit: usize) -> Result<Form, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read request body: {e}")))?;

    if buf.len() > limit {
        return Err(ServerError::BadRequest(format!(
            "request body exceeds {limit} bytes"
        )));
    }
    Ok(Form::parse(&buf))
}

fn paste_into_slot(
    state: &AppState,
    handle: &SessionHandle,
    slot: SlotId,
    text: &str,
) -> ResultResp {
    let outcome = state.extractor.extract(text, slot.role());
    let applied = state
        .sessions
        .with_session(handle, |s| s.apply_parse(slot, outcome))?;

    let notice = match applied {
        Ok(()) => {
            info!(slot = slot.key(), "listing text merged");
            None
        }
        Err(e) => {
            warn!(slot = slot.key(), error = %e, "listing text rejected");
            Some(SlotNotice {
                slot,
                message: PARSE_FAILURE_MESSAGE.to_string(),
            })
        }
    };
    render_calculator(state, handle, notice)
}

fn render_calculator(
    state: &AppState,
    handle: &SessionHandle,
    notice: Option<SlotNotice>,
) -> ResultResp {
    let session = state.sessions.snapshot(handle)?;
    let vm = CalculatorVm {
        result: evaluate_session(&session),
        session,
        notice,
    };
    html_response_with_cookie(calculator_page(&vm), new_cookie(handle).as_deref())
}

/// Seed the offer form from the session: the subject's acreage and every
/// comparable with both acreage and a sale price.
fn offer_prefill(session: &Session) -> OfferInput {
    let comparables = session
        .comps
        .iter()
        .filter_map(|c| {
            Some(OfferComparable {
                address: c.address.clone().unwrap_or_default(),
                acreage: c.acres()?,
                sale_price: c.price()?,
            })
        })
        .collect();

    OfferInput {
        acreage: session.subject.acres().unwrap_or_default(),
        comparables,
        adjustments: Default::default(),
    }
}

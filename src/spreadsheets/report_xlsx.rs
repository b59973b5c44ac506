// src/spreadsheets/report_xlsx.rs
use crate::domain::Session;
use crate::errors::{ResultResp, ServerError};
use crate::responses::xlsx_response;
use crate::valuation::{evaluate_session, AskingComparison, Average, ValuationResult};
use rust_xlsxwriter::{Workbook, Worksheet};

pub const REPORT_FILENAME: &str = "land_valuation.xlsx";

/// Export the session's valuation as a workbook with one sheet per
/// result section. Sections without enough data say so in their first row.
pub fn export_report_xlsx(session: &Session) -> ResultResp {
    let buffer = build_report(session)?;
    xlsx_response(buffer, REPORT_FILENAME)
}

pub fn build_report(session: &Session) -> Result<Vec<u8>, ServerError> {
    let result = evaluate_session(session);
    let mut workbook = Workbook::new();

    write_subject_sheet(add_sheet(&mut workbook, "Subject")?, session, &result)?;
    write_comparables_sheet(add_sheet(&mut workbook, "Comparables")?, &result)?;
    write_market_sheet(add_sheet(&mut workbook, "Market")?, &result)?;
    write_active_sheet(add_sheet(&mut workbook, "Active Listing")?, &result)?;

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

fn add_sheet<'a>(workbook: &'a mut Workbook, name: &str) -> Result<&'a mut Worksheet, ServerError> {
    workbook
        .add_worksheet()
        .set_name(name)
        .map_err(|e| ServerError::XlsxError(format!("Failed to name sheet '{}': {}", name, e)))
}

fn put_str(ws: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<(), ServerError> {
    ws.write_string(row, col, value)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write '{}': {}", value, e)))?;
    Ok(())
}

fn put_num(ws: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<(), ServerError> {
    ws.write_number(row, col, value)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write number: {}", e)))?;
    Ok(())
}

/// Blank cell when the value is missing.
fn put_opt(ws: &mut Worksheet, row: u32, col: u16, value: Option<f64>) -> Result<(), ServerError> {
    match value {
        Some(v) => put_num(ws, row, col, v),
        None => Ok(()),
    }
}

fn put_pair(ws: &mut Worksheet, row: u32, label: &str, value: f64) -> Result<(), ServerError> {
    put_str(ws, row, 0, label)?;
    put_num(ws, row, 1, value)
}

fn write_subject_sheet(
    ws: &mut Worksheet,
    session: &Session,
    result: &ValuationResult,
) -> Result<(), ServerError> {
    put_str(ws, 0, 0, "Address")?;
    put_str(ws, 0, 1, session.subject.address.as_deref().unwrap_or(""))?;

    let v = match &result.subject {
        Ok(v) => v,
        Err(e) => return put_str(ws, 1, 0, &format!("Not enough data: {e}")),
    };

    put_pair(ws, 1, "Total Acres", v.total_acres)?;
    put_pair(ws, 2, "Asking Price", v.base_value)?;
    put_pair(ws, 3, "Flood Multiplier", v.flood_multiplier)?;
    put_pair(ws, 4, "Flood Adjusted Value", v.adjusted_value)?;

    let mut row = 5;
    for line in &v.site_prep {
        put_pair(ws, row, line.label, line.cost)?;
        row += 1;
    }

    put_pair(ws, row, "Site Prep Total", v.site_prep_cost)?;
    put_pair(ws, row + 1, "Final Value", v.final_value)?;
    put_pair(ws, row + 2, "Value per Acre", v.value_per_acre)?;
    put_pair(ws, row + 3, "Total Impact", v.total_impact)?;
    put_pair(ws, row + 4, "Impact %", v.impact_percentage)
}

fn write_comparables_sheet(ws: &mut Worksheet, result: &ValuationResult) -> Result<(), ServerError> {
    let summary = match &result.comparables {
        Ok(s) => s,
        Err(e) => return put_str(ws, 0, 0, &format!("Not enough data: {e}")),
    };

    let headers = [
        "Address",
        "Sale Price",
        "Square Feet",
        "Price / Sq Ft",
        "Acres",
        "Price / Acre",
        "Days on Market",
        "Close Date",
    ];
    for (col, header) in headers.iter().enumerate() {
        put_str(ws, 0, col as u16, header)?;
    }

    for (i, comp) in summary.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        put_str(ws, r, 0, comp.address.as_deref().unwrap_or(""))?;
        put_opt(ws, r, 1, comp.price)?;
        put_opt(ws, r, 2, comp.square_feet)?;
        put_opt(ws, r, 3, comp.price_per_sqft)?;
        put_opt(ws, r, 4, comp.acres)?;
        put_opt(ws, r, 5, comp.price_per_acre)?;
        put_opt(ws, r, 6, comp.days_on_market.map(f64::from))?;
        if let Some(date) = comp.close_date {
            put_str(ws, r, 7, &date.format("%Y-%m-%d").to_string())?;
        }
    }

    let r = (summary.rows.len() + 1) as u32;
    let a = &summary.averages;
    put_str(ws, r, 0, "Average")?;
    for (col, avg) in [
        (1, a.price),
        (2, a.square_feet),
        (3, a.price_per_sqft),
        (4, a.acres),
        (5, a.price_per_acre),
        (6, a.days_on_market),
    ] {
        match avg {
            Average::Value(v) => put_num(ws, r, col, v)?,
            Average::InsufficientData => put_str(ws, r, col, "Not enough data")?,
        }
    }
    Ok(())
}

fn write_market_sheet(ws: &mut Worksheet, result: &ValuationResult) -> Result<(), ServerError> {
    let m = match &result.market {
        Ok(m) => m,
        Err(e) => return put_str(ws, 0, 0, &format!("Not enough data: {e}")),
    };

    put_pair(ws, 0, "Average Price / Sq Ft", m.avg_price_per_sqft)?;
    put_pair(ws, 1, "Subject Square Feet", m.subject_square_feet)?;
    put_pair(ws, 2, "Estimated Value", m.estimated_value)?;
    match m.asking_comparison {
        Some(AskingComparison::Above(p)) => put_pair(ws, 3, "% Above Asking", p)?,
        Some(AskingComparison::Below(p)) => put_pair(ws, 3, "% Below Asking", p)?,
        None => put_str(ws, 3, 0, "No asking price")?,
    }

    for (col, header) in ["Percentage", "Value", "Per Sq Ft", "Per Acre"].iter().enumerate() {
        put_str(ws, 5, col as u16, header)?;
    }
    for (i, row) in m.breakdown.iter().enumerate() {
        let r = (i + 6) as u32;
        put_num(ws, r, 0, f64::from(row.percentage))?;
        put_num(ws, r, 1, row.value)?;
        put_num(ws, r, 2, row.per_sqft)?;
        put_opt(ws, r, 3, row.per_acre)?;
    }
    Ok(())
}

fn write_active_sheet(ws: &mut Worksheet, result: &ValuationResult) -> Result<(), ServerError> {
    let a = match &result.active_listing {
        Ok(a) => a,
        Err(e) => return put_str(ws, 0, 0, &format!("Not enough data: {e}")),
    };

    put_pair(ws, 0, "List Price", a.list_price)?;
    put_pair(ws, 1, "Acres", a.acres)?;
    put_pair(ws, 2, "Price / Acre", a.price_per_acre)?;
    put_str(ws, 3, 0, "Price / Sq Ft")?;
    put_opt(ws, 3, 1, a.price_per_sqft)?;
    put_str(ws, 4, 0, "Days on Market")?;
    put_opt(ws, 4, 1, a.days_on_market.map(f64::from))?;
    put_str(ws, 5, 0, "Status")?;
    put_str(ws, 5, 1, a.status.as_deref().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session_still_produces_a_workbook() {
        let buffer = build_report(&Session::default()).unwrap();
        // xlsx files are zip archives
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn full_session_report() {
        let mut session = Session::default();
        session.subject.address = Some("12 Oak Ln".into());
        session.subject.set_acres(Some(2.0));
        session.subject.set_price(Some(100_000.0));
        session.comps[0].set_acres(Some(1.0));
        session.comps[0].set_price(Some(87_120.0));

        let buffer = build_report(&session).unwrap();
        assert!(buffer.len() > 1_000);
    }
}

// src/extractor/address.rs

use regex::Regex;

/// How many non-empty lines at the top of a paste are searched for the
/// property address. Agent and office blocks usually follow.
pub const ADDRESS_SCAN_LINES: usize = 20;

const STREET_SUFFIXES: &str = "Street|St|Avenue|Ave|Road|Rd|Lane|Ln|Drive|Dr|Way|Court|Ct|Circle|Cir|Boulevard|Blvd|Highway|Hwy";

/// Words that make "County" part of a street name ("County Road 12").
const COUNTY_ROAD_WORDS: &[&str] = &["road", "rd", "line", "highway", "hwy", "route", "rte"];

#[derive(Debug)]
pub struct AddressPatterns {
    /// "123 Main St, Austin, TX, 78701"
    structured: Regex,
    /// "Address: ...", "Property Address: ...", "Located at ..."
    labeled: Regex,
    /// "123 Main St ..." with a known street suffix.
    street: Regex,
}

impl AddressPatterns {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            structured: Regex::new(r"^\d+\s+[^,]+,\s*[^,]+,\s*[^,]+,\s*\d{5}(?:-\d{4})?")?,
            labeled: Regex::new(r"(?i)(?:property address:?|address:|located at)\s*(.+)")?,
            street: Regex::new(&format!(r"(?i)^\d+\s+[^,]+(?:{STREET_SUFFIXES})\b"))?,
        })
    }

    /// Find the subject address among the first lines of a paste.
    ///
    /// Structured and labeled addresses are tried per line, first line
    /// wins. Only when neither appears is a bare street line accepted.
    pub fn find(&self, lines: &[&str]) -> Option<String> {
        let head: Vec<&str> = lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .take(ADDRESS_SCAN_LINES)
            .collect();

        for line in &head {
            if is_agent_or_office(line) {
                continue;
            }
            if let Some(m) = self.structured.find(line) {
                return Some(m.as_str().trim().to_string());
            }
            if let Some(caps) = self.labeled.captures(line) {
                let value = caps.get(1).map(|v| v.as_str().trim()).unwrap_or_default();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }

        head.iter()
            .find(|line| self.street.is_match(line))
            .map(|line| strip_county_suffix(line))
    }
}

fn is_agent_or_office(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("agent") || lower.contains("office")
}

/// Drop a trailing " County ..." tail, leaving "County Road" style street
/// names alone.
pub fn strip_county_suffix(line: &str) -> String {
    let mut search_from = 0;
    while let Some(pos) = line[search_from..].find(" County") {
        let start = search_from + pos;
        let after = line[start + " County".len()..].trim_start().to_lowercase();
        let next_word = after
            .split(|c: char| !c.is_alphanumeric())
            .next()
            .unwrap_or_default();
        if !COUNTY_ROAD_WORDS.contains(&next_word) {
            return line[..start].trim().to_string();
        }
        search_from = start + " County".len();
    }
    line.trim().to_string()
}

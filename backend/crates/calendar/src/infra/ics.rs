//! ICS Parser
//!
//! Line-oriented, best-effort extraction of VEVENTs from an iCalendar
//! (RFC 5545) text. Only the fields the frontend renders are pulled out;
//! anything unrecognized is skipped rather than rejected. TZID parameters
//! are ignored and times are treated as UTC - good enough for a crew
//! schedule feed, not a general iCalendar implementation.

use crate::domain::event::CalendarEvent;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashMap;

/// Parse an ICS document into events, sorted by start time.
///
/// Events without a parseable DTSTART are dropped; every other missing
/// field degrades to a default.
pub fn parse_events(ics: &str) -> Vec<CalendarEvent> {
    let lines = unfold_lines(ics);

    let mut events = Vec::new();
    let mut current: Option<HashMap<String, Property>> = None;

    for line in lines {
        match line.as_str() {
            "BEGIN:VEVENT" => {
                current = Some(HashMap::new());
            }
            "END:VEVENT" => {
                if let Some(props) = current.take() {
                    if let Some(event) = build_event(&props, events.len()) {
                        events.push(event);
                    }
                }
            }
            _ => {
                if let (Some(props), Some(property)) = (current.as_mut(), parse_property(&line)) {
                    // First occurrence wins for duplicated properties
                    props.entry(property.name.clone()).or_insert(property);
                }
            }
        }
    }

    events.sort_by_key(|event| event.start);
    events
}

/// One content line, split into name, parameters and raw value
#[derive(Debug, Clone)]
struct Property {
    name: String,
    params: Vec<String>,
    value: String,
}

/// Undo RFC 5545 line folding (continuation lines start with a space or tab).
fn unfold_lines(ics: &str) -> Vec<String> {
    let mut unfolded: Vec<String> = Vec::new();
    for raw in ics.split(['\r', '\n']).filter(|l| !l.is_empty()) {
        if let Some(continuation) = raw.strip_prefix([' ', '\t']) {
            if let Some(last) = unfolded.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        unfolded.push(raw.to_string());
    }
    unfolded
}

fn parse_property(line: &str) -> Option<Property> {
    let (head, value) = line.split_once(':')?;
    let mut parts = head.split(';');
    let name = parts.next()?.trim().to_ascii_uppercase();
    if name.is_empty() {
        return None;
    }
    let params = parts.map(|p| p.trim().to_ascii_uppercase()).collect();
    Some(Property {
        name,
        params,
        value: value.to_string(),
    })
}

/// Unescape RFC 5545 TEXT values (`\n`, `\,`, `\;`, `\\`).
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(escaped) => out.push(escaped),
            None => out.push('\\'),
        }
    }
    out
}

/// Parse a DTSTART/DTEND value. Returns the timestamp and whether it was
/// a date-only (all-day) value.
fn parse_datetime(property: &Property) -> Option<(DateTime<Utc>, bool)> {
    let value = property.value.trim();
    let date_only = property.params.iter().any(|p| p == "VALUE=DATE")
        || (value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()));

    if date_only {
        let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some((midnight.and_utc(), true));
    }

    let bare = value.trim_end_matches('Z');
    let naive = NaiveDateTime::parse_from_str(bare, "%Y%m%dT%H%M%S").ok()?;
    Some((naive.and_utc(), false))
}

fn text_field(props: &HashMap<String, Property>, name: &str) -> Option<String> {
    let value = unescape_text(props.get(name)?.value.trim());
    if value.is_empty() { None } else { Some(value) }
}

fn build_event(props: &HashMap<String, Property>, index: usize) -> Option<CalendarEvent> {
    let (start, all_day) = parse_datetime(props.get("DTSTART")?)?;
    let end = props
        .get("DTEND")
        .and_then(parse_datetime)
        .map(|(end, _)| end);

    let id = text_field(props, "UID").unwrap_or_else(|| format!("event-{}", index));
    let title = text_field(props, "SUMMARY").unwrap_or_else(|| "Untitled".to_string());

    let categories = props
        .get("CATEGORIES")
        .map(|property| {
            property
                .value
                .split(',')
                .map(|category| unescape_text(category.trim()))
                .filter(|category| !category.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Some(CalendarEvent {
        id,
        title,
        start,
        end,
        all_day,
        location: text_field(props, "LOCATION"),
        notes: text_field(props, "DESCRIPTION"),
        categories,
    })
}

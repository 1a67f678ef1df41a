//! API DTOs (Data Transfer Objects)

use crate::application::fetch_events::EventsPayload;
use crate::domain::event::CalendarEvent;
use serde::Serialize;

/// Response for GET /calendar/events
#[derive(Debug, Clone, Serialize)]
pub struct EventsResponse {
    pub source: String,
    pub count: usize,
    pub events: Vec<CalendarEvent>,
}

impl From<EventsPayload> for EventsResponse {
    fn from(payload: EventsPayload) -> Self {
        Self {
            source: payload.source,
            count: payload.count,
            events: payload.events,
        }
    }
}

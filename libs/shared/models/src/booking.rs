use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::Record;

/// Wall-clock times travel as `HH:MM`; `HH:MM:SS` is accepted on input.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn format(time: &NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{}', expected HH:MM", raw)))
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => serializer.serialize_some(&super::format(t)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid time '{}', expected HH:MM", raw))),
                None => Ok(None),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DurationType {
    #[default]
    Minutes,
    Hours,
}

impl DurationType {
    pub fn to_minutes(&self, amount: u32) -> u32 {
        match self {
            DurationType::Minutes => amount,
            DurationType::Hours => amount.saturating_mul(60),
        }
    }
}

impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationType::Minutes => write!(f, "minutes"),
            DurationType::Hours => write!(f, "hours"),
        }
    }
}

/// A bookable service template published by a department account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub available_dates: Vec<NaiveDate>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub duration_per_person: u32,
    pub duration_type: DurationType,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub slots: Vec<BookingSlot>,
}

impl Booking {
    pub fn slot(&self, slot_id: &str) -> Option<&BookingSlot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }

    pub fn slot_mut(&mut self, slot_id: &str) -> Option<&mut BookingSlot> {
        self.slots.iter_mut().find(|s| s.id == slot_id)
    }

    pub fn booked_slot_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_booked).count()
    }

    pub fn available_slot_count(&self) -> usize {
        self.slots.len() - self.booked_slot_count()
    }

    pub fn has_available_slots(&self) -> bool {
        self.slots.iter().any(|s| !s.is_booked)
    }
}

impl Record for Booking {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingSlot {
    pub id: String,
    pub booking_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_booked: bool,
    pub booked_by: Option<String>,
    pub token_number: Option<String>,
}

impl BookingSlot {
    pub fn same_interval(&self, other: &BookingSlot) -> bool {
        self.date == other.date && self.start_time == other.start_time && self.end_time == other.end_time
    }

    pub fn release(&mut self) {
        self.is_booked = false;
        self.booked_by = None;
        self.token_number = None;
    }
}

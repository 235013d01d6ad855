use super::{
    default_page, default_page_size, nullable_trimmed, trim_opt, trimmed, trimmed_opt,
    validate_date, validate_time,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, IntoParams, ToSchema, Clone)]
#[into_params(parameter_in = Query)]
pub struct FindAllSchedules {
    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    pub page: i32,

    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

impl Default for FindAllSchedules {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct CreateScheduleRequest {
    #[validate(length(min = 1, max = 200))]
    #[serde(deserialize_with = "trimmed")]
    pub title: String,

    #[validate(custom(function = "validate_date"))]
    #[serde(deserialize_with = "trimmed")]
    #[schema(example = "2025-12-24")]
    pub date: String,

    #[validate(custom(function = "validate_time"))]
    #[serde(deserialize_with = "trimmed")]
    #[schema(example = "18:30")]
    pub time: String,

    #[serde(default, deserialize_with = "trimmed_opt")]
    pub description: Option<String>,

    #[validate(range(min = 1))]
    pub attendees: i32,

    #[validate(length(min = 1, max = 300))]
    #[serde(deserialize_with = "trimmed")]
    pub location: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct UpdateScheduleRequest {
    #[validate(length(min = 1, max = 200))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub title: Option<String>,

    #[validate(custom(function = "validate_date"))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub date: Option<String>,

    #[validate(custom(function = "validate_time"))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub time: Option<String>,

    /// Omit to keep the current description, send `null` to clear it.
    #[serde(
        default,
        deserialize_with = "nullable_trimmed",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[validate(range(min = 1))]
    pub attendees: Option<i32>,

    #[validate(length(min = 1, max = 300))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub location: Option<String>,
}

/// A blank description is stored as no description.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl CreateScheduleRequest {
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            description: non_blank(self.description.as_deref()),
            attendees: self.attendees,
            location: self.location.trim().to_string(),
        }
    }
}

impl UpdateScheduleRequest {
    pub fn normalized(&self) -> Self {
        Self {
            title: trim_opt(&self.title),
            date: trim_opt(&self.date),
            time: trim_opt(&self.time),
            description: self
                .description
                .as_ref()
                .map(|description| non_blank(description.as_deref())),
            attendees: self.attendees,
            location: trim_opt(&self.location),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateScheduleRecordRequest {
    pub user_id: i32,
    pub title: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub description: Option<String>,
    pub attendees: i32,
    pub location: String,
}

#[derive(Debug, Clone)]
pub struct UpdateScheduleRecordRequest {
    pub schedule_id: i32,
    pub user_id: i32,
    pub title: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub description: Option<String>,
    pub attendees: i32,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateScheduleRequest {
        CreateScheduleRequest {
            title: "Office lunch".into(),
            date: "2025-12-24".into(),
            time: "12:30".into(),
            description: None,
            attendees: 20,
            location: "HQ".into(),
        }
    }

    #[test]
    fn accepts_minute_and_second_precision_times() {
        assert!(create().validate().is_ok());
        let req = CreateScheduleRequest {
            time: "12:30:15".into(),
            ..create()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_date_and_time() {
        let req = CreateScheduleRequest {
            date: "24/12/2025".into(),
            time: "noon".into(),
            ..create()
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("date"));
        assert!(fields.contains_key("time"));
    }

    #[test]
    fn rejects_zero_attendees() {
        let req = CreateScheduleRequest {
            attendees: 0,
            ..create()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn whitespace_title_and_location_are_rejected() {
        let req = CreateScheduleRequest {
            title: "   ".into(),
            location: "\t ".into(),
            ..create()
        }
        .normalized();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("location"));
    }

    #[test]
    fn update_tells_missing_description_from_null() {
        let keep: UpdateScheduleRequest =
            serde_json::from_value(serde_json::json!({ "attendees": 5 })).unwrap();
        assert_eq!(keep.description, None);

        let clear: UpdateScheduleRequest =
            serde_json::from_value(serde_json::json!({ "description": null })).unwrap();
        assert_eq!(clear.description, Some(None));

        let blank: UpdateScheduleRequest =
            serde_json::from_value(serde_json::json!({ "description": "  " })).unwrap();
        assert_eq!(blank.normalized().description, Some(None));

        let set: UpdateScheduleRequest =
            serde_json::from_value(serde_json::json!({ "description": " vegan menu " })).unwrap();
        assert_eq!(set.description, Some(Some("vegan menu".to_string())));
    }

    #[test]
    fn page_size_is_capped() {
        let query = FindAllSchedules {
            page: 1,
            page_size: 101,
        };
        assert!(query.validate().is_err());
        assert!(FindAllSchedules::default().validate().is_ok());
    }
}

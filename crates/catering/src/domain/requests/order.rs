use super::{default_page, default_page_size, trimmed, trimmed_opt, validate_date, validate_time};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Validate, IntoParams, ToSchema, Clone)]
#[into_params(parameter_in = Query)]
pub struct FindAllOrders {
    /// `active` or `cancelled`
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,

    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    pub page: i32,

    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

impl Default for FindAllOrders {
    fn default() -> Self {
        Self {
            status: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    match value {
        "active" | "cancelled" => Ok(()),
        _ => Err(ValidationError::new("status")
            .with_message("must be 'active' or 'cancelled'".into())),
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct CreateOrderItemRequest {
    #[validate(length(min = 1, max = 200))]
    #[serde(deserialize_with = "trimmed")]
    pub name: String,

    #[validate(range(min = 1))]
    pub quantity: i32,

    /// Unit price in minor currency units.
    #[validate(range(min = 0))]
    pub price: i64,

    #[validate(length(min = 1, max = 100))]
    #[serde(deserialize_with = "trimmed")]
    pub category: String,

    #[serde(default)]
    pub dietary_tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "An order needs at least one item"), nested)]
    pub items: Vec<CreateOrderItemRequest>,

    #[validate(custom(function = "validate_date"))]
    #[serde(deserialize_with = "trimmed")]
    #[schema(example = "2025-12-24")]
    pub delivery_date: String,

    #[validate(custom(function = "validate_time"))]
    #[serde(deserialize_with = "trimmed")]
    #[schema(example = "11:00")]
    pub delivery_time: String,

    #[validate(length(min = 1, max = 500))]
    #[serde(deserialize_with = "trimmed")]
    pub delivery_address: String,

    #[serde(default, deserialize_with = "trimmed_opt")]
    pub special_instructions: Option<String>,
}

impl CreateOrderItemRequest {
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            quantity: self.quantity,
            price: self.price,
            category: self.category.trim().to_string(),
            dietary_tags: self
                .dietary_tags
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl CreateOrderRequest {
    pub fn normalized(&self) -> Self {
        Self {
            items: self.items.iter().map(CreateOrderItemRequest::normalized).collect(),
            delivery_date: self.delivery_date.trim().to_string(),
            delivery_time: self.delivery_time.trim().to_string(),
            delivery_address: self.delivery_address.trim().to_string(),
            special_instructions: self
                .special_instructions
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOrderItemRecordRequest {
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub category: String,
    pub dietary_tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderRecordRequest {
    pub user_id: i32,
    pub order_number: String,
    pub delivery_date: NaiveDate,
    pub delivery_time: NaiveTime,
    pub delivery_address: String,
    pub special_instructions: Option<String>,
    pub total_price: i64,
    pub items: Vec<CreateOrderItemRecordRequest>,
}

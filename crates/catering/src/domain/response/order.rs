use crate::model::order::{Order as OrderModel, OrderItem as OrderItemModel};
use serde::{Deserialize, Serialize};
use shared::utils::format_timestamp;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct OrderItemResponse {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub category: String,
    pub dietary_tags: Vec<String>,
}

impl From<OrderItemModel> for OrderItemResponse {
    fn from(value: OrderItemModel) -> Self {
        OrderItemResponse {
            id: value.order_item_id,
            name: value.name,
            quantity: value.quantity,
            price: value.price,
            category: value.category,
            dietary_tags: value.dietary_tags,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub order_number: String,
    pub status: String,
    pub delivery_date: String,
    pub delivery_time: String,
    pub delivery_address: String,
    pub special_instructions: Option<String>,
    pub total_price: i64,
    pub items: Vec<OrderItemResponse>,
    pub cancelled_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl OrderResponse {
    /// Builds the response from an order row and its item rows; items of other orders are ignored.
    pub fn from_parts(order: OrderModel, items: Vec<OrderItemModel>) -> Self {
        let order_id = order.order_id;

        OrderResponse {
            id: order.order_id,
            user_id: order.user_id,
            order_number: order.order_number,
            status: order.status,
            delivery_date: order.delivery_date.format("%Y-%m-%d").to_string(),
            delivery_time: order.delivery_time.format("%H:%M").to_string(),
            delivery_address: order.delivery_address,
            special_instructions: order.special_instructions,
            total_price: order.total_price,
            items: items
                .into_iter()
                .filter(|item| item.order_id == order_id)
                .map(OrderItemResponse::from)
                .collect(),
            cancelled_at: format_timestamp(order.cancelled_at),
            created_at: format_timestamp(order.created_at),
            updated_at: format_timestamp(order.updated_at),
        }
    }

    /// Pairs every order with its items out of one batch lookup.
    pub fn group(orders: Vec<OrderModel>, items: Vec<OrderItemModel>) -> Vec<Self> {
        orders
            .into_iter()
            .map(|order| {
                let own: Vec<OrderItemModel> = items
                    .iter()
                    .filter(|item| item.order_id == order.order_id)
                    .cloned()
                    .collect();
                OrderResponse::from_parts(order, own)
            })
            .collect()
    }
}

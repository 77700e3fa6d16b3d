use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;

pub type Id = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    Requested,
    Approved,
    Dispatched,
    InTransit,
    Delivered,
    Cancelled,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Parcel as returned by the backend gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: Id,
    pub tracking_id: String,
    pub sender_id: Id,
    pub receiver_id: Id,
    pub status: ParcelStatus,
    pub parcel_type: String,
    pub weight_kg: f64,
    pub fee: f64,
    pub pickup_address: String,
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
}

/// Pagination metadata the gateway attaches to every list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_page: u32,
}

impl PageMeta {
    pub fn new(page: u32, limit: u32, total: usize) -> Self {
        let total_page = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as usize) as u32
        };
        Self {
            page,
            limit,
            total,
            total_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Per-status counts shown on the analytics views
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParcelStats {
    pub total: usize,
    pub by_status: std::collections::BTreeMap<String, usize>,
    pub total_fee: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_meta_rounds_up() {
        assert_eq!(PageMeta::new(1, 10, 0).total_page, 0);
        assert_eq!(PageMeta::new(1, 10, 10).total_page, 1);
        assert_eq!(PageMeta::new(1, 10, 11).total_page, 2);
    }

    #[test]
    fn test_page_meta_camel_case() {
        let json = serde_json::to_value(PageMeta::new(2, 5, 12)).unwrap();
        assert_eq!(json["totalPage"], serde_json::json!(3));
    }

    #[test]
    fn test_status_snake_case() {
        assert_eq!(
            serde_json::to_value(ParcelStatus::InTransit).unwrap(),
            serde_json::json!("in_transit")
        );
    }
}

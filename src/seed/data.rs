use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::model::{Parcel, ParcelStatus, Role, User, UserStatus};

/// Fixed reference time so seeded timestamps are stable across runs
fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn create_user(id: &str, name: &str, role: Role, status: UserStatus, day: i64) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@courier.test", name.to_lowercase().replace(' ', ".")),
        role,
        status,
        verified: status == UserStatus::Active,
        created_at: epoch() + Duration::days(day),
    }
}

#[allow(clippy::too_many_arguments)]
fn create_parcel(
    n: u32,
    sender_id: &str,
    receiver_id: &str,
    status: ParcelStatus,
    parcel_type: &str,
    weight_kg: f64,
    fee: f64,
    route: (&str, &str),
) -> Parcel {
    Parcel {
        id: format!("p-{}", n),
        tracking_id: format!("TRK-2024{:04}", n),
        sender_id: sender_id.to_string(),
        receiver_id: receiver_id.to_string(),
        status,
        parcel_type: parcel_type.to_string(),
        weight_kg,
        fee,
        pickup_address: route.0.to_string(),
        delivery_address: route.1.to_string(),
        created_at: epoch() + Duration::hours(i64::from(n) * 7),
    }
}

pub fn seed_users() -> Vec<User> {
    vec![
        create_user("u-admin-1", "Ada Admin", Role::Admin, UserStatus::Active, 0),
        create_user("u-sender-1", "Bob Sender", Role::Sender, UserStatus::Active, 1),
        create_user("u-sender-2", "Bobby Tables", Role::Sender, UserStatus::Blocked, 2),
        create_user("u-sender-3", "Cora Shipper", Role::Sender, UserStatus::Active, 3),
        create_user("u-receiver-1", "Rita Receiver", Role::Receiver, UserStatus::Active, 4),
        create_user("u-receiver-2", "Rob Porter", Role::Receiver, UserStatus::Inactive, 5),
        create_user("u-receiver-3", "Rosa Dock", Role::Receiver, UserStatus::Active, 6),
    ]
}

pub fn seed_parcels() -> Vec<Parcel> {
    use ParcelStatus::*;

    let dhaka = ("12 Lake Road, Dhaka", "4 Hill Street, Chattogram");
    let sylhet = ("9 Tea Garden Lane, Sylhet", "31 River View, Khulna");
    let rajshahi = ("7 Mango Avenue, Rajshahi", "22 Port Road, Chattogram");

    vec![
        create_parcel(1, "u-sender-1", "u-receiver-1", Delivered, "document", 0.4, 60.0, dhaka),
        create_parcel(2, "u-sender-1", "u-receiver-1", InTransit, "box", 3.2, 150.0, dhaka),
        create_parcel(3, "u-sender-1", "u-receiver-2", Requested, "fragile", 1.5, 120.0, sylhet),
        create_parcel(4, "u-sender-3", "u-receiver-1", Dispatched, "box", 6.0, 210.0, rajshahi),
        create_parcel(5, "u-sender-3", "u-receiver-3", Delivered, "document", 0.2, 60.0, sylhet),
        create_parcel(6, "u-sender-1", "u-receiver-3", Cancelled, "box", 2.0, 100.0, rajshahi),
        create_parcel(7, "u-sender-2", "u-receiver-1", Blocked, "fragile", 4.4, 180.0, dhaka),
        create_parcel(8, "u-sender-3", "u-receiver-1", Delivered, "box", 8.5, 260.0, sylhet),
        create_parcel(9, "u-sender-1", "u-receiver-1", Approved, "document", 0.3, 60.0, rajshahi),
        create_parcel(10, "u-sender-3", "u-receiver-2", InTransit, "box", 5.1, 190.0, dhaka),
        create_parcel(11, "u-sender-1", "u-receiver-3", Delivered, "fragile", 2.7, 140.0, sylhet),
        create_parcel(12, "u-sender-3", "u-receiver-1", Requested, "box", 1.1, 90.0, dhaka),
    ]
}

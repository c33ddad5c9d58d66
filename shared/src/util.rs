/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Idempotency token for a booking submission: `REQ<millis><0..1000>`
///
/// A fresh token is generated for every submission attempt, so a manual retry
/// after a failure is a distinct request.
pub fn request_id(millis: i64) -> String {
    use rand::Rng;
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("REQ{millis}{suffix}")
}

/// Reference handed to walk-in bookings created at the desk
pub fn walk_in_request_id(millis: i64) -> String {
    format!("WALKIN-{millis}")
}

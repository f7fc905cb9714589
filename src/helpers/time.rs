use chrono::Utc;

pub fn now_epoch() -> i64 {
    Utc::now().timestamp()
}

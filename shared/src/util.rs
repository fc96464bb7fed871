/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate the public identifier for a new document.
///
/// The value doubles as the storage record key, so it never changes after
/// creation. Simple (hyphen-less) UUID v4 form.
pub fn new_record_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

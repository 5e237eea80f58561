use serde::Serialize;

/// Successful outcome of a request submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestReceipt {
    /// The allocated request id.
    pub request_id: i64,
    /// When the record becomes eligible for store-side deletion.
    pub expires_at: i64,
    /// Whether the lifecycle notification went out. `false` does not
    /// make the submission any less successful.
    pub notified: bool,
}

impl RequestReceipt {
    /// Machine-readable success code.
    pub const CODE: &'static str = "BLISS_SENT";
}

/// Successful outcome of a response submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseReceipt {
    /// The allocated response id.
    pub response_id: i64,
    /// The request this response claims to answer. Not verified against
    /// the metadata store.
    pub request_id: i64,
    /// When the record becomes eligible for store-side deletion.
    pub expires_at: i64,
    /// Whether the lifecycle notification went out.
    pub notified: bool,
}

impl ResponseReceipt {
    /// Machine-readable success code.
    pub const CODE: &'static str = "BLISS_RESPONSE_SENT";
}

/// Successful outcome of a cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelReceipt {
    /// The canceled request id.
    pub request_id: i64,
    /// Whether the request video blob was deleted too (policy-driven).
    pub video_deleted: bool,
    /// Whether the lifecycle notification went out.
    pub notified: bool,
}

impl CancelReceipt {
    /// Machine-readable success code.
    pub const CODE: &'static str = "BLISS_REQ_DELETED";
}

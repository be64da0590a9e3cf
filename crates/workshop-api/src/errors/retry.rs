/// Classification for retry policy.
///
/// Used by the client's retry loop to decide whether a failed request is
/// worth repeating.
///
/// | Class | Retried? |
/// |-------|----------|
/// | `Never` | No, the request is invalid or the item does not exist |
/// | `WithBackoff` | Yes, after a capped exponential delay |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Terminal failure. Retrying won't help.
    Never,

    /// Transient failure (rate limiting, timeout, 5xx).
    WithBackoff,
}

/// Prefix of the per-host bus subject commands are routed to
pub const HOST_ROUTING_PREFIX: &str = "hosts";

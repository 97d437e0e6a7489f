//! Outbound channel for results produced outside a client request.

use crate::protocol::actions::PlayerActionResult;

/// Publishes a result to every subscriber of a session topic.
///
/// Request-driven results go back through the router; this seam exists for
/// the voting deadline, which fires with no client request in flight.
pub trait ActionBroadcaster: Send + Sync {
    fn publish(&self, token: &str, result: &PlayerActionResult);
}

/// Drops everything. Used when no realtime transport is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBroadcaster;

impl ActionBroadcaster for NoopBroadcaster {
    fn publish(&self, _token: &str, _result: &PlayerActionResult) {}
}

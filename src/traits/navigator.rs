//! Client-side navigation.

/// Moves the client to another route.
///
/// The auth gate uses this to send unauthenticated visitors to the sign-in
/// route. Navigation is fire-and-forget: implementations record or perform
/// the move and return immediately.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

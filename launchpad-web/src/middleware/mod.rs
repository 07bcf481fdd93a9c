/// Middleware for the web front end
///
/// - `security`: Security response headers

pub mod security;

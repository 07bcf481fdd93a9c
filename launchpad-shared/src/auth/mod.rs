/// Caller identity resolution
///
/// The front end never authenticates anyone itself. It asks an identity
/// collaborator who the caller is and passes the answer through.
///
/// # Modules
///
/// - [`jwt`]: Session token claims, issuance and validation (HS256)
/// - [`identity`]: The [`identity::IdentityResolver`] seam and its JWT-backed implementation
///
/// # Example
///
/// ```no_run
/// use launchpad_shared::auth::identity::{IdentityResolver, JwtIdentityResolver};
/// use axum::http::HeaderMap;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = JwtIdentityResolver::new("secret-key-at-least-32-bytes-long!!");
/// let user = resolver.resolve(&HeaderMap::new()).await?;
/// assert!(user.is_none());
/// # Ok(())
/// # }
/// ```

pub mod identity;
pub mod jwt;

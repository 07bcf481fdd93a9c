/// Landing page
///
/// ```text
/// GET /
/// ```
///
/// Serves the statically composed marketing page as HTML.

use crate::{error::ApiResult, pages::landing_page_html};
use axum::response::Html;

pub async fn landing_page() -> ApiResult<Html<&'static str>> {
    Ok(Html(landing_page_html()?))
}

/// Landing page composition
///
/// The page is six presentational sections stacked in a fixed order. Each
/// section is a handlebars template under `templates/`, rendered in
/// `Section::ORDER` and dropped into the `page.hbs` skeleton. Nothing about it
/// depends on the request, so the document is rendered once and shared for
/// the lifetime of the process.
///
/// ```text
/// <nav data-section="navigation">
/// <section data-section="hero">
/// <section data-section="features">
/// <section data-section="testimonials">
/// <section data-section="call-to-action">
/// <footer data-section="footer">
/// ```

mod copy;

use handlebars::{Handlebars, RenderError};
use serde_json::json;
use std::sync::OnceLock;

pub use copy::{Feature, Testimonial, FEATURES, TESTIMONIALS};

/// Product name shown in the page chrome
pub const PRODUCT_NAME: &str = "Launchpad";

/// A presentational block of the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Navigation,
    Hero,
    Features,
    Testimonials,
    CallToAction,
    Footer,
}

impl Section {
    /// Render order, top to bottom
    pub const ORDER: [Section; 6] = [
        Section::Navigation,
        Section::Hero,
        Section::Features,
        Section::Testimonials,
        Section::CallToAction,
        Section::Footer,
    ];

    /// Value of the section's `data-section` attribute
    pub fn slug(self) -> &'static str {
        match self {
            Section::Navigation => "navigation",
            Section::Hero => "hero",
            Section::Features => "features",
            Section::Testimonials => "testimonials",
            Section::CallToAction => "call-to-action",
            Section::Footer => "footer",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Section::Navigation => include_str!("templates/navigation.hbs"),
            Section::Hero => include_str!("templates/hero.hbs"),
            Section::Features => include_str!("templates/features.hbs"),
            Section::Testimonials => include_str!("templates/testimonials.hbs"),
            Section::CallToAction => include_str!("templates/call_to_action.hbs"),
            Section::Footer => include_str!("templates/footer.hbs"),
        }
    }
}

fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    // A misspelled field fails the render instead of leaving a hole
    handlebars.set_strict_mode(true);
    handlebars
}

/// Renders the full landing page document
pub fn render_landing_page() -> Result<String, RenderError> {
    let handlebars = get_handlebars();

    let mut body = String::with_capacity(4 * 1024);
    for section in Section::ORDER {
        let html = handlebars.render_template(
            section.template(),
            &json!({
                "slug": section.slug(),
                "product": PRODUCT_NAME,
                "features": FEATURES,
                "testimonials": TESTIMONIALS,
            }),
        )?;
        body.push_str(&html);
    }

    handlebars.render_template(
        include_str!("templates/page.hbs"),
        &json!({
            "product": PRODUCT_NAME,
            "body": body,
        }),
    )
}

/// The rendered landing page, computed on first successful use
pub fn landing_page_html() -> Result<&'static str, RenderError> {
    static PAGE: OnceLock<String> = OnceLock::new();

    if let Some(page) = PAGE.get() {
        return Ok(page);
    }

    let page = render_landing_page()?;
    Ok(PAGE.get_or_init(|| page))
}

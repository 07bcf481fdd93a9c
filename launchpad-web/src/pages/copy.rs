//! Static copy shown on the landing page
//!
//! Rendered through the section templates, which HTML-escape every field.

use serde::Serialize;

/// A feature card
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// A customer quote
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        title: "One sign-in, every surface",
        description: "The same session works in the browser and from scripts with a bearer token.",
    },
    Feature {
        title: "Instant session check",
        description: "Your app asks a single endpoint whether someone is signed in and gets a clear yes or no.",
    },
    Feature {
        title: "Status at a glance",
        description: "A health endpoint reports the service version and whether the database is reachable.",
    },
    Feature {
        title: "Light by default",
        description: "A static, script-free front page served compressed with strict security headers.",
    },
];

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "We pointed our dashboard at the session check and deleted a whole login service.",
        author: "Priya Raman",
        role: "Platform Lead, Fieldnote",
    },
    Testimonial {
        quote: "Signing in once and having the CLI just work is the feature I did not know I needed.",
        author: "Marcus Oyelaran",
        role: "Staff Engineer, Tidewater Labs",
    },
    Testimonial {
        quote: "The health endpoint went straight into our uptime monitor on day one.",
        author: "Lena Vogt",
        role: "CTO, Brightloop",
    },
];

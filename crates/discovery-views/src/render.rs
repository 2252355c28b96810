//! HTML rendering via `minijinja`.
//!
//! The portal ships a built-in template set compiled into the binary.
//! Operators can point [`TemplateSource::Directory`] at a directory to
//! replace any of them without recompiling; files that are absent there
//! keep their built-in version. All templates autoescape HTML.

use std::path::{Path, PathBuf};

use discovery_router::Route;
use minijinja::{Environment, Value};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ViewError;
use crate::loadable::{Loadable, Presentable};

/// Public address of the portal, used for share links.
pub const DEFAULT_SITE_URL: &str = "https://miningdiscovery.com/";

/// Every template the views use, with its built-in source.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("macros.html", include_str!("../templates/macros.html")),
    ("layout.html", include_str!("../templates/layout.html")),
    ("category_menu.html", include_str!("../templates/category_menu.html")),
    ("feed.html", include_str!("../templates/feed.html")),
    ("magazine_strip.html", include_str!("../templates/magazine_strip.html")),
    ("newsletter_strip.html", include_str!("../templates/newsletter_strip.html")),
    ("advertisements.html", include_str!("../templates/advertisements.html")),
    ("profiles.html", include_str!("../templates/profiles.html")),
    ("magazines.html", include_str!("../templates/magazines.html")),
    ("category.html", include_str!("../templates/category.html")),
    ("article.html", include_str!("../templates/article.html")),
    ("newsletter_archive.html", include_str!("../templates/newsletter_archive.html")),
    ("morning_digest.html", include_str!("../templates/morning_digest.html")),
    (
        "multimedia_highlights.html",
        include_str!("../templates/multimedia_highlights.html"),
    ),
    ("pages/home.html", include_str!("../templates/pages/home.html")),
    ("pages/services.html", include_str!("../templates/pages/services.html")),
    (
        "pages/investor_campaigns.html",
        include_str!("../templates/pages/investor_campaigns.html"),
    ),
    (
        "pages/news_syndication.html",
        include_str!("../templates/pages/news_syndication.html"),
    ),
    (
        "pages/digital_branding.html",
        include_str!("../templates/pages/digital_branding.html"),
    ),
    ("pages/press_office.html", include_str!("../templates/pages/press_office.html")),
    (
        "pages/conference_media.html",
        include_str!("../templates/pages/conference_media.html"),
    ),
    (
        "pages/newsletter_email_blast.html",
        include_str!("../templates/pages/newsletter_email_blast.html"),
    ),
    ("pages/about_us.html", include_str!("../templates/pages/about_us.html")),
    ("pages/contact_us.html", include_str!("../templates/pages/contact_us.html")),
];

/// Where templates come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    /// The set compiled into the binary.
    #[default]
    Builtin,
    /// Files in this directory override built-ins of the same name.
    Directory(PathBuf),
}

/// Renders components and pages to HTML.
pub struct Renderer {
    env: Environment<'static>,
    site_url: String,
}

impl Renderer {
    /// Create a renderer from `source`, building share links against `site_url`.
    pub fn new(source: &TemplateSource, site_url: &str) -> Result<Self, ViewError> {
        let mut env = Environment::new();
        env.add_function("article_href", article_href);
        env.add_function("category_href", category_href);

        match source {
            TemplateSource::Builtin => {
                for (name, body) in BUILTIN_TEMPLATES {
                    env.add_template(*name, *body).map_err(|e| {
                        ViewError::Template(format!("failed to add {name}: {e}"))
                    })?;
                }
            }
            TemplateSource::Directory(dir) => {
                if !dir.is_dir() {
                    return Err(ViewError::TemplateDir(format!(
                        "{} is not a directory",
                        dir.display()
                    )));
                }
                let mut overridden = 0_usize;
                for (name, body) in BUILTIN_TEMPLATES {
                    let text = match load_template(dir, name)? {
                        Some(text) => {
                            overridden = overridden.saturating_add(1);
                            text
                        }
                        None => (*body).to_owned(),
                    };
                    env.add_template_owned(*name, text).map_err(|e| {
                        ViewError::Template(format!("failed to add {name}: {e}"))
                    })?;
                }
                info!(dir = %dir.display(), overridden, "templates loaded from directory");
            }
        }

        Ok(Self {
            env,
            site_url: site_url.to_owned(),
        })
    }

    /// The built-in template set with the default site URL.
    pub fn builtin() -> Result<Self, ViewError> {
        Self::new(&TemplateSource::Builtin, DEFAULT_SITE_URL)
    }

    /// Public address of the portal.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Render template `name` with `ctx`.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, ViewError> {
        debug!(template = name, "rendering");
        let html = self
            .env
            .get_template(name)
            .map_err(|e| ViewError::Template(format!("missing {name}: {e}")))?
            .render(ctx)
            .map_err(|e| ViewError::Template(format!("{name} render failed: {e}")))?;
        Ok(html)
    }
}

/// Read a template override from disk. A missing file is not an error.
fn load_template(dir: &Path, name: &str) -> Result<Option<String>, ViewError> {
    let path = dir.join(name);
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(&path)
        .map(Some)
        .map_err(|e| ViewError::TemplateDir(format!("failed to read {}: {e}", path.display())))
}

/// Template function: fragment of an article detail page.
fn article_href(document_id: &str) -> String {
    Route::Article(document_id.to_owned()).to_fragment()
}

/// Template function: fragment of a category listing.
fn category_href(slug: &str) -> String {
    Route::Category(slug.to_owned()).to_fragment()
}

/// Mark pre-rendered HTML as safe for embedding in another template.
pub fn safe(html: String) -> Value {
    Value::from_safe_string(html)
}

/// The context every region template receives.
///
/// `status` selects the branch, `data` is the payload on success, and
/// `message` is the user-facing text on failure.
pub fn region_context<T>(region: &str, state: &Loadable<T>) -> Value
where
    T: Serialize + Presentable,
{
    minijinja::context! {
        region => region,
        status => state.status(),
        data => state.data().map(Value::from_serialize),
        message => state.message(),
    }
}

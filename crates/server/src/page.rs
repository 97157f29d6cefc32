//! HTML results page.

use tera::{Context, Tera};

use crate::orchestrator::MoviePage;

const RESULTS_TEMPLATE: &str = "results.html";

/// Renders [`MoviePage`]s with the bundled template.
///
/// The `.html` name keeps tera's autoescaping on, so titles and review
/// quotes from the API can't inject markup.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(RESULTS_TEMPLATE, include_str!("../templates/results.html"))?;
        Ok(Self { tera })
    }

    pub fn render(&self, page: &MoviePage) -> Result<String, tera::Error> {
        let context = Context::from_serialize(page)?;
        self.tera.render(RESULTS_TEMPLATE, &context)
    }
}

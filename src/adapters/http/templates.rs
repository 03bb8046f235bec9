use std::sync::Arc;
use tera::Tera;

/// Template engine wrapper for rendering HTML templates
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  /// Loads every `*.html.tera` file under `dir`
  pub fn new(dir: &str) -> Result<Self, tera::Error> {
    let mut tera = Tera::new(&format!("{}/**/*.html.tera", dir.trim_end_matches('/')))?;
    tera.autoescape_on(vec![".html.tera", ".html"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  /// Render a template with the given context
  pub fn render(&self, template: &str, context: &tera::Context) -> Result<String, tera::Error> {
    self.tera.render(template, context)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::concepts::ConceptCatalog;

  #[test]
  fn test_concept_page_renders_escaped_content() {
    let templates = TemplateEngine::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates")).unwrap();
    let catalog = ConceptCatalog::new();
    let concept = catalog.find("me-y-do").unwrap();

    let mut context = tera::Context::new();
    context.insert("title", concept.title);
    context.insert("concept", concept);
    context.insert("concepts", &catalog.summaries());

    let html = templates.render("pages/concept.html.tera", &context).unwrap();

    // Tera escapes slashes too
    assert!(html.contains("Uso del &#x2F;me y &#x2F;do"));
    assert!(html.contains("&quot;clic&quot;"));
    assert!(html.contains("href=\"/conceptos/roleplay\""));
  }
}

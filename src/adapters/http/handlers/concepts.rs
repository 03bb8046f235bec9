use actix_web::{HttpResponse, web};

use crate::adapters::http::{
  dtos::{ConceptResponse, ConceptSummaryResponse, JSON_UTF8},
  errors::ApiError,
  templates::TemplateEngine,
};
use crate::domain::concepts::ConceptCatalog;

/// GET /api/concepts
pub async fn list_concepts_handler(catalog: web::Data<ConceptCatalog>) -> HttpResponse {
  let concepts: Vec<ConceptSummaryResponse> = catalog
    .summaries()
    .into_iter()
    .map(ConceptSummaryResponse::from)
    .collect();

  HttpResponse::Ok().content_type(JSON_UTF8).json(concepts)
}

/// GET /api/concepts/{slug}
pub async fn get_concept_handler(
  slug: web::Path<String>,
  catalog: web::Data<ConceptCatalog>,
) -> Result<HttpResponse, ApiError> {
  let concept = catalog.find(&slug).ok_or(ApiError::NotFound)?;

  Ok(
    HttpResponse::Ok()
      .content_type(JSON_UTF8)
      .json(ConceptResponse::from(concept)),
  )
}

/// GET /conceptos/{slug}, the concept rendered as a page
pub async fn concept_page_handler(
  slug: web::Path<String>,
  catalog: web::Data<ConceptCatalog>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, actix_web::Error> {
  let Some(concept) = catalog.find(&slug) else {
    let mut context = tera::Context::new();
    context.insert("title", "Concepto no encontrado");
    context.insert("concepts", &catalog.summaries());
    let html = templates
      .render("pages/not_found.html.tera", &context)
      .map_err(actix_web::error::ErrorInternalServerError)?;
    return Ok(
      HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html),
    );
  };

  let mut context = tera::Context::new();
  context.insert("title", concept.title);
  context.insert("concept", concept);
  context.insert("concepts", &catalog.summaries());

  let html = templates.render("pages/concept.html.tera", &context).map_err(|e| {
    tracing::error!(error = %e, slug = concept.slug, "Failed to render concept page");
    actix_web::error::ErrorInternalServerError(e)
  })?;

  Ok(
    HttpResponse::Ok()
      .content_type("text/html; charset=utf-8")
      .body(html),
  )
}

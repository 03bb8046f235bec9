use serde::Serialize;

/// One roleplay rule concept, as shown in the rules reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Concept {
  /// URL-safe identifier
  pub slug: &'static str,
  pub title: &'static str,
  /// One-line description shown in listings
  pub summary: &'static str,
  pub sections: &'static [ConceptSection],
}

/// A titled block of a concept page: free text followed by a bullet list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConceptSection {
  pub heading: &'static str,
  pub paragraphs: &'static [&'static str],
  pub items: &'static [&'static str],
}

/// Listing entry without the page body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConceptSummary {
  pub slug: &'static str,
  pub title: &'static str,
  pub summary: &'static str,
}

impl Concept {
  pub fn summary(&self) -> ConceptSummary {
    ConceptSummary {
      slug: self.slug,
      title: self.title,
      summary: self.summary,
    }
  }
}

//! Filtered views — the search box and category dropdowns above every list.
//!
//! A view is recomputed from the full list on every change; it never
//! paginates or re-sorts, so the output keeps source order.

use std::{convert::Infallible, str::FromStr};

use crate::{
  Result,
  entity::{
    CoreCompetency, Course, CourseOutcome, Curriculum, GraduateProfile, KnowledgeArea,
    LearningOutcome, LearningPlan, Lecturer,
  },
  options::{Aspect, Choice, CourseNature, CurriculumStatus, PlanStatus, Semester},
};

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A record that can appear in a filtered list.
pub trait Searchable {
  /// The category a dropdown filters on. Records without one use
  /// [`Infallible`].
  type Facet: PartialEq;

  /// The text fields the search box matches against.
  fn search_fields(&self) -> Vec<&str>;

  /// Whether this record belongs to `facet`.
  fn has_facet(&self, facet: &Self::Facet) -> bool;
}

// ─── Category filter ─────────────────────────────────────────────────────────

/// One dropdown: either the `all` sentinel or a single option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter<C> {
  #[default]
  All,
  Only(C),
}

impl<C> CategoryFilter<C> {
  pub fn as_option(&self) -> Option<&C> {
    match self {
      Self::All => None,
      Self::Only(c) => Some(c),
    }
  }

  pub fn is_all(&self) -> bool { matches!(self, Self::All) }
}

impl<C: Choice + PartialEq> CategoryFilter<C> {
  /// Step through `all → first → … → last → all`.
  pub fn cycle(self) -> Self {
    let options = C::all();
    match self {
      Self::All => options.first().copied().map_or(Self::All, Self::Only),
      Self::Only(c) => {
        let pos = options.iter().position(|o| *o == c).unwrap_or(options.len());
        options.get(pos + 1).copied().map_or(Self::All, Self::Only)
      }
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::All => "Semua",
      Self::Only(c) => c.label(),
    }
  }
}

impl<C: Choice> FromStr for CategoryFilter<C> {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self> {
    if s == "all" { Ok(Self::All) } else { C::parse(s).map(Self::Only) }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Search text plus the set of active category filters.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery<F> {
  pub text:   String,
  /// Every facet must match. An empty list is "all".
  pub facets: Vec<F>,
}

impl<F> Default for ViewQuery<F> {
  fn default() -> Self { Self { text: String::new(), facets: Vec::new() } }
}

impl<F> ViewQuery<F> {
  pub fn text(text: impl Into<String>) -> Self {
    Self { text: text.into(), facets: Vec::new() }
  }

  /// Add `filter` unless it is the `all` sentinel.
  pub fn with<C>(mut self, filter: CategoryFilter<C>, into_facet: impl FnOnce(C) -> F) -> Self {
    if let CategoryFilter::Only(c) = filter {
      self.facets.push(into_facet(c));
    }
    self
  }

  pub fn facet(mut self, facet: F) -> Self {
    self.facets.push(facet);
    self
  }
}

/// Case-insensitive substring match of `needle` in any of `fields`.
pub fn matches_text(fields: &[&str], needle: &str) -> bool {
  if needle.is_empty() {
    return true;
  }
  let needle = needle.to_lowercase();
  fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// The subset of `items` matching `query`, in source order.
pub fn filter<'a, T, I>(items: I, query: &ViewQuery<T::Facet>) -> Vec<&'a T>
where
  T: Searchable + 'a,
  I: IntoIterator<Item = &'a T>,
{
  items
    .into_iter()
    .filter(|item| {
      matches_text(&item.search_fields(), &query.text)
        && query.facets.iter().all(|f| item.has_facet(f))
    })
    .collect()
}

// ─── Entity impls ────────────────────────────────────────────────────────────

impl Searchable for Curriculum {
  type Facet = CurriculumStatus;

  fn search_fields(&self) -> Vec<&str> { vec![self.name.as_str()] }

  fn has_facet(&self, facet: &CurriculumStatus) -> bool {
    CurriculumStatus::of(self.is_active) == *facet
  }
}

impl Searchable for GraduateProfile {
  type Facet = Infallible;

  fn search_fields(&self) -> Vec<&str> {
    vec![self.code.as_str(), self.title.as_str(), self.description.as_str()]
  }

  fn has_facet(&self, facet: &Infallible) -> bool { match *facet {} }
}

impl Searchable for CoreCompetency {
  type Facet = Aspect;

  fn search_fields(&self) -> Vec<&str> { vec![self.description.as_str(), self.code.as_str()] }

  fn has_facet(&self, facet: &Aspect) -> bool { self.aspect == *facet }
}

impl Searchable for LearningOutcome {
  type Facet = Aspect;

  fn search_fields(&self) -> Vec<&str> { vec![self.code.as_str(), self.description.as_str()] }

  fn has_facet(&self, facet: &Aspect) -> bool { self.aspect == *facet }
}

impl Searchable for KnowledgeArea {
  type Facet = Aspect;

  fn search_fields(&self) -> Vec<&str> {
    vec![self.name.as_str(), self.code.as_str(), self.domain.as_str()]
  }

  fn has_facet(&self, facet: &Aspect) -> bool { self.aspect == *facet }
}

/// Courses filter on two independent dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseFacet {
  Semester(Semester),
  Nature(CourseNature),
}

impl Searchable for Course {
  type Facet = CourseFacet;

  fn search_fields(&self) -> Vec<&str> { vec![self.code.as_str(), self.name.as_str()] }

  fn has_facet(&self, facet: &CourseFacet) -> bool {
    match facet {
      CourseFacet::Semester(s) => self.semester == *s,
      CourseFacet::Nature(n) => self.nature == *n,
    }
  }
}

impl Searchable for Lecturer {
  type Facet = Infallible;

  fn search_fields(&self) -> Vec<&str> {
    let mut fields = vec![self.nip.as_str(), self.name.as_str()];
    fields.extend(self.specialty.as_deref());
    fields
  }

  fn has_facet(&self, facet: &Infallible) -> bool { match *facet {} }
}

impl Searchable for CourseOutcome {
  type Facet = Infallible;

  fn search_fields(&self) -> Vec<&str> {
    vec![self.code.as_str(), self.description.as_str(), self.course_code.as_str()]
  }

  fn has_facet(&self, facet: &Infallible) -> bool { match *facet {} }
}

impl Searchable for LearningPlan {
  type Facet = PlanStatus;

  fn search_fields(&self) -> Vec<&str> { vec![self.course_code.as_str(), self.lecturer.as_str()] }

  fn has_facet(&self, facet: &PlanStatus) -> bool { self.status == *facet }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entity::RecordId;

  fn area(code: &str, name: &str, aspect: Aspect, domain: &str) -> KnowledgeArea {
    KnowledgeArea {
      id: RecordId::new(),
      code: code.into(),
      name: name.into(),
      aspect,
      domain: domain.into(),
      curriculum_id: RecordId::new(),
    }
  }

  fn course(code: &str, name: &str, semester: Semester, nature: CourseNature) -> Course {
    Course {
      code: code.into(),
      name: name.into(),
      credits: 3,
      semester,
      nature,
      description: String::new(),
      curriculum_id: RecordId::new(),
      knowledge_area: None,
      outcomes: Vec::new(),
      lecturers: Vec::new(),
    }
  }

  #[test]
  fn search_is_case_insensitive_substring() {
    let courses = [
      course("INF201", "Basis Data", Semester::Three, CourseNature::Mandatory),
      course("INF301", "Pemrograman Web", Semester::Four, CourseNature::Mandatory),
    ];
    let hits = filter(&courses, &ViewQuery::text("basis"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Basis Data");
  }

  #[test]
  fn empty_query_keeps_everything_in_order() {
    let courses = [
      course("B", "Second", Semester::Two, CourseNature::Elective),
      course("A", "First", Semester::One, CourseNature::Mandatory),
    ];
    let hits = filter(&courses, &ViewQuery::default());
    let codes: Vec<_> = hits.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, ["B", "A"]);
  }

  #[test]
  fn facets_must_all_match() {
    let courses = [
      course("INF301", "Pemrograman Web", Semester::Four, CourseNature::Mandatory),
      course("INF302", "Jaringan Komputer", Semester::Four, CourseNature::Elective),
      course("INF401", "RPL", Semester::Five, CourseNature::Elective),
    ];
    let query = ViewQuery::default()
      .with(CategoryFilter::Only(Semester::Four), CourseFacet::Semester)
      .with(CategoryFilter::Only(CourseNature::Elective), CourseFacet::Nature);
    let hits = filter(&courses, &query);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].code, "INF302");

    let all: ViewQuery<CourseFacet> =
      ViewQuery::default().with(CategoryFilter::<Semester>::All, CourseFacet::Semester);
    assert!(all.facets.is_empty());
  }

  #[test]
  fn knowledge_area_matches_domain_and_aspect() {
    let areas = [
      area("BK-03", "Basis Data", Aspect::SpecificSkill, "Sistem Informasi"),
      area("BK-07", "Etika Profesi TI", Aspect::Attitude, "Etika dan Profesionalisme"),
    ];
    assert_eq!(filter(&areas, &ViewQuery::text("SISTEM")).len(), 1);
    let attitude = ViewQuery::default().facet(Aspect::Attitude);
    let hits = filter(&areas, &attitude);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].code, "BK-07");
  }

  #[test]
  fn all_sentinel_parses() {
    let all: CategoryFilter<Aspect> = "all".parse().unwrap();
    assert!(all.is_all());
    let kk: CategoryFilter<Aspect> = "KK".parse().unwrap();
    assert_eq!(kk, CategoryFilter::Only(Aspect::SpecificSkill));
    assert!("nope".parse::<CategoryFilter<Aspect>>().is_err());
  }

  #[test]
  fn category_cycle_returns_to_all() {
    let mut f = CategoryFilter::<CourseNature>::All;
    f = f.cycle();
    assert_eq!(f, CategoryFilter::Only(CourseNature::Mandatory));
    f = f.cycle();
    assert_eq!(f, CategoryFilter::Only(CourseNature::Elective));
    assert!(f.cycle().is_all());
  }

  #[test]
  fn curriculum_status_facet() {
    let active = Curriculum {
      id: RecordId::new(),
      name: "Kurikulum OBE 2024".into(),
      effective_year: 2024,
      is_active: true,
      created_at: None,
    };
    let archived = Curriculum { is_active: false, name: "Kurikulum 2016".into(), ..active.clone() };
    let list = [active, archived];
    let query = ViewQuery::default().facet(CurriculumStatus::Archive);
    let hits = filter(&list, &query);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Kurikulum 2016");
  }
}

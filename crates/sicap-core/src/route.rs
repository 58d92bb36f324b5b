//! The navigation surface: one [`Route`] per dashboard page.

use std::{fmt, str::FromStr};

use crate::{Error, Result, entity::RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
  Dashboard,
  Curricula,
  GraduateProfiles,
  CoreCompetencies,
  /// CPL list, with the CPL → graduate profile matrix.
  LearningOutcomes,
  /// Bahan Kajian list, with the CPL → knowledge area matrix.
  KnowledgeAreas,
  /// Course list, with the CPL → course matrix.
  Courses,
  CourseOutcomes,
  Plans,
  NewPlan,
  EditPlan(RecordId),
  Reports,
}

impl Route {
  /// Routes shown in the sidebar, top to bottom.
  pub const NAV: [Route; 10] = [
    Route::Dashboard,
    Route::Curricula,
    Route::GraduateProfiles,
    Route::CoreCompetencies,
    Route::LearningOutcomes,
    Route::KnowledgeAreas,
    Route::Courses,
    Route::CourseOutcomes,
    Route::Plans,
    Route::Reports,
  ];

  pub fn path(&self) -> String {
    match self {
      Self::Dashboard => "/".to_owned(),
      Self::EditPlan(id) => format!("/rps/{id}/edit"),
      other => format!("/{}", other.segment()),
    }
  }

  fn segment(&self) -> &'static str {
    match self {
      Self::Dashboard => "",
      Self::Curricula => "kurikulum",
      Self::GraduateProfiles => "profil-lulusan",
      Self::CoreCompetencies => "kompetensi-utama",
      Self::LearningOutcomes => "cpl",
      Self::KnowledgeAreas => "bahan-kajian",
      Self::Courses => "mata-kuliah",
      Self::CourseOutcomes => "cpmk",
      Self::Plans | Self::EditPlan(_) => "rps",
      Self::NewPlan => "rps/new",
      Self::Reports => "laporan",
    }
  }

  /// Sidebar title.
  pub fn title(&self) -> &'static str {
    match self {
      Self::Dashboard => "Dashboard",
      Self::Curricula => "Kurikulum",
      Self::GraduateProfiles => "Profil Lulusan",
      Self::CoreCompetencies => "KUL",
      Self::LearningOutcomes => "CPL",
      Self::KnowledgeAreas => "Bahan Kajian",
      Self::Courses => "Mata Kuliah",
      Self::CourseOutcomes => "CPMK",
      Self::Plans => "RPS",
      Self::NewPlan => "RPS Baru",
      Self::EditPlan(_) => "Edit RPS",
      Self::Reports => "Laporan",
    }
  }

  /// The sidebar entry highlighted while this route is shown. Nested routes
  /// highlight their parent.
  pub fn nav_parent(&self) -> Route {
    match self {
      Self::NewPlan | Self::EditPlan(_) => Self::Plans,
      other => *other,
    }
  }

  /// Parse a path. A trailing slash is ignored.
  pub fn parse(path: &str) -> Result<Self> {
    let unknown = || Error::UnknownRoute(path.to_owned());
    let trimmed = path.strip_prefix('/').ok_or_else(unknown)?;
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let route = match trimmed {
      "" => Self::Dashboard,
      "kurikulum" => Self::Curricula,
      "profil-lulusan" => Self::GraduateProfiles,
      "kompetensi-utama" => Self::CoreCompetencies,
      "cpl" => Self::LearningOutcomes,
      "bahan-kajian" => Self::KnowledgeAreas,
      "mata-kuliah" => Self::Courses,
      "cpmk" => Self::CourseOutcomes,
      "rps" => Self::Plans,
      "rps/new" => Self::NewPlan,
      "laporan" => Self::Reports,
      other => {
        let id = other
          .strip_prefix("rps/")
          .and_then(|rest| rest.strip_suffix("/edit"))
          .ok_or_else(unknown)?;
        Self::EditPlan(id.parse().map_err(|_| unknown())?)
      }
    };
    Ok(route)
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.path()) }
}

impl FromStr for Route {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn paths_round_trip() {
    let id = RecordId::new();
    let mut routes = Route::NAV.to_vec();
    routes.extend([Route::NewPlan, Route::EditPlan(id)]);
    for route in routes {
      assert_eq!(Route::parse(&route.path()).unwrap(), route, "{route}");
    }
  }

  #[test]
  fn known_paths() {
    assert_eq!(Route::Dashboard.path(), "/");
    assert_eq!(Route::KnowledgeAreas.path(), "/bahan-kajian");
    assert_eq!(Route::parse("/laporan/").unwrap(), Route::Reports);
    let id = RecordId::new();
    assert_eq!(Route::EditPlan(id).path(), format!("/rps/{id}/edit"));
  }

  #[test]
  fn unknown_paths_are_errors() {
    for path in ["", "kurikulum", "/nope", "/rps/abc/edit", "/rps//edit"] {
      assert!(matches!(Route::parse(path), Err(Error::UnknownRoute(_))), "{path}");
    }
  }

  #[test]
  fn nested_routes_highlight_parent() {
    assert_eq!(Route::NewPlan.nav_parent(), Route::Plans);
    assert_eq!(Route::EditPlan(RecordId::new()).nav_parent(), Route::Plans);
    assert_eq!(Route::Courses.nav_parent(), Route::Courses);
  }
}

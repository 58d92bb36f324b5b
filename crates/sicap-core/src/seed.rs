//! Demonstration data loaded at start-up.
//!
//! Relations are declared by code here and resolved to fresh record ids as
//! the workspace is built.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::{
  entity::{
    CoreCompetency, Course, CourseOutcome, Curriculum, GraduateProfile, KnowledgeArea,
    LearningOutcome, LearningPlan, Lecturer, RecordId, Session,
  },
  kkm::{ScorePoint, StudentResult, TermRecord},
  matrix::RelationMatrix,
  options::{AssessmentForm, Aspect, CourseNature, PlanStatus, Semester, TeachingMethod},
  workspace::{Scoreboard, Workspace},
};

const CURRICULA: &[(&str, i32, bool, (i32, u32, u32))] = &[
  ("Kurikulum OBE 2024", 2024, true, (2024, 1, 15)),
  ("Kurikulum KKNI 2020", 2020, true, (2020, 2, 10)),
  ("Kurikulum 2016", 2016, false, (2016, 3, 5)),
];

const PROFILES: &[(&str, &str, &str, &str)] = &[
  (
    "PL-01",
    "Software Engineer",
    "Mampu merancang, mengembangkan, dan memelihara sistem perangkat lunak yang efisien dan \
     berkualitas tinggi sesuai dengan kebutuhan industri.",
    "KKNI Level 6, Asosiasi Profesi Informatika Indonesia",
  ),
  (
    "PL-02",
    "Data Analyst",
    "Mampu mengolah, menganalisis, dan menginterpretasi data untuk mendukung pengambilan \
     keputusan bisnis secara akurat dan efektif.",
    "KKNI Level 6, Standar Kompetensi Data Science",
  ),
  (
    "PL-03",
    "IT Consultant",
    "Mampu memberikan solusi teknologi informasi yang tepat sesuai kebutuhan organisasi dan \
     mampu berkomunikasi dengan pemangku kepentingan.",
    "KKNI Level 6, Standar Kompetensi Konsultan IT",
  ),
  (
    "PL-04",
    "System Administrator",
    "Mampu mengelola, memelihara, dan mengamankan infrastruktur sistem informasi dalam \
     organisasi.",
    "KKNI Level 6, CompTIA Standards",
  ),
];

const COMPETENCIES: &[(&str, Aspect, &str)] = &[
  ("S1", Aspect::Attitude, "Bertakwa kepada Tuhan Yang Maha Esa dan mampu menunjukkan sikap religius"),
  (
    "S2",
    Aspect::Attitude,
    "Menjunjung tinggi nilai kemanusiaan dalam menjalankan tugas berdasarkan agama, moral, dan etika",
  ),
  (
    "P1",
    Aspect::Knowledge,
    "Menguasai konsep teoretis bidang pengetahuan tertentu secara umum dan mendalam",
  ),
  ("P2", Aspect::Knowledge, "Menguasai prinsip dan teknik pemrograman serta mampu mengaplikasikannya"),
  (
    "KU1",
    Aspect::GeneralSkill,
    "Mampu menerapkan pemikiran logis, kritis, sistematis, dan inovatif dalam pengembangan ilmu \
     pengetahuan",
  ),
  ("KU2", Aspect::GeneralSkill, "Mampu menunjukkan kinerja mandiri, bermutu, dan terukur"),
  ("KK1", Aspect::SpecificSkill, "Mampu merancang dan mengembangkan aplikasi berbasis komputer"),
  (
    "KK2",
    Aspect::SpecificSkill,
    "Mampu menganalisis kebutuhan sistem informasi dan merancang solusi teknologi",
  ),
];

const OUTCOMES: &[(&str, Aspect, &str)] = &[
  (
    "S1",
    Aspect::Attitude,
    "Bertakwa kepada Tuhan YME dan mampu menunjukkan sikap religius dalam kehidupan sehari-hari",
  ),
  (
    "S2",
    Aspect::Attitude,
    "Menjunjung tinggi nilai kemanusiaan dalam menjalankan tugas berdasarkan agama, moral, dan etika",
  ),
  ("P1", Aspect::Knowledge, "Menguasai konsep teoritis bidang teknologi informasi secara umum dan mendalam"),
  (
    "P2",
    Aspect::Knowledge,
    "Menguasai prinsip-prinsip rekayasa perangkat lunak dan metodologi pengembangan sistem",
  ),
  ("KU1", Aspect::GeneralSkill, "Mampu menerapkan pemikiran logis, kritis, sistematis, dan inovatif"),
  ("KU2", Aspect::GeneralSkill, "Mampu menunjukkan kinerja mandiri, bermutu, dan terukur"),
  ("KK1", Aspect::SpecificSkill, "Mampu merancang dan mengembangkan sistem informasi yang efisien"),
  (
    "KK2",
    Aspect::SpecificSkill,
    "Mampu mengembangkan aplikasi berbasis web dan mobile dengan framework modern",
  ),
];

const AREAS: &[(&str, &str, Aspect, &str)] = &[
  ("BK-01", "Algoritma dan Pemrograman", Aspect::Knowledge, "Ilmu Komputer Dasar"),
  ("BK-02", "Struktur Data", Aspect::Knowledge, "Ilmu Komputer Dasar"),
  ("BK-03", "Basis Data", Aspect::SpecificSkill, "Sistem Informasi"),
  ("BK-04", "Jaringan Komputer", Aspect::SpecificSkill, "Infrastruktur TI"),
  ("BK-05", "Rekayasa Perangkat Lunak", Aspect::SpecificSkill, "Pengembangan Perangkat Lunak"),
  ("BK-06", "Pengembangan Web", Aspect::SpecificSkill, "Pengembangan Aplikasi"),
  ("BK-07", "Etika Profesi TI", Aspect::Attitude, "Etika dan Profesionalisme"),
  ("BK-08", "Manajemen Proyek TI", Aspect::GeneralSkill, "Manajemen"),
];

struct CourseSeed {
  code:        &'static str,
  name:        &'static str,
  credits:     u8,
  semester:    Semester,
  nature:      CourseNature,
  description: &'static str,
  area:        &'static str,
  outcomes:    &'static [&'static str],
  lecturers:   &'static [&'static str],
}

const COURSES: &[CourseSeed] = &[
  CourseSeed {
    code:        "INF101",
    name:        "Pemrograman Dasar",
    credits:     3,
    semester:    Semester::One,
    nature:      CourseNature::Mandatory,
    description: "Pengantar konsep pemrograman komputer",
    area:        "BK-01",
    outcomes:    &["P1", "KU1"],
    lecturers:   &["198001012005011001"],
  },
  CourseSeed {
    code:        "INF102",
    name:        "Struktur Data",
    credits:     3,
    semester:    Semester::Two,
    nature:      CourseNature::Mandatory,
    description: "Konsep dan implementasi struktur data",
    area:        "BK-02",
    outcomes:    &["P1", "KU1", "KK1"],
    lecturers:   &["198001012005011001"],
  },
  CourseSeed {
    code:        "INF201",
    name:        "Basis Data",
    credits:     3,
    semester:    Semester::Three,
    nature:      CourseNature::Mandatory,
    description: "Perancangan dan implementasi basis data",
    area:        "BK-03",
    outcomes:    &["P2", "KK1"],
    lecturers:   &["198505152010122002"],
  },
  CourseSeed {
    code:        "INF301",
    name:        "Pemrograman Web",
    credits:     3,
    semester:    Semester::Four,
    nature:      CourseNature::Mandatory,
    description: "Pengembangan aplikasi berbasis web",
    area:        "BK-06",
    outcomes:    &["KK1", "KK2"],
    lecturers:   &["199003202015041003"],
  },
  CourseSeed {
    code:        "INF302",
    name:        "Jaringan Komputer",
    credits:     3,
    semester:    Semester::Four,
    nature:      CourseNature::Mandatory,
    description: "Konsep dan implementasi jaringan komputer",
    area:        "BK-04",
    outcomes:    &["P2", "KK1"],
    lecturers:   &[],
  },
  CourseSeed {
    code:        "INF401",
    name:        "Rekayasa Perangkat Lunak",
    credits:     3,
    semester:    Semester::Five,
    nature:      CourseNature::Mandatory,
    description: "Metodologi pengembangan perangkat lunak",
    area:        "BK-05",
    outcomes:    &["P2", "KU2", "KK1"],
    lecturers:   &["198505152010122002", "199003202015041003"],
  },
  CourseSeed {
    code:        "INF402",
    name:        "Etika Profesi",
    credits:     2,
    semester:    Semester::Six,
    nature:      CourseNature::Mandatory,
    description: "Etika dan profesionalisme di bidang TI",
    area:        "BK-07",
    outcomes:    &["S1", "S2"],
    lecturers:   &[],
  },
  CourseSeed {
    code:        "INF403",
    name:        "Manajemen Proyek TI",
    credits:     3,
    semester:    Semester::Seven,
    nature:      CourseNature::Elective,
    description: "Pengelolaan proyek teknologi informasi",
    area:        "BK-08",
    outcomes:    &["KU1", "KU2"],
    lecturers:   &[],
  },
];

const LECTURERS: &[(&str, &str, &str, &str, &str)] = &[
  (
    "198001012005011001",
    "Dr. Ahmad Wijaya, M.Kom.",
    "ahmad.wijaya@unsri.ac.id",
    "Algoritma dan Pemrograman",
    "Lektor Kepala",
  ),
  ("198505152010122002", "Siti Rahmawati, M.T.", "siti.rahmawati@unsri.ac.id", "Basis Data", "Lektor"),
  (
    "199003202015041003",
    "Rizky Pratama, M.Cs.",
    "rizky.pratama@unsri.ac.id",
    "Pengembangan Web",
    "Asisten Ahli",
  ),
];

/// `(course, code, description, weight, CPL code)`.
const COURSE_OUTCOMES: &[(&str, &str, &str, f64, &str)] = &[
  ("INF101", "M1", "Menjelaskan konsep dasar algoritma dan tipe data", 20.0, "P1"),
  ("INF101", "M2", "Menyusun program dengan struktur kontrol percabangan dan perulangan", 30.0, "KU1"),
  ("INF101", "M3", "Menerapkan fungsi dan array dalam penyelesaian masalah", 25.0, "P1"),
  ("INF101", "M4", "Membuat program modular untuk studi kasus sederhana", 25.0, "KU1"),
  ("INF201", "M1", "Merancang model data konseptual dengan ERD", 30.0, "P2"),
  ("INF201", "M2", "Menormalisasi skema relasional hingga 3NF", 30.0, "P2"),
  ("INF201", "M3", "Menulis kueri SQL untuk kebutuhan informasi", 40.0, "KK1"),
  ("INF301", "M1", "Membangun antarmuka web responsif", 50.0, "KK2"),
  ("INF301", "M2", "Mengembangkan aplikasi web dengan framework modern", 50.0, "KK1"),
];

const OUTCOME_AREAS: &[(&str, &[&str])] = &[
  ("S1", &["BK-07"]),
  ("S2", &["BK-07"]),
  ("P1", &["BK-01", "BK-02"]),
  ("P2", &["BK-05"]),
  ("KU1", &["BK-01", "BK-08"]),
  ("KU2", &["BK-08"]),
  ("KK1", &["BK-03", "BK-05", "BK-06"]),
  ("KK2", &["BK-06"]),
];

const OUTCOME_PROFILES: &[(&str, &[&str])] = &[
  ("S1", &["PL-01", "PL-02"]),
  ("S2", &["PL-01", "PL-03"]),
  ("P1", &["PL-01", "PL-02"]),
  ("P2", &["PL-01", "PL-03", "PL-04"]),
  ("KU1", &["PL-01", "PL-02", "PL-04"]),
  ("KU2", &["PL-01", "PL-02", "PL-03"]),
  ("KK1", &["PL-01"]),
  ("KK2", &["PL-01", "PL-02"]),
];

const PROFILE_ATTAINMENT: &[f64] = &[85.0, 78.0, 72.0, 80.0];
const AREA_AVERAGES: &[f64] = &[82.0, 78.0, 75.0, 80.0, 72.0, 76.0, 79.0, 74.0];
const COURSE_AVERAGES: &[f64] = &[78.0, 72.0, 80.0, 85.0, 68.0, 74.0, 82.0, 70.0];

/// `(nim, name, cohort, course, CPMK scores)`.
const RESULTS: &[(&str, &str, i32, &str, &[f64])] = &[
  ("2021001", "Ahmad Fauzi", 2021, "INF101", &[85.0, 78.0, 82.0, 88.0]),
  ("2021001", "Ahmad Fauzi", 2021, "INF102", &[72.0, 68.0, 75.0]),
  ("2021001", "Ahmad Fauzi", 2021, "INF201", &[90.0, 85.0, 88.0]),
  ("2021001", "Ahmad Fauzi", 2021, "INF301", &[92.0, 88.0, 85.0]),
  ("2021002", "Budi Santoso", 2021, "INF101", &[65.0, 70.0, 68.0, 72.0]),
  ("2021002", "Budi Santoso", 2021, "INF102", &[60.0, 65.0, 62.0]),
  ("2021003", "Citra Dewi", 2021, "INF101", &[78.0, 82.0, 80.0, 85.0]),
  ("2021003", "Citra Dewi", 2021, "INF201", &[75.0, 78.0, 72.0]),
  ("2022001", "Eka Putra", 2022, "INF101", &[88.0, 85.0, 90.0, 92.0]),
  ("2022002", "Fitri Handayani", 2022, "INF101", &[72.0, 75.0, 70.0, 78.0]),
  ("2022002", "Fitri Handayani", 2022, "INF102", &[68.0, 65.0, 70.0]),
];

const PERIODS: [&str; 6] = [
  "2021/2022 Ganjil",
  "2021/2022 Genap",
  "2022/2023 Ganjil",
  "2022/2023 Genap",
  "2023/2024 Ganjil",
  "2023/2024 Genap",
];

/// Students below the threshold per term: `(course, [(below, total); 6])`.
const HISTORY: &[(&str, [(usize, usize); 6])] = &[
  ("INF101", [(15, 120), (12, 118), (18, 125), (10, 122), (8, 130), (14, 128)]),
  ("INF102", [(20, 115), (18, 112), (22, 120), (15, 118), (12, 125), (16, 122)]),
  ("INF201", [(10, 110), (8, 108), (12, 115), (6, 112), (9, 120), (11, 118)]),
  ("INF301", [(5, 108), (7, 105), (8, 112), (4, 110), (6, 115), (9, 118)]),
  ("INF302", [(25, 105), (22, 102), (28, 110), (18, 108), (15, 112), (20, 115)]),
];

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> { NaiveDate::from_ymd_opt(y, m, d) }

fn code_lookup<'a, T>(
  items: impl IntoIterator<Item = &'a T>,
  code: impl Fn(&T) -> &str,
  id: impl Fn(&T) -> RecordId,
  wanted: &str,
) -> Option<RecordId>
where
  T: 'a,
{
  items.into_iter().find(|t| code(t) == wanted).map(id)
}

/// The start-up workspace.
pub fn workspace() -> Workspace {
  let mut ws = Workspace::new();

  for &(name, year, active, (y, m, d)) in CURRICULA {
    ws.curricula.add(Curriculum {
      id:             RecordId::new(),
      name:           name.to_owned(),
      effective_year: year,
      is_active:      active,
      created_at:     Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single(),
    });
  }
  let primary = ws.primary_curriculum().unwrap_or_default();

  for &(code, title, description, source) in PROFILES {
    ws.profiles.add(GraduateProfile {
      id: RecordId::new(),
      code: code.to_owned(),
      title: title.to_owned(),
      description: description.to_owned(),
      source: source.to_owned(),
      curriculum_id: primary,
    });
  }
  for &(code, aspect, description) in COMPETENCIES {
    ws.competencies.add(CoreCompetency {
      id: RecordId::new(),
      code: code.to_owned(),
      description: description.to_owned(),
      aspect,
      curriculum_id: primary,
    });
  }
  for &(code, aspect, description) in OUTCOMES {
    ws.outcomes.add(LearningOutcome {
      id: RecordId::new(),
      code: code.to_owned(),
      description: description.to_owned(),
      aspect,
      curriculum_id: primary,
    });
  }
  for &(code, name, aspect, domain) in AREAS {
    ws.knowledge_areas.add(KnowledgeArea {
      id: RecordId::new(),
      code: code.to_owned(),
      name: name.to_owned(),
      aspect,
      domain: domain.to_owned(),
      curriculum_id: primary,
    });
  }
  for &(nip, name, email, specialty, rank) in LECTURERS {
    ws.lecturers.add(Lecturer {
      id:        RecordId::new(),
      nip:       nip.to_owned(),
      name:      name.to_owned(),
      email:     Some(email.to_owned()),
      specialty: Some(specialty.to_owned()),
      rank:      Some(rank.to_owned()),
    });
  }

  let outcome_id = |ws: &Workspace, code: &str| {
    code_lookup(&ws.outcomes, |o| o.code.as_str(), |o| o.id, code)
  };
  let area_id = |ws: &Workspace, code: &str| {
    code_lookup(&ws.knowledge_areas, |k| k.code.as_str(), |k| k.id, code)
  };
  let profile_id = |ws: &Workspace, code: &str| {
    code_lookup(&ws.profiles, |p| p.code.as_str(), |p| p.id, code)
  };

  for seed in COURSES {
    let course = Course {
      code:           seed.code.to_owned(),
      name:           seed.name.to_owned(),
      credits:        seed.credits,
      semester:       seed.semester,
      nature:         seed.nature,
      description:    seed.description.to_owned(),
      curriculum_id:  primary,
      knowledge_area: area_id(&ws, seed.area),
      outcomes:       seed.outcomes.iter().filter_map(|c| outcome_id(&ws, *c)).collect(),
      lecturers:      seed
        .lecturers
        .iter()
        .filter_map(|&nip| code_lookup(&ws.lecturers, |l| l.nip.as_str(), |l| l.id, nip))
        .collect(),
    };
    ws.courses.add(course);
  }
  ws.sync_outcome_courses();

  for &(course, code, description, weight, cpl) in COURSE_OUTCOMES {
    if let Some(cpl) = outcome_id(&ws, cpl) {
      ws.course_outcomes.add(CourseOutcome {
        id: RecordId::new(),
        code: code.to_owned(),
        description: description.to_owned(),
        weight,
        course_code: course.to_owned(),
        outcome_id: cpl,
      });
    }
  }

  let mut area_pairs = Vec::new();
  for &(cpl, areas) in OUTCOME_AREAS {
    for &area in areas {
      if let (Some(o), Some(a)) = (outcome_id(&ws, cpl), area_id(&ws, area)) {
        area_pairs.push((o, a));
      }
    }
  }
  let mut profile_pairs = Vec::new();
  for &(cpl, profiles) in OUTCOME_PROFILES {
    for &profile in profiles {
      if let (Some(o), Some(p)) = (outcome_id(&ws, cpl), profile_id(&ws, profile)) {
        profile_pairs.push((o, p));
      }
    }
  }
  ws.outcome_areas = RelationMatrix::from_pairs(area_pairs);
  ws.outcome_profiles = RelationMatrix::from_pairs(profile_pairs);

  ws.plans = plans().into_iter().collect();
  ws.scores = scoreboard(&ws);
  ws
}

fn plans() -> Vec<LearningPlan> {
  let session = |week, learning_form, assessment, weight| Session {
    week,
    learning_form,
    minutes: 150,
    assessment,
    weight,
  };
  let mut plans = Vec::new();
  if let Some(drafted_on) = date(2024, 8, 1) {
    plans.push(LearningPlan {
      id: RecordId::new(),
      course_code: "INF101".to_owned(),
      version: 2,
      drafted_on,
      lecturer: "Dr. Ahmad Wijaya, M.Kom.".to_owned(),
      coordinator: Some("Dr. Ahmad Wijaya, M.Kom.".to_owned()),
      head_of_program: Some("Siti Rahmawati, M.T.".to_owned()),
      status: PlanStatus::Published,
      sessions: vec![
        session(1, TeachingMethod::Ceramah, None, 0.0),
        session(2, TeachingMethod::Praktikum, Some(AssessmentForm::Tugas), 10.0),
        session(4, TeachingMethod::Diskusi, Some(AssessmentForm::Kuis), 10.0),
        session(8, TeachingMethod::Ceramah, Some(AssessmentForm::Uts), 30.0),
        session(12, TeachingMethod::Project, Some(AssessmentForm::Project), 20.0),
        session(16, TeachingMethod::Ceramah, Some(AssessmentForm::Uas), 30.0),
      ],
    });
  }
  if let Some(drafted_on) = date(2024, 8, 12) {
    plans.push(LearningPlan {
      id: RecordId::new(),
      course_code: "INF201".to_owned(),
      version: 1,
      drafted_on,
      lecturer: "Siti Rahmawati, M.T.".to_owned(),
      coordinator: None,
      head_of_program: None,
      status: PlanStatus::Draft,
      sessions: vec![
        session(1, TeachingMethod::Ceramah, None, 0.0),
        session(8, TeachingMethod::StudiKasus, Some(AssessmentForm::Uts), 35.0),
      ],
    });
  }
  if let Some(drafted_on) = date(2024, 9, 2) {
    plans.push(LearningPlan {
      id: RecordId::new(),
      course_code: "INF301".to_owned(),
      version: 1,
      drafted_on,
      lecturer: "Rizky Pratama, M.Cs.".to_owned(),
      coordinator: Some("Dr. Ahmad Wijaya, M.Kom.".to_owned()),
      head_of_program: None,
      status: PlanStatus::AwaitingValidation,
      sessions: vec![session(1, TeachingMethod::ProblemBased, None, 0.0)],
    });
  }
  plans
}

fn scoreboard(ws: &Workspace) -> Scoreboard {
  let points = |names: Vec<(&str, &str)>, scores: &[f64]| -> Vec<ScorePoint> {
    names
      .into_iter()
      .zip(scores)
      .map(|((code, name), score)| ScorePoint::new(code, name, *score))
      .collect()
  };

  Scoreboard {
    profile_attainment: points(
      ws.profiles.iter().map(|p| (p.code.as_str(), p.title.as_str())).collect(),
      PROFILE_ATTAINMENT,
    ),
    area_averages:      points(
      ws.knowledge_areas.iter().map(|k| (k.code.as_str(), k.name.as_str())).collect(),
      AREA_AVERAGES,
    ),
    course_averages:    points(
      ws.courses.iter().map(|c| (c.code.as_str(), c.name.as_str())).collect(),
      COURSE_AVERAGES,
    ),
    results:            RESULTS
      .iter()
      .map(|&(nim, name, cohort, course, scores)| StudentResult {
        nim:         nim.to_owned(),
        name:        name.to_owned(),
        cohort,
        course_code: course.to_owned(),
        scores:      scores
          .iter()
          .enumerate()
          .map(|(i, s)| (format!("CPMK{}", i + 1), *s))
          .collect(),
      })
      .collect(),
    history:            HISTORY
      .iter()
      .flat_map(|(course, terms)| {
        terms.iter().enumerate().map(move |(i, &(below, total))| TermRecord {
          course_code: (*course).to_owned(),
          term: format!("Sem {}", i + 1),
          period: PERIODS[i].to_owned(),
          below,
          total,
        })
      })
      .collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{kkm::Kkm, report};

  #[test]
  fn seed_counts() {
    let ws = workspace();
    assert_eq!(ws.curricula.len(), 3);
    assert_eq!(ws.outcomes.len(), 8);
    assert_eq!(ws.knowledge_areas.len(), 8);
    assert_eq!(ws.courses.len(), 8);
    let stats = ws.stats();
    assert_eq!(stats.active_curricula, ["Kurikulum OBE 2024", "Kurikulum KKNI 2020"]);
    assert_eq!(stats.published_plans, 1);
    assert_eq!(stats.draft_plans, 2);
  }

  #[test]
  fn every_course_satisfies_form_rules() {
    let ws = workspace();
    for course in &ws.courses {
      assert!(course.knowledge_area.is_some(), "{}", course.code);
      assert!(course.outcomes.len() >= 2, "{}", course.code);
    }
  }

  #[test]
  fn seeded_matrices_match_mock_mappings() {
    let ws = workspace();
    let id = |code: &str| ws.outcomes.iter().find(|o| o.code == code).unwrap().id;
    let area = |code: &str| ws.knowledge_areas.iter().find(|k| k.code == code).unwrap().id;

    assert_eq!(ws.outcome_areas.row_count(&id("KK1")), 3);
    assert!(ws.outcome_areas.has(&id("S1"), &area("BK-07")));
    assert_eq!(ws.outcome_areas.col_count(&area("BK-07")), 2);
    assert_eq!(ws.outcome_profiles.row_count(&id("P2")), 3);
    // KK1 is listed on INF102, INF201, INF301, INF302 and INF401.
    assert_eq!(ws.outcome_courses.row_count(&id("KK1")), 5);
  }

  #[test]
  fn score_data_lines_up() {
    let ws = workspace();
    assert_eq!(ws.scores.profile_attainment.len(), 4);
    assert_eq!(ws.scores.course_averages[0].code, "INF101");
    assert_eq!(ws.scores.students().len(), 5);
    let below = ws.scores.below_threshold("INF102", Kkm::default());
    assert_eq!(below.total, 3);
    assert_eq!(below.below, 2);
    assert_eq!(ws.scores.history_for("INF101").count(), 6);
    assert_eq!(report::per_course(&ws)[0].course_outcomes, 4);
  }
}

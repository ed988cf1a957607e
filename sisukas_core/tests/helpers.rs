//! Shared test helpers for sisukas_core tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sisukas_core::{
    BlueprintRegistry, Course, MembershipSets, NumericRange, Period, course_registry,
};

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Autumn 2025 periods I and II.
pub fn periods() -> Arc<[Period]> {
    Arc::from(vec![
        Period::new("2025-I", "Period I", "2025-26", date(2025, 9, 1), date(2025, 10, 20)),
        Period::new("2025-II", "Period II", "2025-26", date(2025, 10, 27), date(2025, 12, 15)),
    ])
}

pub fn memberships() -> Arc<MembershipSets> {
    let sets = Arc::new(MembershipSets::new());
    sets.insert_set("major", "DSD24", ["CS-A1110", "CS-A1120", "CS-E4580"]);
    sets.insert_set("minor", "MAT", ["MS-A0111"]);
    sets
}

/// Route engine logs to the test output. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn registry(memberships: Arc<MembershipSets>) -> BlueprintRegistry<Course> {
    init_logging();
    course_registry(memberships, periods()).unwrap()
}

pub fn catalog() -> Vec<Course> {
    vec![
        Course::new("CS-A1110", "Programming 1")
            .with_organization("Department of Computer Science")
            .with_credits(NumericRange::point(5.0))
            .with_dates(date(2025, 9, 1), date(2025, 10, 17))
            .with_enrollment(date(2025, 8, 4), date(2025, 9, 5))
            .with_level("basic-studies")
            .with_format("teaching-participation-lectures")
            .with_languages(&["fi", "en"])
            .with_teachers(&["Milo Virtanen"])
            .with_tags(&["programming"]),
        Course::new("CS-A1120", "Programming 2")
            .with_organization("Department of Computer Science")
            .with_credits(NumericRange::new(3.0, 5.0))
            .with_dates(date(2025, 10, 27), date(2025, 12, 12))
            .with_enrollment(date(2025, 10, 1), date(2025, 10, 31))
            .with_level("basic-studies")
            .with_languages(&["fi"])
            .with_teachers(&["Anna Korhonen", "Milo Virtanen"]),
        Course::new("CS-E4580", "Programming Parallel Computers")
            .with_organization("Department of Computer Science")
            .with_credits(NumericRange::point(5.0))
            .with_dates(date(2025, 9, 2), date(2025, 12, 10))
            .with_enrollment(date(2025, 8, 15), date(2025, 9, 10))
            .with_level("advanced-studies")
            .with_languages(&["en"]),
        Course::new("MS-A0111", "Differential and Integral Calculus 1")
            .with_organization("Department of Mathematics and Systems Analysis")
            .with_credits(NumericRange::point(5.0))
            .with_dates(date(2025, 9, 1), date(2025, 10, 20))
            .with_enrollment(date(2025, 8, 4), date(2025, 9, 3))
            .with_level("basic-studies")
            .with_languages(&["fi", "sv"]),
        Course::new("LC-1310", "Academic Writing")
            .with_organization("Language Centre")
            .with_credits(NumericRange::point(2.0))
            .with_dates(date(2026, 1, 12), date(2026, 2, 20))
            .with_enrollment(date(2025, 12, 1), date(2026, 1, 9))
            .with_level("other-studies")
            .with_languages(&["en"]),
    ]
}

pub fn codes(courses: &[&Course]) -> Vec<String> {
    courses.iter().map(|c| c.code.clone()).collect()
}

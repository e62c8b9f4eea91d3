use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Course categories are a closed set, they partition the menu for
/// filtering and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum Course {
    Starter,
    MainCourse,
    Dessert,
}

impl Course {
    pub const ALL: [Course; 3] = [Course::Starter, Course::MainCourse, Course::Dessert];

    /// User-facing label, matches what the menu screens print.
    pub fn label(&self) -> &'static str {
        match self {
            Course::Starter => "Starter",
            Course::MainCourse => "Main Course",
            Course::Dessert => "Dessert",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Course {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "starter" => Ok(Course::Starter),
            "main" | "main course" | "maincourse" => Ok(Course::MainCourse),
            "dessert" => Ok(Course::Dessert),
            _ => Err("expect one of: starter, main, dessert"),
        }
    }
}

/// Listing filter: the whole menu or a single course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseFilter {
    All,
    Only(Course),
}

impl FromStr for CourseFilter {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CourseFilter::All);
        }
        s.parse().map(CourseFilter::Only)
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Dish {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub course: Course,
    /// Currency units, always > 0 once stored.
    pub price: f64,
    /// Path to the display asset, chosen by the presentation layer.
    pub image: String,
}

/// Per-course slice of the statistics.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CourseBreakdown {
    pub count: usize,
    /// None when the course has no dishes, there is no meaningful average.
    pub average_price: Option<f64>,
}

/// Aggregate view over the whole collection, recomputed on demand.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MenuStats {
    pub total: usize,
    pub total_value: f64,
    pub by_course: BTreeMap<Course, CourseBreakdown>,
}

impl MenuStats {
    pub fn count_for(&self, course: Course) -> usize {
        self.by_course.get(&course).map_or(0, |b| b.count)
    }

    pub fn average_price_for(&self, course: Course) -> Option<f64> {
        self.by_course.get(&course).and_then(|b| b.average_price)
    }
}

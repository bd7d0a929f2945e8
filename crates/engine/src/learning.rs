//! Read-only learning catalog: courses, live streams and articles.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub description: String,
    pub date: String,
    pub duration: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub title: String,
    pub description: String,
    pub starts: String,
    pub participants: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LearningCatalog {
    pub courses: Vec<Course>,
    pub streams: Vec<Stream>,
    pub articles: Vec<Article>,
}

/// Tabs of the learning screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LearningTab {
    #[default]
    Courses,
    Streams,
    Articles,
}

impl LearningTab {
    pub const ALL: [LearningTab; 3] = [Self::Courses, Self::Streams, Self::Articles];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Courses => "Курсы",
            Self::Streams => "Прямые эфиры",
            Self::Articles => "Статьи",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Courses => 0,
            Self::Streams => 1,
            Self::Articles => 2,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_wrap_both_ways() {
        assert_eq!(LearningTab::Articles.next(), LearningTab::Courses);
        assert_eq!(LearningTab::Courses.prev(), LearningTab::Articles);
        assert_eq!(LearningTab::Streams.next(), LearningTab::Articles);
    }
}

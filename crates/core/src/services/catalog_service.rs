use crate::models::lesson::{DifficultyFilter, Lesson, LessonStats};

/// Lessons whose title or description contains `query` (case-insensitive)
/// and whose difficulty passes `filter`. Source order is kept.
pub fn filter_lessons<'a>(
    lessons: &'a [Lesson],
    query: &str,
    filter: DifficultyFilter,
) -> Vec<&'a Lesson> {
    let q = query.to_lowercase();
    lessons
        .iter()
        .filter(|l| {
            l.title.to_lowercase().contains(&q) || l.description.to_lowercase().contains(&q)
        })
        .filter(|l| filter.matches(l.difficulty))
        .collect()
}

/// Completed / in-progress / not-started counts.
pub fn lesson_stats(lessons: &[Lesson]) -> LessonStats {
    LessonStats {
        completed: lessons.iter().filter(|l| l.completed).count(),
        in_progress: lessons.iter().filter(|l| l.is_in_progress()).count(),
        not_started: lessons.iter().filter(|l| l.is_not_started()).count(),
        total: lessons.len(),
    }
}

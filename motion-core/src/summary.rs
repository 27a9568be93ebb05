//! Aggregate views over a task list: workload summary and per-project counts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::task::{Priority, Task};

pub const NO_PROJECT: &str = "No Project";
const TOP_PROJECTS: usize = 5;

/// Per-priority counts in ASAP→LOW order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    counts: [usize; 4],
}

impl PriorityCounts {
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut out = Self::default();
        for t in tasks {
            if let Some(p) = t.priority {
                out.counts[p.ordinal() as usize] += 1;
            }
        }
        out
    }

    pub fn get(&self, priority: Priority) -> usize {
        self.counts[priority.ordinal() as usize]
    }

    /// Non-zero entries in ASAP→LOW order.
    pub fn non_zero(&self) -> Vec<(Priority, usize)> {
        Priority::ALL
            .into_iter()
            .map(|p| (p, self.get(p)))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct TaskSummary<'a> {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub scheduling_issues: usize,
    /// Created at or after `since` (local midnight).
    pub created_today: Vec<&'a Task>,
    /// ASAP and not completed.
    pub urgent: Vec<&'a Task>,
    pub priorities: PriorityCounts,
    /// Task count per project name, largest first, at most five.
    pub top_projects: Vec<(String, usize)>,
}

impl TaskSummary<'_> {
    /// Completed share in `[0, 1]`; zero for an empty list.
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn completion_percent(&self) -> u32 {
        (self.completion_rate() * 100.0).round() as u32
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        let mut out = Vec::new();
        if self.overdue > 0 {
            out.push(Recommendation::Overdue(self.overdue));
        }
        if self.urgent.len() > 3 {
            out.push(Recommendation::TooManyUrgent(self.urgent.len()));
        }
        if self.scheduling_issues > 0 {
            out.push(Recommendation::SchedulingIssues(self.scheduling_issues));
        }
        let rate = self.completion_rate();
        if rate > 0.8 {
            out.push(Recommendation::GreatProgress(self.completion_percent()));
        } else if rate < 0.3 {
            out.push(Recommendation::LowCompletion(self.completion_percent()));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Overdue(usize),
    TooManyUrgent(usize),
    SchedulingIssues(usize),
    GreatProgress(u32),
    LowCompletion(u32),
}

pub fn summarize_tasks(tasks: &[Task], now: DateTime<Utc>, since: DateTime<Utc>) -> TaskSummary<'_> {
    let completed = tasks.iter().filter(|t| t.completed).count();

    let mut per_project: HashMap<&str, usize> = HashMap::new();
    for t in tasks {
        *per_project.entry(t.project_name().unwrap_or(NO_PROJECT)).or_insert(0) += 1;
    }
    let mut top_projects: Vec<(String, usize)> = per_project
        .into_iter()
        .map(|(name, n)| (name.to_string(), n))
        .collect();
    // Name as tie-break keeps output stable across runs.
    top_projects.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_projects.truncate(TOP_PROJECTS);

    TaskSummary {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
        overdue: tasks.iter().filter(|t| t.is_overdue(now)).count(),
        scheduling_issues: tasks.iter().filter(|t| t.scheduling_issue).count(),
        created_today: tasks.iter().filter(|t| t.created_time >= since).collect(),
        urgent: tasks
            .iter()
            .filter(|t| t.priority == Some(Priority::Asap) && !t.completed)
            .collect(),
        priorities: PriorityCounts::tally(tasks),
        top_projects,
    }
}

/// Task counts for one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectTaskStats {
    pub total: usize,
    pub completed: usize,
    pub priorities: PriorityCounts,
}

impl ProjectTaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks.iter().filter(|t| t.completed).count(),
            priorities: PriorityCounts::tally(tasks),
        }
    }

    /// Rounded completion percentage; `None` for a project without tasks.
    pub fn completion_percent(&self) -> Option<u32> {
        if self.total == 0 {
            None
        } else {
            Some(((self.completed as f64 / self.total as f64) * 100.0).round() as u32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::Workspace;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 15, 0, 0).unwrap()
    }

    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap()
    }

    fn task(id: &str, p: Priority, created: DateTime<Utc>) -> Task {
        Task::new(id, id, Workspace::new("ws", "WS"), created).with_priority(p)
    }

    fn sample() -> Vec<Task> {
        let yesterday = now() - Duration::days(1);
        vec![
            task("a", Priority::Asap, now()).with_project("p1", "Launch"),
            task("b", Priority::Asap, yesterday)
                .with_project("p1", "Launch")
                .with_due(now() - Duration::hours(3)),
            task("c", Priority::Low, yesterday).completed(),
            task("d", Priority::High, midnight()).with_project("p2", "Ops"),
        ]
    }

    #[test]
    fn counts_and_breakdowns() {
        let tasks = sample();
        let s = summarize_tasks(&tasks, now(), midnight());
        assert_eq!(s.total, 4);
        assert_eq!(s.completed, 1);
        assert_eq!(s.pending, 3);
        assert_eq!(s.overdue, 1);
        assert_eq!(s.urgent.len(), 2);
        assert_eq!(s.created_today.len(), 2);
        assert_eq!(
            s.priorities.non_zero(),
            vec![(Priority::Asap, 2), (Priority::High, 1), (Priority::Low, 1)]
        );
        assert_eq!(
            s.top_projects,
            vec![
                ("Launch".to_string(), 2),
                (NO_PROJECT.to_string(), 1),
                ("Ops".to_string(), 1)
            ]
        );
    }

    #[test]
    fn recommendations_follow_thresholds() {
        let tasks = sample();
        let s = summarize_tasks(&tasks, now(), midnight());
        assert_eq!(
            s.recommendations(),
            vec![Recommendation::Overdue(1), Recommendation::LowCompletion(25)]
        );

        let done: Vec<Task> = (0..5)
            .map(|i| task(&format!("t{i}"), Priority::Medium, now()).completed())
            .collect();
        let s = summarize_tasks(&done, now(), midnight());
        assert_eq!(s.recommendations(), vec![Recommendation::GreatProgress(100)]);
    }

    #[test]
    fn project_stats_percentage() {
        let tasks = sample();
        let stats = ProjectTaskStats::from_tasks(&tasks);
        assert_eq!(stats.completion_percent(), Some(25));
        assert_eq!(ProjectTaskStats::from_tasks(&[]).completion_percent(), None);
        assert_eq!(stats.priorities.get(Priority::Asap), 2);
    }
}

//! Task statistics over an arbitrary view.

use crate::model::task::Task;
use serde::Serialize;

/// Completion counts; `pending == total - completed` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Counts tasks in `tasks`, typically the currently filtered view.
pub fn aggregate<'a, I>(tasks: I) -> TaskStats
where
    I: IntoIterator<Item = &'a Task>,
{
    let (total, completed) = tasks
        .into_iter()
        .fold((0, 0), |(total, completed), task| {
            (total + 1, completed + usize::from(task.completed))
        });
    TaskStats {
        total,
        completed,
        pending: total - completed,
    }
}

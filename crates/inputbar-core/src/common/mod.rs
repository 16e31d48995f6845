mod task;

pub use task::{TaskId, TaskKind, TaskSeq, TaskState, Tasks};

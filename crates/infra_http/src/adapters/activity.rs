use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{HistoryId, PortError, TaskId};
use domain_crm::{HistoryItem, HistoryPort, Parent, Task, TaskPort};

use super::CapsuleAdapter;
use crate::error::into_port_error;

#[async_trait]
impl TaskPort for CapsuleAdapter {
    #[instrument(skip(self))]
    async fn all_tasks(&self) -> Result<Vec<Task>, PortError> {
        self.list("/api/tasks", &[], "tasks", "task").await
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn find_task(&self, id: TaskId) -> Result<Task, PortError> {
        self.member(&format!("/api/task/{id}"), "task", "Task", id).await
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn complete_task(&self, id: TaskId) -> Result<(), PortError> {
        self.connection
            .post(&format!("/api/task/{id}/complete"), None)
            .await
            .map_err(|e| into_port_error(e, "Task", id))?;
        debug!("task completed");
        Ok(())
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn reopen_task(&self, id: TaskId) -> Result<(), PortError> {
        self.connection
            .post(&format!("/api/task/{id}/reopen"), None)
            .await
            .map_err(|e| into_port_error(e, "Task", id))?;
        debug!("task reopened");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn task_categories(&self) -> Result<Vec<String>, PortError> {
        self.list("/api/task/categories", &[], "taskCategories", "taskCategory")
            .await
    }
}

#[async_trait]
impl HistoryPort for CapsuleAdapter {
    #[instrument(skip(self), fields(parent = %parent))]
    async fn history_for(&self, parent: Parent) -> Result<Vec<HistoryItem>, PortError> {
        let body = self
            .raw(&parent.nested_path("history"), parent.segment(), parent.raw_id())
            .await?;
        Ok(core_kernel::payload::extract_collection(&body, "history", "historyItem")?)
    }

    #[instrument(skip(self), fields(history_id = %id))]
    async fn find_history(&self, id: HistoryId) -> Result<HistoryItem, PortError> {
        self.member(&format!("/api/history/{id}"), "historyItem", "History item", id)
            .await
    }
}

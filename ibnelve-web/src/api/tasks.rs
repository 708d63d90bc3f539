use shared::models::{
    CreateTask, Envelope, NoContent, Task, TaskFilter, TaskStatus, UpdateTask, UpdateTaskStatus,
};

use super::client::{ApiClient, with_include_deleted};

const TASKS_PATH: &str = "api/tarefa";

/// Client for `api/tarefa`.
#[derive(Clone, Debug)]
pub struct TaskClient {
    api: ApiClient,
}

impl TaskClient {
    /// Task client over a shared pipeline.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Retrieve every task of the current tenant.
    pub async fn list(&self, include_deleted: bool) -> Envelope<Vec<Task>> {
        self.api
            .get(&with_include_deleted(TASKS_PATH, include_deleted))
            .await
    }

    /// Retrieve tasks matching a filter.
    pub async fn list_filtered(&self, filter: &TaskFilter) -> Envelope<Vec<Task>> {
        self.api
            .get(&format!("{TASKS_PATH}/filtros?{}", filter.to_query_string()))
            .await
    }

    pub async fn get_by_id(&self, id: i32) -> Envelope<Task> {
        self.api.get(&format!("{TASKS_PATH}/{id}")).await
    }

    /// Free-text search over title, description and category.
    pub async fn search(&self, term: &str, include_deleted: bool) -> Envelope<Vec<Task>> {
        self.api
            .get(&format!(
                "{TASKS_PATH}/search?searchTerm={}&includeDeleted={include_deleted}",
                urlencoding::encode(term)
            ))
            .await
    }

    /// Retrieve tasks in one state. The state travels as its integer code.
    pub async fn list_by_status(
        &self,
        status: TaskStatus,
        include_deleted: bool,
    ) -> Envelope<Vec<Task>> {
        let path = format!("{TASKS_PATH}/status/{}", status.code());
        self.api
            .get(&with_include_deleted(&path, include_deleted))
            .await
    }

    /// Retrieve tasks past their deadline.
    pub async fn list_overdue(&self, include_deleted: bool) -> Envelope<Vec<Task>> {
        let path = format!("{TASKS_PATH}/vencidas");
        self.api
            .get(&with_include_deleted(&path, include_deleted))
            .await
    }

    /// Retrieve finished tasks.
    pub async fn list_done(&self, include_deleted: bool) -> Envelope<Vec<Task>> {
        let path = format!("{TASKS_PATH}/concluidas");
        self.api
            .get(&with_include_deleted(&path, include_deleted))
            .await
    }

    pub async fn create(&self, task: &CreateTask) -> Envelope<Task> {
        self.api.post(TASKS_PATH, task).await
    }

    /// Replace every editable field of a task.
    pub async fn update(&self, id: i32, task: &UpdateTask) -> Envelope<Task> {
        self.api.put(&format!("{TASKS_PATH}/{id}"), task).await
    }

    /// Move a task to another state.
    pub async fn update_status(&self, id: i32, status: TaskStatus) -> Envelope<Task> {
        self.api
            .patch(
                &format!("{TASKS_PATH}/{id}/status"),
                &UpdateTaskStatus { status },
            )
            .await
    }

    pub async fn mark_done(&self, id: i32) -> Envelope<Task> {
        self.api
            .patch_empty(&format!("{TASKS_PATH}/{id}/concluir"))
            .await
    }

    pub async fn mark_pending(&self, id: i32) -> Envelope<Task> {
        self.api
            .patch_empty(&format!("{TASKS_PATH}/{id}/pendente"))
            .await
    }

    pub async fn delete(&self, id: i32) -> Envelope<NoContent> {
        self.api.delete(&format!("{TASKS_PATH}/{id}")).await
    }
}

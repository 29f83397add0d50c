//! Read-through cache in front of the workspace backend.
//!
//! Entries are addressed by a [`QueryKey`], a path of segments such as
//! `["projects", "<id>"]`. Mutations drop whole subtrees by prefix, so a task
//! update evicts every cached task list regardless of the project filter it
//! was fetched with.

use crate::domain::session::Bearer;
use crate::domain::workspace::{
    Project, ProjectChanges, ProjectDraft, Tag, TagDraft, Task, TaskChanges, TaskDraft,
    WorkspaceApi,
};
use crate::outbound::rest::error::Error as BackendError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

const PROJECTS: &str = "projects";
const TASKS: &str = "tasks";
const TAGS: &str = "tags";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct QueryCache<V> {
    entries: RwLock<HashMap<QueryKey, Entry<V>>>,
    stale_after: Duration,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stale_after,
        }
    }

    /// Returns the cached value when it is still fresh, otherwise runs
    /// `fetch` and stores its result. Errors are handed back uncached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: QueryKey, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(entry) = self.entries.read().await.get(&key)
            && entry.fetched_at.elapsed() < self.stale_after
        {
            tracing::trace!(%key, "cache hit");
            return Ok(entry.value.clone());
        }

        tracing::trace!(%key, "cache miss");
        let value = fetch().await?;
        self.entries.write().await.insert(
            key,
            Entry {
                value: value.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(value)
    }

    pub async fn invalidate(&self, prefix: &QueryKey) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        tracing::trace!(%prefix, evicted = before - entries.len(), "cache invalidated");
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// [`WorkspaceApi`] decorator that serves reads from a [`QueryCache`].
pub struct CachedWorkspaceApi<A> {
    inner: A,
    projects: QueryCache<Vec<Project>>,
    project: QueryCache<Project>,
    tasks: QueryCache<Vec<Task>>,
    task: QueryCache<Task>,
    tags: QueryCache<Vec<Tag>>,
}

impl<A> CachedWorkspaceApi<A>
where
    A: WorkspaceApi,
{
    pub fn new(inner: A, stale_after: Duration) -> Self {
        Self {
            inner,
            projects: QueryCache::new(stale_after),
            project: QueryCache::new(stale_after),
            tasks: QueryCache::new(stale_after),
            task: QueryCache::new(stale_after),
            tags: QueryCache::new(stale_after),
        }
    }

    pub async fn invalidate(&self, prefix: &QueryKey) {
        self.projects.invalidate(prefix).await;
        self.project.invalidate(prefix).await;
        self.tasks.invalidate(prefix).await;
        self.task.invalidate(prefix).await;
        self.tags.invalidate(prefix).await;
    }

    async fn invalidate_all(&self, roots: &[&str]) {
        for root in roots {
            self.invalidate(&QueryKey::new([*root])).await;
        }
    }
}

fn task_list_key(project_id: Option<Uuid>) -> QueryKey {
    let filter = project_id.map_or_else(|| "all".to_string(), |id| id.to_string());

    QueryKey::new([TASKS, "list", filter.as_str()])
}

#[async_trait]
impl<A> WorkspaceApi for CachedWorkspaceApi<A>
where
    A: WorkspaceApi,
{
    async fn list_projects(&self, bearer: Bearer) -> Result<Vec<Project>, BackendError> {
        self.projects
            .get_or_fetch(QueryKey::new([PROJECTS]), || {
                self.inner.list_projects(bearer)
            })
            .await
    }

    async fn find_project(
        &self,
        bearer: Bearer,
        project_id: Uuid,
    ) -> Result<Project, BackendError> {
        let key = QueryKey::new([PROJECTS.to_string(), project_id.to_string()]);
        self.project
            .get_or_fetch(key, || self.inner.find_project(bearer, project_id))
            .await
    }

    async fn create_project(
        &self,
        bearer: Bearer,
        params: ProjectDraft,
    ) -> Result<Project, BackendError> {
        let project = self.inner.create_project(bearer, params).await?;
        self.invalidate_all(&[PROJECTS]).await;

        Ok(project)
    }

    async fn update_project(
        &self,
        bearer: Bearer,
        project_id: Uuid,
        params: ProjectChanges,
    ) -> Result<Project, BackendError> {
        let project = self.inner.update_project(bearer, project_id, params).await?;
        self.invalidate_all(&[PROJECTS]).await;

        Ok(project)
    }

    async fn delete_project(&self, bearer: Bearer, project_id: Uuid) -> Result<(), BackendError> {
        self.inner.delete_project(bearer, project_id).await?;
        self.invalidate_all(&[PROJECTS, TASKS, TAGS]).await;

        Ok(())
    }

    async fn list_tasks(
        &self,
        bearer: Bearer,
        project_id: Option<Uuid>,
    ) -> Result<Vec<Task>, BackendError> {
        self.tasks
            .get_or_fetch(task_list_key(project_id), || {
                self.inner.list_tasks(bearer, project_id)
            })
            .await
    }

    async fn find_task(&self, bearer: Bearer, task_id: Uuid) -> Result<Task, BackendError> {
        let key = QueryKey::new([TASKS.to_string(), task_id.to_string()]);
        self.task
            .get_or_fetch(key, || self.inner.find_task(bearer, task_id))
            .await
    }

    async fn create_task(&self, bearer: Bearer, params: TaskDraft) -> Result<Task, BackendError> {
        let task = self.inner.create_task(bearer, params).await?;
        // projects embed their tasks
        self.invalidate_all(&[TASKS, PROJECTS]).await;

        Ok(task)
    }

    async fn update_task(
        &self,
        bearer: Bearer,
        task_id: Uuid,
        params: TaskChanges,
    ) -> Result<Task, BackendError> {
        let task = self.inner.update_task(bearer, task_id, params).await?;
        self.invalidate_all(&[TASKS, PROJECTS]).await;

        Ok(task)
    }

    async fn delete_task(&self, bearer: Bearer, task_id: Uuid) -> Result<(), BackendError> {
        self.inner.delete_task(bearer, task_id).await?;
        self.invalidate_all(&[TASKS, PROJECTS]).await;

        Ok(())
    }

    async fn list_tags(&self, bearer: Bearer, project_id: Uuid) -> Result<Vec<Tag>, BackendError> {
        let key = QueryKey::new([TAGS.to_string(), project_id.to_string()]);
        self.tags
            .get_or_fetch(key, || self.inner.list_tags(bearer, project_id))
            .await
    }

    async fn create_tag(
        &self,
        bearer: Bearer,
        project_id: Uuid,
        params: TagDraft,
    ) -> Result<Tag, BackendError> {
        let tag = self.inner.create_tag(bearer, project_id, params).await?;
        self.invalidate_all(&[TAGS, PROJECTS]).await;

        Ok(tag)
    }

    async fn delete_tag(&self, bearer: Bearer, tag_id: Uuid) -> Result<(), BackendError> {
        self.inner.delete_tag(bearer, tag_id).await?;
        self.invalidate_all(&[TAGS, TASKS, PROJECTS]).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workspace::{MockWorkspaceApi, ProjectStatus, TaskStatus};
    use std::future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const STALE_AFTER: Duration = Duration::from_secs(30);

    fn project() -> Project {
        Project {
            id: Uuid::nil(),
            name: "Website".to_string(),
            description: None,
            start_date: None,
            end_date: None,
            status: ProjectStatus::Ongoing,
            members: vec![],
            tasks: vec![],
            tags: vec![],
        }
    }

    fn task() -> Task {
        Task {
            id: Uuid::nil(),
            title: "Deploy".to_string(),
            description: None,
            status: TaskStatus::Done,
            priority: Default::default(),
            due_date: None,
            project_id: Some(Uuid::nil()),
            assignee: None,
            tags: vec![],
        }
    }

    fn bearer() -> Bearer {
        Bearer::new("access")
    }

    #[test]
    fn test_query_key_prefix() {
        let key = QueryKey::new(["tasks", "list", "all"]);

        assert!(key.starts_with(&QueryKey::new(["tasks"])));
        assert!(key.starts_with(&QueryKey::new(["tasks", "list"])));
        assert!(!key.starts_with(&QueryKey::new(["projects"])));
        assert_eq!("[tasks, list, all]", key.to_string());
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_or_fetch_serves_fresh_entries() {
        let cache = QueryCache::new(STALE_AFTER);
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let fetch = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(42)
        };

        assert_eq!(Ok(42), cache.get_or_fetch(QueryKey::new(["a"]), fetch).await);
        assert_eq!(Ok(42), cache.get_or_fetch(QueryKey::new(["a"]), fetch).await);
        assert_eq!(1, calls.load(Ordering::SeqCst));

        tokio::time::advance(STALE_AFTER).await;

        assert_eq!(Ok(42), cache.get_or_fetch(QueryKey::new(["a"]), fetch).await);
        assert_eq!(2, calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_get_or_fetch_does_not_cache_errors() {
        let cache: QueryCache<u32> = QueryCache::new(STALE_AFTER);

        let result = cache
            .get_or_fetch(QueryKey::new(["a"]), || async { Err("offline") })
            .await;

        assert_eq!(Err("offline"), result);
        assert_eq!(0, cache.len().await);
    }

    #[tokio::test]
    async fn test_invalidate_prefix() {
        let cache = QueryCache::new(STALE_AFTER);
        for key in [
            QueryKey::new(["tasks", "list", "all"]),
            QueryKey::new(["tasks", "1"]),
            QueryKey::new(["projects"]),
        ] {
            cache
                .get_or_fetch(key, || async { Ok::<_, ()>(1) })
                .await
                .unwrap();
        }

        cache.invalidate(&QueryKey::new(["tasks"])).await;

        assert_eq!(1, cache.len().await);
    }

    #[tokio::test]
    async fn test_reads_are_cached() {
        let mut inner = MockWorkspaceApi::new();
        inner
            .expect_list_projects()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(vec![project()]))));

        let api = CachedWorkspaceApi::new(inner, STALE_AFTER);

        assert_eq!(1, api.list_projects(bearer()).await.unwrap().len());
        assert_eq!(1, api.list_projects(bearer()).await.unwrap().len());
    }

    #[tokio::test]
    async fn test_task_mutation_invalidates_tasks_and_projects() {
        let mut inner = MockWorkspaceApi::new();
        inner
            .expect_list_tasks()
            .times(2)
            .returning(|_, _| Box::pin(future::ready(Ok(vec![task()]))));
        inner
            .expect_find_project()
            .times(2)
            .returning(|_, _| Box::pin(future::ready(Ok(project()))));
        inner
            .expect_list_tags()
            .times(1)
            .returning(|_, _| Box::pin(future::ready(Ok(vec![]))));
        inner
            .expect_update_task()
            .times(1)
            .returning(|_, _, _| Box::pin(future::ready(Ok(task()))));

        let api = CachedWorkspaceApi::new(inner, STALE_AFTER);
        let project_id = Uuid::nil();

        api.list_tasks(bearer(), Some(project_id)).await.unwrap();
        api.find_project(bearer(), project_id).await.unwrap();
        api.list_tags(bearer(), project_id).await.unwrap();

        api.update_task(bearer(), Uuid::nil(), TaskChanges::status(TaskStatus::Done))
            .await
            .unwrap();

        api.list_tasks(bearer(), Some(project_id)).await.unwrap();
        api.find_project(bearer(), project_id).await.unwrap();
        // tags survive a task update
        api.list_tags(bearer(), project_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() {
        let mut inner = MockWorkspaceApi::new();
        inner
            .expect_list_projects()
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(vec![project()]))));
        inner
            .expect_delete_project()
            .times(1)
            .returning(|_, _| Box::pin(future::ready(Err(BackendError::Forbidden))));

        let api = CachedWorkspaceApi::new(inner, STALE_AFTER);

        api.list_projects(bearer()).await.unwrap();
        assert!(api.delete_project(bearer(), Uuid::nil()).await.is_err());
        api.list_projects(bearer()).await.unwrap();
    }
}

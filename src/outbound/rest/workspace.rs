use crate::domain::session::Bearer;
use crate::domain::workspace::{
    Project, ProjectChanges, ProjectDraft, Tag, TagDraft, Task, TaskChanges, TaskDraft,
    WorkspaceApi,
};
use crate::outbound::rest::client::RestClient;
use crate::outbound::rest::error::Error;
use crate::outbound::rest::models::{
    ProjectBody, ProjectRequest, TagBody, TagRequest, TaskBody, TaskRequest,
};
use async_trait::async_trait;
use http::Method;
use uuid::Uuid;

#[async_trait]
impl WorkspaceApi for RestClient {
    async fn list_projects(&self, bearer: Bearer) -> Result<Vec<Project>, Error> {
        let request = self.request(Method::GET, "projects", Some(&bearer))?;
        let body: Vec<ProjectBody> = self.fetch(request).await?;

        Ok(body.into_iter().map(Into::into).collect())
    }

    async fn find_project(&self, bearer: Bearer, project_id: Uuid) -> Result<Project, Error> {
        let path = format!("projects/{project_id}");
        let request = self.request(Method::GET, &path, Some(&bearer))?;
        let body: ProjectBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn create_project(&self, bearer: Bearer, params: ProjectDraft) -> Result<Project, Error> {
        let request = self
            .request(Method::POST, "projects", Some(&bearer))?
            .json(&ProjectRequest::from(params));
        let body: ProjectBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn update_project(
        &self,
        bearer: Bearer,
        project_id: Uuid,
        params: ProjectChanges,
    ) -> Result<Project, Error> {
        let path = format!("projects/{project_id}");
        let request = self
            .request(Method::PUT, &path, Some(&bearer))?
            .json(&ProjectRequest::from(params));
        let body: ProjectBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn delete_project(&self, bearer: Bearer, project_id: Uuid) -> Result<(), Error> {
        let path = format!("projects/{project_id}");
        let request = self.request(Method::DELETE, &path, Some(&bearer))?;

        self.execute(request).await
    }

    async fn list_tasks(
        &self,
        bearer: Bearer,
        project_id: Option<Uuid>,
    ) -> Result<Vec<Task>, Error> {
        let mut request = self.request(Method::GET, "tasks", Some(&bearer))?;
        if let Some(project_id) = project_id {
            request = request.query(&[("projectId", project_id.to_string())]);
        }
        let body: Vec<TaskBody> = self.fetch(request).await?;

        Ok(body.into_iter().map(Into::into).collect())
    }

    async fn find_task(&self, bearer: Bearer, task_id: Uuid) -> Result<Task, Error> {
        let path = format!("tasks/{task_id}");
        let request = self.request(Method::GET, &path, Some(&bearer))?;
        let body: TaskBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn create_task(&self, bearer: Bearer, params: TaskDraft) -> Result<Task, Error> {
        let request = self
            .request(Method::POST, "tasks", Some(&bearer))?
            .json(&TaskRequest::from(params));
        let body: TaskBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn update_task(
        &self,
        bearer: Bearer,
        task_id: Uuid,
        params: TaskChanges,
    ) -> Result<Task, Error> {
        let path = format!("tasks/{task_id}");
        let request = self
            .request(Method::PUT, &path, Some(&bearer))?
            .json(&TaskRequest::from(params));
        let body: TaskBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn delete_task(&self, bearer: Bearer, task_id: Uuid) -> Result<(), Error> {
        let path = format!("tasks/{task_id}");
        let request = self.request(Method::DELETE, &path, Some(&bearer))?;

        self.execute(request).await
    }

    async fn list_tags(&self, bearer: Bearer, project_id: Uuid) -> Result<Vec<Tag>, Error> {
        let path = format!("projects/{project_id}/tags");
        let request = self.request(Method::GET, &path, Some(&bearer))?;
        let body: Vec<TagBody> = self.fetch(request).await?;

        Ok(body.into_iter().map(Into::into).collect())
    }

    async fn create_tag(
        &self,
        bearer: Bearer,
        project_id: Uuid,
        params: TagDraft,
    ) -> Result<Tag, Error> {
        let path = format!("projects/{project_id}/tags");
        let request = self
            .request(Method::POST, &path, Some(&bearer))?
            .json(&TagRequest::from(params));
        let mut tag: Tag = self.fetch::<TagBody>(request).await?.into();
        tag.project_id.get_or_insert(project_id);

        Ok(tag)
    }

    async fn delete_tag(&self, bearer: Bearer, tag_id: Uuid) -> Result<(), Error> {
        let path = format!("tags/{tag_id}");
        let request = self.request(Method::DELETE, &path, Some(&bearer))?;

        self.execute(request).await
    }
}

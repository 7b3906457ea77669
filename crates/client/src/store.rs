//! In-memory project store mirroring server state.
//!
//! Mutations apply optimistically, then issue the REST call; a failed call
//! restores the pre-mutation snapshot and returns the error, so the mirror
//! and the server cannot silently diverge.

use draftdeck_core::types::DbId;

use crate::client::{ApiClient, Comment, NewProject, Project, RefineOutcome};
use crate::error::ClientError;
use crate::ops;

/// Client-side cache of the caller's projects.
pub struct ProjectStore {
    client: ApiClient,
    projects: Vec<Project>,
}

impl ProjectStore {
    /// Wrap an (authenticated) API client with an empty mirror.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            projects: Vec::new(),
        }
    }

    /// The mirrored projects, in server order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Replace the mirror with the server's state.
    pub async fn load_projects(&mut self) -> Result<(), ClientError> {
        self.projects = self.client.get_projects().await?;
        Ok(())
    }

    /// Create a project and append the server's version to the mirror.
    ///
    /// Creation is not optimistic: the server assigns ids and may seed
    /// sections, so there is nothing useful to show before it responds.
    pub async fn add_project(&mut self, payload: NewProject) -> Result<&Project, ClientError> {
        let created = self.client.create_project(&payload).await?;
        self.projects.insert(0, created);
        Ok(&self.projects[0])
    }

    /// Optimistically drop a project, rolling back if the delete fails.
    pub async fn delete_project(&mut self, project_id: DbId) -> Result<(), ClientError> {
        let snapshot = self.projects.clone();
        ops::remove_project(&mut self.projects, project_id);

        if let Err(err) = self.client.delete_project(project_id).await {
            tracing::warn!(error = %err, project_id, "delete_project failed, rolling back");
            self.projects = snapshot;
            return Err(err);
        }
        Ok(())
    }

    /// Optimistically update a section's title/content, then save. On
    /// success the mirrored section is replaced with the server's copy; on
    /// failure the mirror rolls back.
    pub async fn update_section(
        &mut self,
        project_id: DbId,
        section_id: DbId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<(), ClientError> {
        let snapshot = self.projects.clone();
        ops::apply_section_update(&mut self.projects, project_id, section_id, title, content);

        match self
            .client
            .save_section(project_id, section_id, title, content)
            .await
        {
            Ok(saved) => {
                ops::replace_section(&mut self.projects, saved);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, section_id, "update_section failed, rolling back");
                self.projects = snapshot;
                Err(err)
            }
        }
    }

    /// Refine a section server-side (appends a revision there) and mirror
    /// the revised content locally.
    pub async fn add_revision(
        &mut self,
        project_id: DbId,
        section_id: DbId,
        prompt: &str,
    ) -> Result<RefineOutcome, ClientError> {
        let outcome = self
            .client
            .refine_section(project_id, section_id, prompt)
            .await?;
        ops::apply_section_update(
            &mut self.projects,
            project_id,
            section_id,
            None,
            Some(&outcome.text),
        );
        Ok(outcome)
    }

    /// Add a comment to a section. Comments are server-assigned; nothing is
    /// mirrored until the call succeeds.
    pub async fn add_comment(
        &mut self,
        project_id: DbId,
        section_id: DbId,
        text: &str,
    ) -> Result<Comment, ClientError> {
        self.client.add_comment(project_id, section_id, text).await
    }

    /// Optimistically reorder a project's sections, rolling back if the
    /// server rejects the new order.
    pub async fn reorder_sections(
        &mut self,
        project_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<(), ClientError> {
        let snapshot = self.projects.clone();
        ops::apply_reorder(&mut self.projects, project_id, ordered_ids);

        match self.client.reorder_sections(project_id, ordered_ids).await {
            Ok(sections) => {
                if let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) {
                    project.sections = sections;
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, project_id, "reorder failed, rolling back");
                self.projects = snapshot;
                Err(err)
            }
        }
    }
}

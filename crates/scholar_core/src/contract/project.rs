//! Graduation project contract.

use crate::collection::Collection;
use crate::config::Config;
use crate::entities::Project;
use crate::error::CoreResult;
use scholar_storage::{invoke, StateAccessor};

/// Project operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectContract {
    projects: Collection<Project>,
}

impl ProjectContract {
    /// Creates the contract.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            projects: Collection::new(config),
        }
    }

    /// The underlying collection.
    #[must_use]
    pub const fn collection(&self) -> Collection<Project> {
        self.projects
    }

    /// Deposits a new project.
    ///
    /// Partners are given in slot order; unused slots are empty strings.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyExists` if `id` is taken.
    pub fn create_project<S>(
        &self,
        state: &mut S,
        id: &str,
        student_id: &str,
        title: &str,
        advisor: &str,
        course: &str,
        project_type: &str,
        depose_date: &str,
        repo_hash: &str,
        url_path: &str,
        partners: [&str; 6],
        grade: i64,
        description: &str,
    ) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let project = build(
            id, student_id, title, advisor, course, project_type, depose_date, repo_hash, url_path,
            partners, grade, description,
        );
        invoke(state, |inv| self.projects.create(inv, &project))
    }

    /// Returns the project stored under `id`.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn read_project<S>(&self, state: &S, id: &str) -> CoreResult<Project>
    where
        S: StateAccessor + ?Sized,
    {
        self.projects.read(state, id)
    }

    /// Overwrites every field of an existing project.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn update_project<S>(
        &self,
        state: &mut S,
        id: &str,
        student_id: &str,
        title: &str,
        advisor: &str,
        course: &str,
        project_type: &str,
        depose_date: &str,
        repo_hash: &str,
        url_path: &str,
        partners: [&str; 6],
        grade: i64,
        description: &str,
    ) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let project = build(
            id, student_id, title, advisor, course, project_type, depose_date, repo_hash, url_path,
            partners, grade, description,
        );
        invoke(state, |inv| self.projects.update(inv, &project))
    }

    /// Removes a project.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn delete_project<S>(&self, state: &mut S, id: &str) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        invoke(state, |inv| self.projects.delete(inv, id))
    }

    /// Returns true if a project with `id` exists.
    ///
    /// # Errors
    ///
    /// Fails if the world state cannot be read.
    pub fn project_exists<S>(&self, state: &S, id: &str) -> CoreResult<bool>
    where
        S: StateAccessor + ?Sized,
    {
        self.projects.exists(state, id)
    }

    /// Returns every project in ID order.
    ///
    /// # Errors
    ///
    /// Fails if the scan fails or a stored value is not a project.
    pub fn get_all_projects<S>(&self, state: &S) -> CoreResult<Vec<Project>>
    where
        S: StateAccessor + ?Sized,
    {
        self.projects.list(state)
    }
}

fn build(
    id: &str,
    student_id: &str,
    title: &str,
    advisor: &str,
    course: &str,
    project_type: &str,
    depose_date: &str,
    repo_hash: &str,
    url_path: &str,
    partners: [&str; 6],
    grade: i64,
    description: &str,
) -> Project {
    let [p1, p2, p3, p4, p5, p6] = partners.map(str::to_string);
    Project {
        student_id: student_id.to_string(),
        id: id.to_string(),
        title: title.to_string(),
        advisor: advisor.to_string(),
        course: course.to_string(),
        project_type: project_type.to_string(),
        depose_date: depose_date.to_string(),
        repo_hash: repo_hash.to_string(),
        url_path: url_path.to_string(),
        partner1: p1,
        partner2: p2,
        partner3: p3,
        partner4: p4,
        partner5: p5,
        partner6: p6,
        grade,
        description: description.to_string(),
    }
}

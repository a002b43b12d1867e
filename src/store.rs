//! JSON snapshot persistence for projects.
//!
//! State lives under `<root>/.pacer/projects.json`. Writes are atomic
//! (temp file + rename). This layer is deliberately thin: all scheduling
//! math lives in the pure core, and the store's only protocol role is
//! answering the sequencer's move requests with success or failure.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::project::Project;
use crate::sequencer::{MoveBackend, MoveDirection};
use crate::task::TaskId;

/// Name of the state directory
pub const DATA_DIR: &str = ".pacer";
const PROJECTS_FILE: &str = "projects.json";
const PROJECTS_SCHEMA_VERSION: &str = "pacer.projects.v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsSnapshot {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub projects: Vec<Project>,
}

impl ProjectsSnapshot {
    pub fn empty() -> Self {
        Self {
            schema_version: PROJECTS_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            projects: Vec::new(),
        }
    }
}

/// Storage manager for project state
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    pub fn projects_file(&self) -> PathBuf {
        self.data_dir().join(PROJECTS_FILE)
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(self.data_dir())?;
        Ok(())
    }

    /// Load the snapshot, treating a missing file as an empty store.
    pub fn load(&self) -> Result<ProjectsSnapshot> {
        let path = self.projects_file();
        if !path.exists() {
            return Ok(ProjectsSnapshot::empty());
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, snapshot: &ProjectsSnapshot) -> Result<()> {
        self.ensure_dirs()?;
        let json = serde_json::to_string_pretty(snapshot)?;
        self.write_atomic(&self.projects_file(), json.as_bytes())
    }

    /// Write data atomically using temp file + rename
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Persist a new project. The name must be non-empty and unique; this
    /// is the creation-boundary validation, kept out of the core math.
    pub fn create(&self, project: Project) -> Result<()> {
        if project.name.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "project name cannot be empty".to_string(),
            ));
        }
        let mut snapshot = self.load()?;
        if snapshot.projects.iter().any(|p| p.name == project.name) {
            return Err(Error::ProjectExists(project.name));
        }
        debug!(name = %project.name, tasks = project.tasks.len(), "creating project");
        snapshot.projects.push(project);
        snapshot.generated_at = Utc::now();
        self.save(&snapshot)
    }

    pub fn list(&self) -> Result<Vec<Project>> {
        Ok(self.load()?.projects)
    }

    pub fn get(&self, name: &str) -> Result<Project> {
        self.load()?
            .projects
            .into_iter()
            .find(|project| project.name == name)
            .ok_or_else(|| Error::ProjectNotFound(name.to_string()))
    }

    /// Load, mutate, and atomically re-save one project.
    pub fn update<F>(&self, name: &str, mutate: F) -> Result<Project>
    where
        F: FnOnce(&mut Project) -> Result<()>,
    {
        let mut snapshot = self.load()?;
        let project = snapshot
            .projects
            .iter_mut()
            .find(|project| project.name == name)
            .ok_or_else(|| Error::ProjectNotFound(name.to_string()))?;
        mutate(project)?;
        let updated = project.clone();
        snapshot.generated_at = Utc::now();
        self.save(&snapshot)?;
        Ok(updated)
    }

    pub fn complete_task(&self, name: &str, task_id: TaskId, at: DateTime<Utc>) -> Result<Project> {
        self.update(name, |project| {
            let task = project
                .task_mut(task_id)
                .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
            task.mark_completed(at);
            Ok(())
        })
    }

    /// Apply an adjacent swap server-side. A task already at the boundary
    /// is a rejection here, not a no-op: the sequencer never issues a
    /// request for a local boundary, so reaching this means the client
    /// order has diverged from stored truth.
    pub fn move_task(&self, name: &str, task_id: TaskId, direction: MoveDirection) -> Result<()> {
        self.update(name, |project| {
            let position = project
                .position(task_id)
                .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
            let neighbor = match direction {
                MoveDirection::Up => position.checked_sub(1),
                MoveDirection::Down => {
                    let below = position + 1;
                    (below < project.tasks.len()).then_some(below)
                }
            };
            let Some(neighbor) = neighbor else {
                return Err(Error::MoveRejected {
                    task_id,
                    reason: format!("task has no neighbor {}", direction.as_str()),
                });
            };
            project.swap(position, neighbor);
            Ok(())
        })?;
        Ok(())
    }
}

/// Store-backed confirmation for the reorder protocol, bound to one
/// project.
pub struct StoreMoveBackend {
    store: ProjectStore,
    project: String,
}

impl StoreMoveBackend {
    pub fn new(store: ProjectStore, project: impl Into<String>) -> Self {
        Self {
            store,
            project: project.into(),
        }
    }
}

#[async_trait]
impl MoveBackend for StoreMoveBackend {
    async fn persist_move(&mut self, task_id: TaskId, direction: MoveDirection) -> Result<()> {
        self.store.move_task(&self.project, task_id, direction)
    }
}

#[cfg(test)]
mod tests {
    use crate::task::Task;

    use super::*;

    fn store() -> (tempfile::TempDir, ProjectStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::new(dir.path());
        (dir, store)
    }

    fn sample_project(name: &str) -> Project {
        Project::new(name, None).with_tasks(vec![
            Task::new("first", 1),
            Task::new("second", 2),
            Task::new("third", 3),
        ])
    }

    #[test]
    fn missing_file_loads_as_empty_store() {
        let (_dir, store) = store();
        let snapshot = store.load().expect("load");
        assert!(snapshot.projects.is_empty());
        assert_eq!(snapshot.schema_version, PROJECTS_SCHEMA_VERSION);
    }

    #[test]
    fn create_and_get_round_trip() {
        let (_dir, store) = store();
        store.create(sample_project("alpha")).expect("create");

        let loaded = store.get("alpha").expect("get");
        assert_eq!(loaded.tasks.len(), 3);
        assert_eq!(loaded.tasks[1].title, "second");
        assert!(store.projects_file().exists());
        assert!(!store.projects_file().with_extension("tmp").exists());
    }

    #[test]
    fn blank_project_name_is_rejected() {
        let (_dir, store) = store();
        let err = store.create(Project::new("   ", None)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn duplicate_project_name_is_rejected() {
        let (_dir, store) = store();
        store.create(sample_project("alpha")).expect("create");
        let err = store.create(sample_project("alpha")).unwrap_err();
        assert!(matches!(err, Error::ProjectExists(_)));
    }

    #[test]
    fn complete_task_persists_timestamp() {
        let (_dir, store) = store();
        let project = sample_project("alpha");
        let task_id = project.tasks[0].id;
        store.create(project).expect("create");

        let at = Utc::now();
        let updated = store.complete_task("alpha", task_id, at).expect("complete");
        assert_eq!(updated.task(task_id).and_then(|t| t.completed_at), Some(at));

        let reloaded = store.get("alpha").expect("get");
        assert!(reloaded.task(task_id).map(|t| t.is_complete()).unwrap_or(false));
    }

    #[test]
    fn move_task_persists_adjacent_swap() {
        let (_dir, store) = store();
        let project = sample_project("alpha");
        let second = project.tasks[1].id;
        store.create(project).expect("create");

        store
            .move_task("alpha", second, MoveDirection::Up)
            .expect("move");
        let reloaded = store.get("alpha").expect("get");
        assert_eq!(reloaded.tasks[0].id, second);
    }

    #[test]
    fn boundary_move_is_rejected_as_divergence() {
        let (_dir, store) = store();
        let project = sample_project("alpha");
        let first = project.tasks[0].id;
        store.create(project).expect("create");

        let err = store
            .move_task("alpha", first, MoveDirection::Up)
            .unwrap_err();
        assert!(matches!(err, Error::MoveRejected { .. }));
    }

    #[test]
    fn unknown_task_move_is_a_not_found_error() {
        let (_dir, store) = store();
        store.create(sample_project("alpha")).expect("create");
        let err = store
            .move_task("alpha", uuid::Uuid::new_v4(), MoveDirection::Down)
            .unwrap_err();
        assert!(matches!(err, Error::TaskNotFound(_)));
    }
}

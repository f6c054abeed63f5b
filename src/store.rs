use uuid::Uuid;

use crate::models::{Lane, LaneSet, Project};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    EmptyTitle,
    NotFound(String),
    UnknownLane(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::EmptyTitle => write!(f, "Title required"),
            StoreError::NotFound(id) => write!(f, "Project '{id}' not found"),
            StoreError::UnknownLane(lane) => write!(f, "Unknown lane '{lane}'"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Ordered in-memory collection of projects.
///
/// Mutations report whether they changed anything so the caller can decide
/// whether a push is due. The store itself never talks to the network.
#[derive(Debug, Clone)]
pub struct BoardStore {
    lanes: LaneSet,
    projects: Vec<Project>,
}

impl BoardStore {
    pub fn new(lanes: LaneSet) -> Self {
        Self {
            lanes,
            projects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn snapshot(&self) -> Vec<Project> {
        self.projects.clone()
    }

    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn create(
        &mut self,
        title: &str,
        link: Option<&str>,
        desc: Option<&str>,
    ) -> Result<Project, StoreError> {
        let title = validate_title(title)?;

        let mut id = Uuid::now_v7().to_string();
        while self.find(&id).is_some() {
            id = Uuid::now_v7().to_string();
        }

        let project = Project {
            id,
            title,
            link: normalize(link),
            desc: normalize(desc),
            section: self.lanes.intake().to_string(),
        };
        self.projects.push(project.clone());
        Ok(project)
    }

    pub fn update(
        &mut self,
        id: &str,
        title: &str,
        link: Option<&str>,
        desc: Option<&str>,
    ) -> Result<Project, StoreError> {
        let title = validate_title(title)?;
        let project = self
            .find_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        project.title = title;
        project.link = normalize(link);
        project.desc = normalize(desc);
        Ok(project.clone())
    }

    /// Returns `true` if a project was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        self.projects.len() != before
    }

    /// Returns `Ok(true)` only when the project exists and changed lane.
    pub fn move_to(&mut self, id: &str, section: &str) -> Result<bool, StoreError> {
        if !self.lanes.contains(section) {
            return Err(StoreError::UnknownLane(section.to_string()));
        }

        match self.find_mut(id) {
            Some(project) if project.section != section => {
                project.section = section.to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Wholesale replace. Duplicate ids keep their first occurrence.
    pub fn replace_all(&mut self, projects: Vec<Project>) {
        let mut kept: Vec<Project> = Vec::with_capacity(projects.len());
        for project in projects {
            if kept.iter().any(|p| p.id == project.id) {
                tracing::warn!("Dropping duplicate project id '{}'", project.id);
                continue;
            }
            if !self.lanes.contains(&project.section) {
                tracing::debug!(
                    "Project '{}' is in undeclared lane '{}', it will not be rendered",
                    project.id,
                    project.section
                );
            }
            kept.push(project);
        }
        self.projects = kept;
    }

    /// Projects grouped by declared lane, in collection order.
    pub fn lanes(&self) -> Vec<Lane> {
        self.lanes
            .names()
            .iter()
            .map(|lane| Lane {
                id: lane.clone(),
                projects: self
                    .projects
                    .iter()
                    .filter(|p| &p.section == lane)
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}

fn validate_title(title: &str) -> Result<String, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::EmptyTitle);
    }
    Ok(title.to_string())
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

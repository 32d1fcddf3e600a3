//! Project gate: every feature set write passes through here first.

use crate::{SpecError, SpecResult, SpecService};
use featreg_model::Project;
use tracing::{debug, info, warn};

impl SpecService {
    /// Resolves the project a write targets, creating it if it does not exist.
    ///
    /// Fails with `InvalidArgument` if the project is archived. A project
    /// created here stays created even if the write fails later.
    pub(crate) fn resolve_project(&self, name: &str) -> SpecResult<Project> {
        let name = self.project_or_default(name);

        match self.projects.find_project(name)? {
            None => {
                let project = Project::new(name);
                self.projects.save_project(&project)?;
                info!("Created project {}", name);
                Ok(project)
            }
            Some(project) if project.archived => {
                warn!("Rejected write to archived project {}", name);
                Err(SpecError::InvalidArgument(format!("project is archived: {}", name)))
            }
            Some(project) => {
                debug!("Project {} is active", name);
                Ok(project)
            }
        }
    }

    /// Lists every project that is not archived, in name order.
    pub fn list_projects(&self) -> SpecResult<Vec<Project>> {
        Ok(self.projects.find_all_active_projects()?)
    }
}

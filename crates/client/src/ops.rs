//! Pure local-state mutations applied by the store.
//!
//! Kept free of I/O so the optimistic-update and rollback behavior is unit
//! testable without a server.

use draftdeck_core::types::DbId;

use crate::client::{Project, Section};

/// Remove a project from the mirror. Returns `true` if it was present.
pub fn remove_project(projects: &mut Vec<Project>, project_id: DbId) -> bool {
    let before = projects.len();
    projects.retain(|p| p.id != project_id);
    projects.len() != before
}

/// Apply a title/content change to a mirrored section.
pub fn apply_section_update(
    projects: &mut [Project],
    project_id: DbId,
    section_id: DbId,
    title: Option<&str>,
    content: Option<&str>,
) -> bool {
    let Some(section) = find_section(projects, project_id, section_id) else {
        return false;
    };
    if let Some(title) = title {
        section.title = title.to_string();
    }
    if let Some(content) = content {
        section.content = content.to_string();
    }
    true
}

/// Replace a mirrored section with the server's version of it.
pub fn replace_section(projects: &mut [Project], updated: Section) {
    if let Some(section) = find_section(projects, updated.project_id, updated.id) {
        *section = updated;
    }
}

/// Reorder a project's mirrored sections to the given id sequence and
/// renumber their indices densely.
pub fn apply_reorder(projects: &mut [Project], project_id: DbId, ordered_ids: &[DbId]) -> bool {
    let Some(project) = projects.iter_mut().find(|p| p.id == project_id) else {
        return false;
    };

    project
        .sections
        .sort_by_key(|s| position_of(ordered_ids, s.id));
    for (index, section) in project.sections.iter_mut().enumerate() {
        section.order_index = index as i32;
    }
    true
}

fn position_of(ordered_ids: &[DbId], id: DbId) -> usize {
    ordered_ids
        .iter()
        .position(|&candidate| candidate == id)
        .unwrap_or(usize::MAX)
}

fn find_section<'a>(
    projects: &'a mut [Project],
    project_id: DbId,
    section_id: DbId,
) -> Option<&'a mut Section> {
    projects
        .iter_mut()
        .find(|p| p.id == project_id)?
        .sections
        .iter_mut()
        .find(|s| s.id == section_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: DbId, project_id: DbId, order_index: i32) -> Section {
        Section {
            id,
            project_id,
            title: format!("S{id}"),
            content: String::new(),
            draft: false,
            order_index,
            liked: None,
        }
    }

    fn project(id: DbId, sections: Vec<Section>) -> Project {
        Project {
            id,
            owner_id: 1,
            title: format!("P{id}"),
            doc_type: "docx".to_string(),
            topic: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            sections,
        }
    }

    #[test]
    fn test_remove_project() {
        let mut projects = vec![project(1, vec![]), project(2, vec![])];
        assert!(remove_project(&mut projects, 1));
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, 2);
        assert!(!remove_project(&mut projects, 99));
    }

    #[test]
    fn test_apply_section_update_is_partial() {
        let mut projects = vec![project(1, vec![section(10, 1, 0)])];

        assert!(apply_section_update(
            &mut projects,
            1,
            10,
            Some("Renamed"),
            None
        ));
        assert_eq!(projects[0].sections[0].title, "Renamed");
        assert_eq!(projects[0].sections[0].content, "");

        assert!(!apply_section_update(&mut projects, 1, 99, None, None));
    }

    #[test]
    fn test_apply_reorder_renumbers_densely() {
        let mut projects = vec![project(
            1,
            vec![section(10, 1, 0), section(11, 1, 1), section(12, 1, 2)],
        )];

        assert!(apply_reorder(&mut projects, 1, &[12, 10, 11]));
        let ids: Vec<DbId> = projects[0].sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![12, 10, 11]);
        let indices: Vec<i32> = projects[0].sections.iter().map(|s| s.order_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_replace_section_swaps_server_copy() {
        let mut projects = vec![project(1, vec![section(10, 1, 0)])];
        let mut updated = section(10, 1, 0);
        updated.content = "from server".to_string();

        replace_section(&mut projects, updated);
        assert_eq!(projects[0].sections[0].content, "from server");
    }
}

//! The generic organization folder descriptor

use crate::descriptor::error::DescriptorResult;
use crate::descriptor::traits::ItemDescriptor;
use crate::descriptor::types::{
    DescriptorKind, IconSpec, OrganizationFolder, NESTED_PROJECTS_CATEGORY,
    ORGANIZATION_FOLDER_ID,
};

/// Creates an organization folder with no navigators; they are configured
/// afterwards, possibly several of them.
#[derive(Debug, Clone, Default)]
pub struct GenericDescriptor;

impl ItemDescriptor for GenericDescriptor {
    fn id(&self) -> String {
        ORGANIZATION_FOLDER_ID.to_string()
    }

    fn display_name(&self) -> String {
        "Organization Folder".to_string()
    }

    fn description(&self) -> String {
        "Creates a set of multibranch project subfolders by scanning for repositories.".to_string()
    }

    fn category_id(&self) -> String {
        NESTED_PROJECTS_CATEGORY.to_string()
    }

    fn icon(&self) -> IconSpec {
        IconSpec::with_class("icon-branch-api-organization-folder")
    }

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Generic
    }

    fn new_instance(&self, name: &str) -> DescriptorResult<OrganizationFolder> {
        Ok(OrganizationFolder::new(name))
    }
}

//! Source-format folder layout.
//!
//! ```text
//! <project>/
//! ├── data/<Object>-data.json
//! └── force-app/main/default/
//!     ├── applications/<App>.app-meta.xml
//!     ├── layouts/<ApiName>-<Layout> Layout.layout-meta.xml
//!     ├── objects/<ApiName>/
//!     │   ├── <ApiName>.object-meta.xml
//!     │   └── fields/<Field>.field-meta.xml
//!     ├── permissionsets/<Object>_Manager.permissionset-meta.xml
//!     └── tabs/<ApiName>.tab-meta.xml
//! ```

use std::path::{Path, PathBuf};

pub const DEFAULT_PACKAGE_DIR: &str = "force-app/main/default";
pub const DEFAULT_DATA_DIR: &str = "data";

pub const OBJECT_SUFFIX: &str = ".object-meta.xml";
pub const FIELD_SUFFIX: &str = ".field-meta.xml";
pub const TAB_SUFFIX: &str = ".tab-meta.xml";
pub const APP_SUFFIX: &str = ".app-meta.xml";
pub const LAYOUT_SUFFIX: &str = ".layout-meta.xml";
pub const PERMISSION_SET_SUFFIX: &str = ".permissionset-meta.xml";

/// Resolves every output path from a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    project_root: PathBuf,
    package_dir: PathBuf,
    data_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            package_dir: PathBuf::from(DEFAULT_PACKAGE_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    /// Package directory relative to the project root.
    pub fn with_package_dir(mut self, package_dir: impl Into<PathBuf>) -> Self {
        self.package_dir = package_dir.into();
        self
    }

    /// Data directory relative to the project root.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn package_root(&self) -> PathBuf {
        self.project_root.join(&self.package_dir)
    }

    pub fn objects_root(&self) -> PathBuf {
        self.package_root().join("objects")
    }

    pub fn object_dir(&self, folder_name: &str) -> PathBuf {
        self.objects_root().join(folder_name)
    }

    pub fn object_file(&self, api_name: &str) -> PathBuf {
        self.object_dir(api_name)
            .join(format!("{api_name}{OBJECT_SUFFIX}"))
    }

    pub fn fields_dir(&self, folder_name: &str) -> PathBuf {
        self.object_dir(folder_name).join("fields")
    }

    pub fn field_file(&self, object_folder: &str, field_api_name: &str) -> PathBuf {
        self.fields_dir(object_folder)
            .join(format!("{field_api_name}{FIELD_SUFFIX}"))
    }

    pub fn tabs_dir(&self) -> PathBuf {
        self.package_root().join("tabs")
    }

    pub fn tab_file(&self, api_name: &str) -> PathBuf {
        self.tabs_dir().join(format!("{api_name}{TAB_SUFFIX}"))
    }

    pub fn app_file(&self, app_name: &str) -> PathBuf {
        self.package_root()
            .join("applications")
            .join(format!("{app_name}{APP_SUFFIX}"))
    }

    pub fn layout_file(&self, object_api_name: &str, layout_name: &str) -> PathBuf {
        self.package_root()
            .join("layouts")
            .join(format!("{object_api_name}-{layout_name} Layout{LAYOUT_SUFFIX}"))
    }

    pub fn permission_sets_dir(&self) -> PathBuf {
        self.package_root().join("permissionsets")
    }

    pub fn permission_set_file(&self, name: &str) -> PathBuf {
        self.permission_sets_dir()
            .join(format!("{name}{PERMISSION_SET_SUFFIX}"))
    }

    pub fn data_dir(&self) -> PathBuf {
        self.project_root.join(&self.data_dir)
    }

    pub fn data_file(&self, object_name: &str) -> PathBuf {
        self.data_dir().join(format!("{object_name}-data.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_locations() {
        let paths = ProjectPaths::new("/proj");
        assert_eq!(
            paths.object_file("Property__c"),
            PathBuf::from("/proj/force-app/main/default/objects/Property__c/Property__c.object-meta.xml")
        );
        assert_eq!(
            paths.field_file("Property__c", "Price__c"),
            PathBuf::from("/proj/force-app/main/default/objects/Property__c/fields/Price__c.field-meta.xml")
        );
        assert_eq!(
            paths.tab_file("Property__c"),
            PathBuf::from("/proj/force-app/main/default/tabs/Property__c.tab-meta.xml")
        );
        assert_eq!(
            paths.layout_file("Property__c", "Property"),
            PathBuf::from("/proj/force-app/main/default/layouts/Property__c-Property Layout.layout-meta.xml")
        );
        assert_eq!(
            paths.permission_set_file("Property_Manager"),
            PathBuf::from("/proj/force-app/main/default/permissionsets/Property_Manager.permissionset-meta.xml")
        );
        assert_eq!(
            paths.app_file("Dreamhouse"),
            PathBuf::from("/proj/force-app/main/default/applications/Dreamhouse.app-meta.xml")
        );
        assert_eq!(paths.data_file("Offer"), PathBuf::from("/proj/data/Offer-data.json"));
    }

    #[test]
    fn package_and_data_dirs_are_configurable() {
        let paths = ProjectPaths::new("p")
            .with_package_dir("src")
            .with_data_dir("seed");
        assert_eq!(paths.objects_root(), PathBuf::from("p/src/objects"));
        assert_eq!(paths.data_file("Offer"), PathBuf::from("p/seed/Offer-data.json"));
    }
}

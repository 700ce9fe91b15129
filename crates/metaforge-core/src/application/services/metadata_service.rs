//! Metadata Service - writes and edits source-format metadata.
//!
//! Every operation goes through the [`Filesystem`] port and reports a typed
//! [`Outcome`]. Soft conditions (a layout that does not exist locally, a
//! field already on the layout) are outcomes, not errors; only rule
//! violations and I/O failures come back as `Err`.

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{paths::FIELD_SUFFIX, ports::Filesystem, ProjectPaths},
    domain::{
        AppChange, AppDocument, Blueprint, CompiledField, FieldCompiler, LayoutChange,
        LayoutDocument, NameResolver, ObjectBlueprint, ObjectDescriptor, Outcome,
        PermissionSetSpec, field_api_name, render_tab,
    },
    error::MetaforgeResult,
};

/// What writing one object produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectReport {
    pub api_name: String,
    pub fields_dir: PathBuf,
    pub compiled: Vec<CompiledField>,
    pub outcomes: Vec<Outcome>,
}

/// Everything one blueprint run produced, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub outcomes: Vec<Outcome>,
}

impl GenerationReport {
    pub fn changes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_change()).count()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes
            .iter()
            .filter(|o| o.severity() == crate::domain::Severity::Warning)
    }
}

/// Writes objects, fields, tabs and permission sets, and edits layouts and
/// apps in place.
pub struct MetadataService {
    filesystem: Box<dyn Filesystem>,
    paths: ProjectPaths,
    resolver: NameResolver,
}

impl MetadataService {
    pub fn new(filesystem: Box<dyn Filesystem>, paths: ProjectPaths, resolver: NameResolver) -> Self {
        Self {
            filesystem,
            paths,
            resolver,
        }
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Apply a whole blueprint: objects, tabs, app registration, permission
    /// sets, then layout edits.
    ///
    /// The blueprint is validated up front so a bad field never leaves a
    /// half-written object behind.
    #[instrument(skip_all, fields(objects = blueprint.objects.len(), layouts = blueprint.layouts.len()))]
    pub fn generate(&self, blueprint: &Blueprint) -> MetaforgeResult<GenerationReport> {
        blueprint.validate(&self.resolver)?;
        let mut report = GenerationReport::default();

        for entry in &blueprint.objects {
            let written = self.write_object(entry)?;
            report.outcomes.extend(written.outcomes);

            report.outcomes.push(self.write_tab(&entry.object)?);
            if let Some(app) = &blueprint.app {
                if !entry.object.is_standard() {
                    report.outcomes.push(self.add_tab_to_app(app, &entry.object)?);
                }
            }

            let fields = written.compiled.into_iter().map(|f| f.api_name).collect();
            report
                .outcomes
                .push(self.write_permission_set(&entry.object, fields)?);
        }

        for edit in &blueprint.layouts {
            for field in edit.field_api_names() {
                report
                    .outcomes
                    .push(self.add_field_to_layout(&edit.object, &edit.layout, &field)?);
            }
            for list in &edit.related_lists {
                report.outcomes.push(self.add_related_list(
                    &edit.object,
                    &edit.layout,
                    &list.child,
                    &list.lookup_field,
                )?);
            }
        }

        info!(changes = report.changes(), "Blueprint applied");
        Ok(report)
    }

    /// Write the object definition and one file per field.
    ///
    /// Fields are compiled before anything touches the disk. Standard
    /// objects only get their field files; the platform owns their
    /// definition.
    #[instrument(skip_all, fields(object = %entry.object.api_name()))]
    pub fn write_object(&self, entry: &ObjectBlueprint) -> MetaforgeResult<ObjectReport> {
        let object = &entry.object;
        let compiled = FieldCompiler::new(&self.resolver).compile_all(&entry.fields)?;
        let document = if object.is_standard() {
            None
        } else {
            Some(object.render(entry.sharing_model())?)
        };

        let fields_dir = self.paths.fields_dir(object.folder_name());
        self.filesystem.create_dir_all(&fields_dir)?;

        let mut outcomes = Vec::with_capacity(compiled.len() + 1);

        match document {
            Some(document) => {
                let object_file = self.paths.object_file(object.api_name());
                self.filesystem.write_file(&object_file, &document)?;
                outcomes.push(Outcome::Created { path: object_file });
            }
            None => {
                debug!("Standard object, definition left untouched");
                outcomes.push(Outcome::NotApplicable {
                    reason: format!(
                        "{} is a standard object, only its fields are written",
                        object.api_name()
                    ),
                });
            }
        }

        for field in &compiled {
            let path = self.paths.field_file(object.folder_name(), &field.api_name);
            self.filesystem.write_file(&path, &field.xml)?;
            debug!(field = %field.api_name, "Field written");
            outcomes.push(Outcome::Created { path });
        }

        info!(fields = compiled.len(), "Object written");
        Ok(ObjectReport {
            api_name: object.api_name().to_string(),
            fields_dir,
            compiled,
            outcomes,
        })
    }

    /// Write the tab for a custom object. Standard objects already have one.
    pub fn write_tab(&self, object: &ObjectDescriptor) -> MetaforgeResult<Outcome> {
        if object.is_standard() {
            return Ok(Outcome::NotApplicable {
                reason: format!("{} is a standard object and already has a tab", object.api_name()),
            });
        }

        self.filesystem.create_dir_all(&self.paths.tabs_dir())?;
        let path = self.paths.tab_file(object.api_name());
        self.filesystem.write_file(&path, &render_tab(None))?;
        Ok(Outcome::Created { path })
    }

    /// Register the object's tab with an existing app.
    #[instrument(skip(self, object), fields(object = %object.api_name()))]
    pub fn add_tab_to_app(&self, app: &str, object: &ObjectDescriptor) -> MetaforgeResult<Outcome> {
        let path = self.paths.app_file(app);
        if !self.filesystem.exists(&path) {
            warn!(path = %path.display(), "App not found locally, retrieve it first");
            return Ok(Outcome::MissingResource { path });
        }

        let mut document = AppDocument::parse(self.filesystem.read_file(&path)?)?;
        let tab = object.tab_name();
        match document.add_tab(&tab) {
            AppChange::AlreadyPresent => Ok(Outcome::AlreadyPresent { path, item: tab }),
            AppChange::Inserted => {
                self.filesystem.write_file(&path, document.as_str())?;
                info!(tab = %tab, "Tab added to app");
                Ok(Outcome::Updated { path })
            }
        }
    }

    /// Add a custom field to the first two-column section of an existing
    /// layout. `__c` is appended when missing, so standard fields cannot be
    /// placed this way.
    #[instrument(skip(self))]
    pub fn add_field_to_layout(
        &self,
        object: &str,
        layout: &str,
        field: &str,
    ) -> MetaforgeResult<Outcome> {
        let object_api = self.resolver.resolve(object).api_name;
        let field_api = field_api_name(field);
        let path = self.paths.layout_file(&object_api, layout);

        let Some(mut document) = self.load_layout(&path)? else {
            return Ok(Outcome::MissingResource { path });
        };

        match document.add_field(&field_api) {
            LayoutChange::AlreadyPresent => Ok(Outcome::AlreadyPresent {
                path,
                item: field_api,
            }),
            LayoutChange::NoTwoColumnSection => {
                warn!(path = %path.display(), "Layout has no two-column section");
                Ok(Outcome::NoTargetSection { path })
            }
            LayoutChange::Inserted => {
                self.filesystem.write_file(&path, document.as_str())?;
                info!(field = %field_api, "Field added to layout");
                Ok(Outcome::Updated { path })
            }
        }
    }

    /// Add a related list for `child` (through `lookup_field`) to a layout.
    #[instrument(skip(self))]
    pub fn add_related_list(
        &self,
        object: &str,
        layout: &str,
        child: &str,
        lookup_field: &str,
    ) -> MetaforgeResult<Outcome> {
        let object_api = self.resolver.resolve(object).api_name;
        let child_api = self.resolver.resolve(child).api_name;
        let lookup_api = field_api_name(lookup_field);
        let path = self.paths.layout_file(&object_api, layout);

        let Some(mut document) = self.load_layout(&path)? else {
            return Ok(Outcome::MissingResource { path });
        };

        match document.add_related_list(&child_api, &lookup_api) {
            LayoutChange::Inserted => {
                self.filesystem.write_file(&path, document.as_str())?;
                info!(child = %child_api, "Related list added to layout");
                Ok(Outcome::Updated { path })
            }
            _ => Ok(Outcome::AlreadyPresent {
                path,
                item: crate::domain::related_list_id(&child_api, &lookup_api),
            }),
        }
    }

    /// Write the `<Object>_Manager` permission set covering `field_api_names`.
    #[instrument(skip_all, fields(object = %object.api_name(), fields = field_api_names.len()))]
    pub fn write_permission_set(
        &self,
        object: &ObjectDescriptor,
        field_api_names: Vec<String>,
    ) -> MetaforgeResult<Outcome> {
        let spec = PermissionSetSpec::manager(object, field_api_names);
        self.filesystem
            .create_dir_all(&self.paths.permission_sets_dir())?;

        let path = self.paths.permission_set_file(&spec.name);
        self.filesystem.write_file(&path, &spec.render())?;
        info!(name = %spec.name, "Permission set written");
        Ok(Outcome::Created { path })
    }

    /// Field API names found in the object's `fields/` folder, sorted.
    ///
    /// Empty when the folder does not exist.
    pub fn discover_field_names(&self, object: &ObjectDescriptor) -> MetaforgeResult<Vec<String>> {
        let dir = self.paths.fields_dir(object.folder_name());
        if !self.filesystem.exists(&dir) {
            debug!(dir = %dir.display(), "No fields folder");
            return Ok(Vec::new());
        }

        let names = self
            .filesystem
            .list_files(&dir)?
            .into_iter()
            .filter_map(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|n| n.strip_suffix(FIELD_SUFFIX))
                    .map(str::to_string)
            })
            .collect();
        Ok(names)
    }

    /// Permission set from whatever fields exist on disk.
    ///
    /// A missing fields folder is reported but does not stop the write: the
    /// permission set is emitted with object access only.
    pub fn write_permission_set_from_disk(
        &self,
        object: &ObjectDescriptor,
    ) -> MetaforgeResult<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(2);
        let dir = self.paths.fields_dir(object.folder_name());
        if !self.filesystem.exists(&dir) {
            warn!(path = %dir.display(), "No fields folder, granting object access only");
            outcomes.push(Outcome::MissingResource { path: dir });
        }

        let fields = self.discover_field_names(object)?;
        outcomes.push(self.write_permission_set(object, fields)?);
        Ok(outcomes)
    }

    fn load_layout(&self, path: &std::path::Path) -> MetaforgeResult<Option<LayoutDocument>> {
        if !self.filesystem.exists(path) {
            warn!(path = %path.display(), "Layout not found locally, retrieve it first");
            return Ok(None);
        }
        let text = self.filesystem.read_file(path)?;
        Ok(Some(LayoutDocument::parse(text)?))
    }
}

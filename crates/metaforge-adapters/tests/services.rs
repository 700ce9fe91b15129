//! Service use cases run end to end against the in-memory filesystem.

use std::path::{Path, PathBuf};

use metaforge_adapters::{BlueprintLoader, MemoryFilesystem};
use metaforge_core::{
    application::{DataService, MetadataService, ProjectPaths},
    domain::{NameResolver, Outcome, RecordWarning},
};
use serde_json::{Value, json};

const ROOT: &str = "/proj";

const BLUEPRINT: &str = r#"
[app]
name = "Dreamhouse"

[[objects]]
name = "Property"
plural_label = "Properties"

[[objects.fields]]
name = "Price"
type = "currency"
required = true

[[objects.fields]]
name = "Description"
type = "text-area"

[[objects]]
name = "Offer"

[objects.name_field]
type = "auto-number"
label = "Offer Number"
display_format = "OFF-{0000}"

[[objects.fields]]
name = "Property"
type = "master-detail"
reference_to = "Property"
required = true

[[objects.fields]]
name = "Terms"
type = "text-area"
required = true

[[objects.fields]]
name = "Amount"
type = "currency"

[[layouts]]
object = "Property"
fields = ["Price"]

[[layouts.related_lists]]
child = "Offer"
lookup_field = "Property"
"#;

const LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Layout xmlns="http://soap.sforce.com/2006/04/metadata">
    <layoutSections>
        <customLabel>false</customLabel>
        <detailHeading>false</detailHeading>
        <editHeading>true</editHeading>
        <label>Information</label>
        <layoutColumns>
            <layoutItems>
                <behavior>Required</behavior>
                <field>Name</field>
            </layoutItems>
        </layoutColumns>
        <layoutColumns/>
        <style>TwoColumnsTopToBottom</style>
    </layoutSections>
</Layout>
"#;

const APP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomApplication xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>Dreamhouse</label>
    <tabs>standard-Account</tabs>
</CustomApplication>
"#;

fn paths() -> ProjectPaths {
    ProjectPaths::new(ROOT)
}

fn layout_path() -> PathBuf {
    paths().layout_file("Property__c", "Property")
}

fn service(fs: &MemoryFilesystem) -> MetadataService {
    MetadataService::new(Box::new(fs.clone()), paths(), NameResolver::default())
}

fn seeded() -> MemoryFilesystem {
    MemoryFilesystem::new()
        .with_file(layout_path(), LAYOUT)
        .with_file(paths().app_file("Dreamhouse"), APP)
}

fn content(fs: &MemoryFilesystem, path: &Path) -> String {
    fs.get(path)
        .unwrap_or_else(|| panic!("{} was not written", path.display()))
}

#[test]
fn generate_writes_every_artifact() {
    let fs = seeded();
    let blueprint = BlueprintLoader::default().load_str(BLUEPRINT).unwrap();

    let report = service(&fs).generate(&blueprint).unwrap();
    assert_eq!(report.warnings().count(), 0);

    let p = paths();
    let property = content(&fs, &p.object_file("Property__c"));
    assert!(property.contains("<sharingModel>ReadWrite</sharingModel>"));

    let offer = content(&fs, &p.object_file("Offer__c"));
    assert!(offer.contains("<sharingModel>ControlledByParent</sharingModel>"));
    assert!(offer.contains("<displayFormat>OFF-{0000}</displayFormat>"));

    let master = content(&fs, &p.field_file("Offer__c", "Property__c"));
    assert!(master.contains("<referenceTo>Property__c</referenceTo>"));
    assert!(!master.contains("<required>"));

    assert!(fs.get(&p.tab_file("Property__c")).is_some());
    assert!(fs.get(&p.tab_file("Offer__c")).is_some());

    let app = content(&fs, &p.app_file("Dreamhouse"));
    assert!(app.contains("<tabs>Property__c</tabs>"));
    assert!(app.contains("<tabs>Offer__c</tabs>"));

    let permset = content(&fs, &p.permission_set_file("Offer_Manager"));
    assert!(permset.contains("<field>Offer__c.Terms__c</field>"));
    assert!(permset.contains("<field>Offer__c.Amount__c</field>"));

    let layout = content(&fs, &layout_path());
    assert!(layout.contains("<field>Price__c</field>"));
    assert!(layout.contains("<relatedList>Offer__c.Property__c</relatedList>"));
}

#[test]
fn generate_twice_leaves_edited_documents_unchanged() {
    let fs = seeded();
    let blueprint = BlueprintLoader::default().load_str(BLUEPRINT).unwrap();
    let svc = service(&fs);

    svc.generate(&blueprint).unwrap();
    let layout_once = content(&fs, &layout_path());
    let app_once = content(&fs, &paths().app_file("Dreamhouse"));

    let second = svc.generate(&blueprint).unwrap();
    assert_eq!(content(&fs, &layout_path()), layout_once);
    assert_eq!(content(&fs, &paths().app_file("Dreamhouse")), app_once);
    assert!(
        second
            .outcomes
            .iter()
            .any(|o| matches!(o, Outcome::AlreadyPresent { item, .. } if item == "Price__c"))
    );
}

#[test]
fn invalid_blueprint_writes_nothing() {
    let fs = MemoryFilesystem::new();
    let mut blueprint = BlueprintLoader::default().load_str(BLUEPRINT).unwrap();
    blueprint.objects[1].fields[0].reference_to = None;

    assert!(service(&fs).generate(&blueprint).is_err());
    assert!(fs.paths().is_empty());
}

#[test]
fn missing_layout_and_app_are_reported_not_fatal() {
    let fs = MemoryFilesystem::new();
    let blueprint = BlueprintLoader::default().load_str(BLUEPRINT).unwrap();

    let report = service(&fs).generate(&blueprint).unwrap();
    let missing: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| matches!(o, Outcome::MissingResource { .. }))
        .collect();
    // two app registrations, one field and one related list
    assert_eq!(missing.len(), 4);
    assert!(fs.get(&paths().object_file("Offer__c")).is_some());
}

#[test]
fn layout_without_two_column_section_is_left_alone() {
    let single = LAYOUT.replace("TwoColumnsTopToBottom", "OneColumn");
    let fs = MemoryFilesystem::new().with_file(layout_path(), single.clone());

    let outcome = service(&fs)
        .add_field_to_layout("Property", "Property", "Price")
        .unwrap();
    assert!(matches!(outcome, Outcome::NoTargetSection { .. }));
    assert_eq!(content(&fs, &layout_path()), single);
}

#[test]
fn standard_objects_get_no_tab() {
    let fs = MemoryFilesystem::new();
    let account = metaforge_core::domain::ObjectDescriptor::new(&NameResolver::default(), "Account");
    let outcome = service(&fs).write_tab(&account).unwrap();
    assert!(matches!(outcome, Outcome::NotApplicable { .. }));
    assert!(fs.paths().is_empty());
}

#[test]
fn standard_object_definition_is_never_overwritten() {
    let retrieved = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomObject xmlns="http://soap.sforce.com/2006/04/metadata">
    <listViews>
        <fullName>AllContacts</fullName>
        <filterScope>Everything</filterScope>
        <label>All Contacts</label>
    </listViews>
    <sharingModel>ControlledByParent</sharingModel>
</CustomObject>
"#;
    let object_file = paths().object_file("Contact");
    let fs = MemoryFilesystem::new().with_file(&object_file, retrieved);
    let blueprint = BlueprintLoader::default()
        .load_str(
            "[[objects]]\nname = \"Contact\"\n\n[[objects.fields]]\nname = \"Loyalty_Tier\"\ntype = \"text\"\n",
        )
        .unwrap();

    let report = service(&fs).generate(&blueprint).unwrap();

    assert_eq!(content(&fs, &object_file), retrieved);
    assert!(fs.get(&paths().field_file("Contact", "Loyalty_Tier__c")).is_some());
    assert!(fs.get(&paths().tab_file("Contact")).is_none());
    assert!(
        report
            .outcomes
            .iter()
            .all(|o| o.path() != Some(&object_file))
    );
    let permset = content(&fs, &paths().permission_set_file("Contact_Manager"));
    assert!(permset.contains("<field>Contact.Loyalty_Tier__c</field>"));
}

#[test]
fn permission_set_from_disk_lists_written_fields() {
    let fs = MemoryFilesystem::new();
    let blueprint = BlueprintLoader::default().load_str(BLUEPRINT).unwrap();
    let svc = service(&fs);
    let offer = &blueprint.objects[1];
    svc.write_object(offer).unwrap();

    assert_eq!(
        svc.discover_field_names(&offer.object).unwrap(),
        vec!["Amount__c", "Property__c", "Terms__c"]
    );

    let outcomes = svc.write_permission_set_from_disk(&offer.object).unwrap();
    assert_eq!(outcomes.len(), 1);
    let permset = content(&fs, &paths().permission_set_file("Offer_Manager"));
    assert_eq!(permset.matches("<fieldPermissions>").count(), 3);
}

#[test]
fn permission_set_without_fields_folder_grants_object_access_only() {
    let fs = MemoryFilesystem::new();
    let object = metaforge_core::domain::ObjectDescriptor::new(&NameResolver::default(), "Broker");

    let outcomes = service(&fs).write_permission_set_from_disk(&object).unwrap();
    assert!(matches!(outcomes[0], Outcome::MissingResource { .. }));
    assert!(matches!(outcomes[1], Outcome::Created { .. }));

    let permset = content(&fs, &paths().permission_set_file("Broker_Manager"));
    assert!(!permset.contains("<fieldPermissions>"));
    assert!(permset.contains("<object>Broker__c</object>"));
}

#[test]
fn data_file_fills_required_and_drops_auto_number_name() {
    let fs = MemoryFilesystem::new();
    let blueprint = BlueprintLoader::default().load_str(BLUEPRINT).unwrap();
    let offer = &blueprint.objects[1];

    let rows = vec![
        json!({ "Name": "x", "Amount__c": 100 }),
        json!({ "Terms__c": "Cash" }),
    ]
    .into_iter()
    .map(|v| match v {
        Value::Object(map) => map,
        _ => unreachable!(),
    })
    .collect();

    let report = DataService::new(Box::new(fs.clone()), paths())
        .write_records(offer, rows)
        .unwrap();

    assert_eq!(report.records, 2);
    assert!(report.warnings.contains(&RecordWarning::AutoNumberNameDropped { row: 0 }));
    assert!(report.warnings.contains(&RecordWarning::MissingRequiredFilled {
        row: 0,
        field: "Terms__c".into()
    }));

    let written: Value =
        serde_json::from_str(&content(&fs, &paths().data_file("Offer"))).unwrap();
    let first = &written["records"][0];
    assert_eq!(first["attributes"]["type"], "Offer__c");
    assert_eq!(first["attributes"]["referenceId"], "ref0");
    assert!(first.get("Name").is_none());
    assert_eq!(first["Terms__c"], Value::Null);
    assert_eq!(first["Amount__c"], 100);

    let second = &written["records"][1];
    assert_eq!(second["attributes"]["referenceId"], "ref1");
    assert!(second.get("Amount__c").is_none());
}

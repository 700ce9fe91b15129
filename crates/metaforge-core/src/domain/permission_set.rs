//! Permission sets granting full access to one object.

use crate::domain::{object::ObjectDescriptor, xml::XmlWriter};

/// Everything needed to render a `<Object>_Manager` permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSetSpec {
    pub name: String,
    pub label: String,
    pub object_api_name: String,
    pub tab: String,
    pub field_api_names: Vec<String>,
}

impl PermissionSetSpec {
    /// Manager permission set for `object` covering `field_api_names`.
    pub fn manager(object: &ObjectDescriptor, field_api_names: Vec<String>) -> Self {
        Self {
            name: format!("{}_Manager", object.simple_name()),
            label: format!("{} Manager", object.label),
            object_api_name: object.api_name().to_string(),
            tab: object.tab_name(),
            field_api_names,
        }
    }

    pub fn render(&self) -> String {
        let mut w = XmlWriter::document("PermissionSet");
        w.leaf(
            "description",
            format!("Full access to {} records and fields", self.object_api_name),
        );

        for field in &self.field_api_names {
            w.open("fieldPermissions")
                .leaf_bool("editable", true)
                .leaf("field", format!("{}.{}", self.object_api_name, field))
                .leaf_bool("readable", true)
                .close();
        }

        w.leaf_bool("hasActivationRequired", false)
            .leaf("label", &self.label);

        w.open("objectPermissions")
            .leaf_bool("allowCreate", true)
            .leaf_bool("allowDelete", true)
            .leaf_bool("allowEdit", true)
            .leaf_bool("allowRead", true)
            .leaf_bool("modifyAllRecords", true)
            .leaf("object", &self.object_api_name)
            .leaf_bool("viewAllRecords", true)
            .close();

        w.open("tabSettings")
            .leaf("tab", &self.tab)
            .leaf("visibility", "Visible")
            .close();

        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::naming::NameResolver;

    #[test]
    fn grants_full_object_access() {
        let object = ObjectDescriptor::new(&NameResolver::default(), "Property");
        let spec = PermissionSetSpec::manager(&object, vec![]);
        let xml = spec.render();

        assert_eq!(spec.name, "Property_Manager");
        for flag in [
            "allowCreate",
            "allowDelete",
            "allowEdit",
            "allowRead",
            "modifyAllRecords",
            "viewAllRecords",
        ] {
            assert!(xml.contains(&format!("<{flag}>true</{flag}>")), "{flag} missing");
        }
        assert!(xml.contains("<object>Property__c</object>"));
        assert!(!xml.contains("<fieldPermissions>"));
    }

    #[test]
    fn every_field_is_readable_and_editable() {
        let object = ObjectDescriptor::new(&NameResolver::default(), "Property");
        let xml = PermissionSetSpec::manager(
            &object,
            vec!["Price__c".into(), "Bedrooms__c".into()],
        )
        .render();

        assert_eq!(xml.matches("<fieldPermissions>").count(), 2);
        assert!(xml.contains("<field>Property__c.Price__c</field>"));
        assert!(xml.contains("<field>Property__c.Bedrooms__c</field>"));
    }

    #[test]
    fn tab_visibility_uses_platform_tab_names() {
        let resolver = NameResolver::default();
        let custom = PermissionSetSpec::manager(&ObjectDescriptor::new(&resolver, "Offer"), vec![]);
        let standard =
            PermissionSetSpec::manager(&ObjectDescriptor::new(&resolver, "Account"), vec![]);

        assert!(custom.render().contains("<tab>Offer__c</tab>"));
        assert!(standard.render().contains("<tab>standard-Account</tab>"));
        assert!(standard.render().contains("<visibility>Visible</visibility>"));
    }
}

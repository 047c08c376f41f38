//! Tag Helper Descriptors
//!
//! Metadata describing the tag helper types bound to an element.

use serde::{Deserialize, Serialize};

/// How a tag helper treats the element's body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentBehavior {
    /// Body is rendered in place.
    #[default]
    None,
    /// Helper content follows the body.
    Append,
    /// Helper content precedes the body.
    Prepend,
    /// Body is buffered and discarded in favour of the helper content.
    Replace,
    /// Body is buffered and handed to the helper before it runs.
    Modify,
}

impl ContentBehavior {
    /// Picks the behavior for an element bound to several helpers.
    ///
    /// The first non-`None` behavior wins; a later conflicting one is logged and ignored.
    pub fn resolve(descriptors: &[TagHelperDescriptor]) -> ContentBehavior {
        let mut declared = descriptors
            .iter()
            .filter(|descriptor| descriptor.content_behavior != ContentBehavior::None);

        let Some(first) = declared.next() else {
            return ContentBehavior::None;
        };

        if let Some(conflict) = declared.find(|d| d.content_behavior != first.content_behavior) {
            tracing::warn!(
                selected = ?first.content_behavior,
                selected_by = %first.type_name,
                ignored = ?conflict.content_behavior,
                ignored_from = %conflict.type_name,
                "conflicting tag helper content behaviors on one element"
            );
        }

        first.content_behavior
    }
}

/// A bindable property of a tag helper, exposed as an HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagHelperAttributeDescriptor {
    /// HTML attribute name, matched case-insensitively.
    pub name: String,
    pub property_name: String,
    /// Fully qualified CLR type of the property.
    pub type_name: String,
}

impl TagHelperAttributeDescriptor {
    pub fn new(name: &str, property_name: &str, type_name: &str) -> Self {
        TagHelperAttributeDescriptor {
            name: name.to_string(),
            property_name: property_name.to_string(),
            type_name: type_name.to_string(),
        }
    }

    /// String properties receive quoted literals or buffered markup.
    pub fn is_string_property(&self) -> bool {
        self.type_name == "System.String" || self.type_name == "string"
    }

    pub fn matches(&self, attribute_name: &str) -> bool {
        self.name.eq_ignore_ascii_case(attribute_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagHelperDescriptor {
    pub tag_name: String,
    /// Fully qualified type name of the helper class.
    pub type_name: String,
    #[serde(default)]
    pub assembly_name: String,
    #[serde(default)]
    pub attributes: Vec<TagHelperAttributeDescriptor>,
    #[serde(default)]
    pub content_behavior: ContentBehavior,
}

impl TagHelperDescriptor {
    pub fn new(tag_name: &str, type_name: &str) -> Self {
        TagHelperDescriptor {
            tag_name: tag_name.to_string(),
            type_name: type_name.to_string(),
            assembly_name: String::new(),
            attributes: Vec::new(),
            content_behavior: ContentBehavior::None,
        }
    }

    pub fn with_attribute(mut self, attribute: TagHelperAttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_content_behavior(mut self, behavior: ContentBehavior) -> Self {
        self.content_behavior = behavior;
        self
    }

    /// Name of the generated field holding the helper instance.
    pub fn variable_name(&self) -> String {
        format!("__{}", self.type_name.replace('.', "_"))
    }
}

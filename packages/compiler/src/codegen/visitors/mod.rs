//! One visitor per generation pass. Each walks the whole chunk tree and
//! writes only the chunk kinds its pass is responsible for.

pub mod base_type_visitor;
pub mod class_attribute_visitor;
pub mod code_visitor;
pub mod design_time_helpers_visitor;
pub mod helper_visitor;
pub mod tag_helper_field_visitor;
pub mod type_member_visitor;
pub mod using_visitor;

pub use base_type_visitor::BaseTypeVisitor;
pub use class_attribute_visitor::ClassAttributeVisitor;
pub use code_visitor::CodeVisitor;
pub use design_time_helpers_visitor::DesignTimeHelpersVisitor;
pub use helper_visitor::HelperVisitor;
pub use tag_helper_field_visitor::TagHelperFieldDeclarationVisitor;
pub use type_member_visitor::TypeMemberVisitor;
pub use using_visitor::UsingVisitor;

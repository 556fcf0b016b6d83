pub mod attribute;
pub mod field;
pub mod field_name;
pub mod field_type;
pub mod model;
pub mod model_name;
pub mod relation;

pub use field::Field;
pub use field_name::FieldName;
pub use field_type::FieldType;
pub use model::Model;
pub use model_name::ModelName;
pub use relation::{RelationDecl, RelationKind};

pub mod airr;
pub mod mapping;

pub use airr::AirrSchema;
pub use airr::AIRR_SCHEMA;
pub use mapping::MappingRule;

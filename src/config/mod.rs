pub mod attribute;
pub mod composite;
pub mod errors;
pub mod loader;
pub mod schema;
pub mod section;
pub mod sections;
pub mod tracker;
pub mod value;


pub use attribute::{
    Attribute, BoolAttribute, FloatAttribute, IntAttribute, Resolved, StringAttribute,
};
pub use composite::{LabelConfidenceMap, ObjectAttribute};
pub use errors::{
    AttributeError, AttributeResult, Bound, FieldPath, SchemaError, SectionError, SectionResult,
};
pub use loader::{
    load_service_config_from_file, load_service_config_from_str, load_tree_from_file,
    load_tree_from_str, LoadError, LoadResult,
};
pub use schema::{AttributeSpec, NativeValue, Record};
pub use section::{ConfigSection, Section, SectionReport};
pub use sections::{
    CropRegion, DetectorConfig, Device, DistanceMetric, EmbedderConfig, TrackingConfig,
};
pub use tracker::{validate_config, ServiceConfig, TrackerConfig};
pub use value::{DynamicValue, Fields, ValueKind};

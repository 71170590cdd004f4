//! Common test utilities and fixtures for property-mapper integration
//! tests.

use schemafold::metrics;
use schemafold::{
    EntityKey, FieldShape, FieldValue, PropertyMapper, Record, RecordDescriptor, TypeRegistry,
};
use schemafold::resolver::SledResolver;
use std::sync::Arc;
use tempfile::TempDir;

/// Shared fixture: a sled-backed resolver over a temporary database, the
/// metrics record pairs, and a handful of entity types to map against.
pub struct CommonTestFixture {
    pub mapper: PropertyMapper,
    pub resolver: Arc<SledResolver>,
    pub registry: Arc<TypeRegistry>,
    pub _temp_dir: TempDir,
}

impl CommonTestFixture {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let temp_dir = tempfile::tempdir().expect("failed to create temp directory");
        let db = sled::Config::new()
            .path(temp_dir.path())
            .temporary(true)
            .open()
            .expect("failed to open temporary database");
        let resolver = Arc::new(SledResolver::new(db));
        let registry = Arc::new(Self::build_registry());
        let mapper = PropertyMapper::new(Arc::clone(&registry), resolver.clone());

        Self {
            mapper,
            resolver,
            registry,
            _temp_dir: temp_dir,
        }
    }

    fn build_registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        metrics::register_types(&mut registry).expect("metrics types register once");

        registry
            .register_record(
                RecordDescriptor::new_internal("Frame")
                    .with_key_field("_key")
                    .with_field("_key", FieldShape::Handle)
                    .with_field("_rows", FieldShape::Int),
            )
            .unwrap();
        registry
            .register_record(
                RecordDescriptor::new_external("FrameV3", 3, "Frame")
                    .with_field("key", FieldShape::KeyRef)
                    .with_field("rows", FieldShape::Int),
            )
            .unwrap();

        registry
            .register_record(
                RecordDescriptor::new_internal("Model")
                    .with_key_field("_key")
                    .with_field("_key", FieldShape::Handle)
                    .with_field("_frame", FieldShape::Entity),
            )
            .unwrap();
        registry
            .register_record(
                RecordDescriptor::new_external("ModelV3", 3, "Model")
                    .with_field("key", FieldShape::KeyRef)
                    .with_field("frame", FieldShape::KeyRef),
            )
            .unwrap();

        registry
            .register_record(
                RecordDescriptor::new_internal("ScoreRun")
                    .with_field("_frame", FieldShape::Handle)
                    .with_field("_per_class_error", FieldShape::DoubleArray),
            )
            .unwrap();
        registry
            .register_record(
                RecordDescriptor::new_external("ScoreRunV3", 3, "ScoreRun")
                    .with_field(
                        "frame",
                        FieldShape::External {
                            type_name: "FrameV3".to_string(),
                        },
                    )
                    .with_field("per_class_error", FieldShape::BoxedDoubleArray),
            )
            .unwrap();

        registry
    }

    /// Stores a frame entity and returns its key.
    pub fn seed_frame(&self, name: &str, rows: i64) -> EntityKey {
        let key = EntityKey::make(name);
        let frame = Record::new("Frame")
            .with_field("_key", FieldValue::Handle(key.clone()))
            .with_field("_rows", FieldValue::Int(rows));
        self.resolver
            .insert(&key, frame)
            .expect("failed to store frame");
        key
    }

    /// Stores a model entity referencing `frame` and returns its key.
    pub fn seed_model(&self, name: &str, frame: &EntityKey) -> EntityKey {
        let key = EntityKey::make(name);
        let model = Record::new("Model")
            .with_field("_key", FieldValue::Handle(key.clone()))
            .with_field("_frame", FieldValue::Handle(frame.clone()));
        self.resolver
            .insert(&key, model)
            .expect("failed to store model");
        key
    }
}

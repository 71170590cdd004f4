//! Model-metrics records and their external wrappers.
//!
//! A compact scoring surface over the record model: a [`MetricsBuilder`]
//! folds per-row prediction error into a keyed `ModelMetrics` record, and
//! [`register_types`] declares the record pairs the mapper needs to carry
//! those metrics across the external/internal boundary.

use crate::descriptor::{EnumDomain, FieldDescriptor, FieldShape, RecordDescriptor};
use crate::error::MappingResult;
use crate::record::Record;
use crate::registry::TypeRegistry;
use crate::value::{EntityKey, FieldValue};

/// Internal record type names.
pub const MODEL_METRICS: &str = "ModelMetrics";
pub const CONFUSION_MATRIX: &str = "ConfusionMatrix";

/// External wrapper type names, at schema version 3.
pub const MODEL_METRICS_V3: &str = "ModelMetricsV3";
pub const CONFUSION_MATRIX_V3: &str = "ConfusionMatrixV3";

/// Enum domain of scoring categories.
pub const METRICS_CATEGORY: &str = "MetricsCategory";

/// Registers the metrics record types and their enum domain.
pub fn register_types(registry: &mut TypeRegistry) -> MappingResult<()> {
    registry.register_enum(EnumDomain::new(
        METRICS_CATEGORY,
        vec!["Regression", "Binomial", "Multinomial", "AutoEncoder"],
    ))?;

    let mut cm = RecordDescriptor::new_internal(CONFUSION_MATRIX);
    cm.add_field(FieldDescriptor::new("_counts", FieldShape::IntArray));
    cm.add_field(FieldDescriptor::new("_size", FieldShape::Int));
    registry.register_record(cm)?;

    let mut cm_v3 = RecordDescriptor::new_external(CONFUSION_MATRIX_V3, 3, CONFUSION_MATRIX);
    cm_v3.add_field(FieldDescriptor::new("counts", FieldShape::IntArray));
    cm_v3.add_field(FieldDescriptor::new("size", FieldShape::Int));
    registry.register_record(cm_v3)?;

    let mut metrics = RecordDescriptor::new_internal(MODEL_METRICS).with_key_field("_key");
    metrics.add_field(FieldDescriptor::new("_key", FieldShape::Handle));
    metrics.add_field(FieldDescriptor::new("_model", FieldShape::Entity));
    metrics.add_field(FieldDescriptor::new("_frame", FieldShape::Entity));
    metrics.add_field(FieldDescriptor::new(
        "_category",
        FieldShape::Enum {
            domain: METRICS_CATEGORY.to_string(),
        },
    ));
    metrics.add_field(FieldDescriptor::new("_mse", FieldShape::Double));
    metrics.add_field(FieldDescriptor::new(
        "_cm",
        FieldShape::Internal {
            type_name: CONFUSION_MATRIX.to_string(),
        },
    ));
    registry.register_record(metrics)?;

    let mut metrics_v3 = RecordDescriptor::new_external(MODEL_METRICS_V3, 3, MODEL_METRICS);
    metrics_v3.add_field(FieldDescriptor::new("key", FieldShape::KeyRef));
    metrics_v3.add_field(FieldDescriptor::new("model", FieldShape::KeyRef));
    metrics_v3.add_field(FieldDescriptor::new("frame", FieldShape::KeyRef));
    metrics_v3.add_field(FieldDescriptor::new("category", FieldShape::Text));
    metrics_v3.add_field(FieldDescriptor::new("mse", FieldShape::Double));
    metrics_v3.add_field(FieldDescriptor::new(
        "cm",
        FieldShape::External {
            type_name: CONFUSION_MATRIX_V3.to_string(),
        },
    ));
    registry.register_record(metrics_v3)?;

    Ok(())
}

/// Accumulates per-row scoring error and produces a `ModelMetrics` record.
#[derive(Debug, Default)]
pub struct MetricsBuilder {
    sum_squared_error: f64,
    rows: u64,
}

impl MetricsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one scored row in. Rows with a missing actual or missing
    /// prediction carry no error.
    pub fn per_row(&mut self, prediction: f64, actual: f64) {
        if actual.is_nan() || prediction.is_nan() {
            return;
        }
        let err = actual - prediction;
        self.sum_squared_error += err * err;
        self.rows += 1;
    }

    /// Rows that contributed error so far.
    #[must_use]
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Finalizes into a keyed `ModelMetrics` record bound to the given
    /// model and frame handles. With no scored rows the MSE is NaN.
    #[must_use]
    pub fn make_metrics(&self, model: &EntityKey, frame: &EntityKey, category: &str) -> Record {
        let mse = if self.rows == 0 {
            f64::NAN
        } else {
            self.sum_squared_error / self.rows as f64
        };
        Record::new(MODEL_METRICS)
            .with_field("_key", FieldValue::Handle(EntityKey::generate()))
            .with_field("_model", FieldValue::Handle(model.clone()))
            .with_field("_frame", FieldValue::Handle(frame.clone()))
            .with_field("_category", FieldValue::EnumValue(category.to_string()))
            .with_field("_mse", FieldValue::Double(mse))
    }
}

pub mod age;
pub mod enums;
pub mod error;
pub mod field;
pub mod filter;
pub mod metrics;
pub mod options;
pub mod record;

pub use age::{AgeGroup, AgeGroupDetail};
pub use enums::{HivStatus, Outcome, Sex, TreatmentResult};
pub use error::FilterError;
pub use field::Field;
pub use filter::{ALL_SENTINEL, AgeRange, FilterSpec, Selection, YearBasis};
pub use metrics::{
    CountRow, CountTable, CrossCountRow, HivCoverage, MetricsBundle, RankedCountTable, RankedRow,
    TreatmentSuccess,
};
pub use options::NormalizationOptions;
pub use record::PatientRecord;

use std::borrow::Cow;

use thiserror::Error;

pub mod labels;
pub mod service;
pub mod workload;

#[derive(Debug, Error)]
pub enum ResourceGenerationError {
    #[error("Resource contains invalid data ({})!", .0)]
    InvalidData(Cow<'static, str>),
    #[error("Provided dependent resource is missing a name!")]
    DependentMissingMetadataName,
    #[error("Provided dependent resource is missing required data ({})!", .0)]
    DependentMissingData(Cow<'static, str>),
}

//! The indicator contract: descriptors, parameter schemas, the `Indicator`
//! trait, and lookup by symbol.

pub mod descriptor;
pub mod indicator;
pub mod params;
pub mod registry;

pub use descriptor::{IndicatorDescriptor, SelfTestCase};
pub use indicator::Indicator;
pub use params::{param_set, ParamField, ParamKind, ParamSet, ParamValue};
pub use registry::{all_indicators, compute, create_indicator, descriptors, SYMBOLS};

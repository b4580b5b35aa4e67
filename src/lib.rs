pub mod data;
pub mod process;

pub use data::error::{LoadError, Result};
pub use data::loader::{get_curve_data, get_switch_meta_data};
pub use data::model::{CurvePoint, SwitchCurve, SwitchCurves, SwitchKind, SwitchMeta};
pub use data::source::{CurveSource, HttpSettings, HttpSource, ResourcePath, BASE_PATH};

pub mod engine;
pub mod layout;

pub use engine::{RotationSource, RngSource, Turntable, TurntableOption, TurntableState};
pub use layout::{color_for, label_placement, segment_path, LabelOptions, LabelPlacement};

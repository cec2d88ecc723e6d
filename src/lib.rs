//! Ruler picker: pick one value from an evenly stepped range by dragging a
//! vertically scrolling tick list.
//!
//! Dragging past either end of the range stretches the list elastically; on
//! release a spring pulls it back onto the nearest end. The interaction engine
//! ([`picker::PickerEngine`]) is pure and host-driven, [`driver::PickerDriver`]
//! binds it to an injected [`scheduler::FrameScheduler`], and the Yew
//! [`components::RulerPicker`] renders it in the browser.
//!
//! ```
//! use ruler_picker::{Geometry, PickerEngine, PickerRange};
//!
//! let range = PickerRange::new(0.0, 100.0, 5.0).unwrap();
//! let mut picker = PickerEngine::new(range, Geometry::default(), 0.0);
//! assert_eq!(picker.offset(), 372.0);
//!
//! picker.pointer_down(0.0);
//! assert_eq!(picker.pointer_move(-248.0), Some(10.0));
//! ```

pub mod components;
pub mod config;
pub mod driver;
pub mod elastic;
pub mod error;
pub mod hooks;
pub mod offset;
pub mod picker;
pub mod range;
pub mod scheduler;
pub mod spring;
pub mod utils;

pub use driver::PickerDriver;
pub use error::{ConfigError, PickerError};
pub use offset::{OffsetBounds, OffsetMapper};
pub use picker::{Phase, PickerEngine, PickerSnapshot, PickerState, Release, SettleFrame};
pub use range::{Geometry, PickerRange};
pub use scheduler::{FrameScheduler, ManualFrames, RafScheduler};
pub use spring::{SpringConfig, SpringSettler, SpringStep};

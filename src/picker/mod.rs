//! Range selection: value types, editing session, validation and the
//! picker state machine

pub mod engine;
pub mod event;
pub mod range;
pub mod session;
pub mod validation;

pub use engine::{DayState, PickerState, RangePicker, CUSTOM_LABEL, PLACEHOLDER};
pub use event::PickerEvent;
pub use range::{ActiveField, DateRange, DisplayMode};
pub use session::EditingSession;
pub use validation::{check_complete, check_range, RangeLimit, ValidationError};

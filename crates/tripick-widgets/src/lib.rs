#![forbid(unsafe_code)]

//! Picker widgets for tripick.
//!
//! The only widget today is the calendar-and-clock [`date_picker`]. It is
//! headless: hosts render [`date_picker::PickerView`] with whatever UI they own.

pub mod date_picker;

pub use date_picker::{
    DateTimePicker, Mode, PickerConfig, PickerInput, PickerOptions, PickerResponse, PickerValue,
};

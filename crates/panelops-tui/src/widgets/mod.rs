//! Small rendering helpers shared by the screens.

pub mod fmt;

pub mod clock;
pub mod date;
pub mod logs;
pub mod validation;

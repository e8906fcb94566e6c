pub mod app;
pub mod month_view;

pub use app::{App, CalendarState, Flow};
pub use month_view::{render, MonthView};

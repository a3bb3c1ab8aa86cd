pub mod calendar_day;

//! intake-report — HTML and CSV rendering of score reports.

pub mod csv;
pub mod html;

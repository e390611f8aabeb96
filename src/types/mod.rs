pub mod county;
pub mod history;
pub mod measurement;
pub mod station;
pub mod support;

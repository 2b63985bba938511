pub mod chart;
pub mod company;

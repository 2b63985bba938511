pub mod chart_service;
pub mod company_search;

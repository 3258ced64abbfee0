pub mod ask;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod init;
pub mod insights;
pub mod inspect;
pub mod kpis;
pub mod load;
pub mod report;
pub mod upload;

pub mod check;
pub mod config;
pub mod routes;
pub mod run;
pub mod show;
pub mod simulate;

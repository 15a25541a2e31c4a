//! MyGram 照片分享服务库
//! 认证、属主校验与各资源的 CRUD

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod services;
pub mod telemetry;

//! propiedades-api - property listings and contact inquiries over REST
//!
//! Two interchangeable storage backends sit behind [`store::ListingStore`]:
//! an in-process collection and a hosted Supabase (PostgREST) project.

pub mod cli;
pub mod config;
pub mod filter;
pub mod http_server;
pub mod models;
pub mod stats;
pub mod store;
pub mod translate;

use clap::{Parser, ValueEnum};
use lariat_core::ShortCode;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "LARIAT_GATEWAY_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "LARIAT_GATEWAY_PUBLIC_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "LARIAT_GATEWAY_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "LARIAT_GATEWAY_MYSQL_DSN";
pub const CODE_LENGTH_ENV: &str = "LARIAT_GATEWAY_CODE_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "LARIAT_GATEWAY_MAX_ATTEMPTS";
pub const PAGE_LIMIT_ENV: &str = "LARIAT_GATEWAY_PAGE_LIMIT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lariat-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Base URL used to build the short links returned to clients.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    /// Length of generated short codes. Longer codes collide less; see
    /// the generator docs for the trade-off. Bounded by what
    /// `ShortCode` accepts, so generated codes stay resolvable.
    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value_t = 6,
        value_parser = clap::value_parser!(u8).range(ShortCode::MIN_LENGTH as i64..=ShortCode::MAX_LENGTH as i64)
    )]
    pub code_length: u8,

    /// How many candidate codes to try per shorten request.
    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = 5)]
    pub max_attempts: u32,

    /// Upper bound on listing result size.
    #[arg(long, env = PAGE_LIMIT_ENV, default_value_t = 100)]
    pub page_limit: usize,
}

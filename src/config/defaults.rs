pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_IDLE: u32 = 2;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;
// argon2id defaults recommended by OWASP
pub const DEFAULT_PASSWORD_HASH_MEMORY_KIB: u32 = 19 * 1024;
pub const DEFAULT_PASSWORD_HASH_ITERATIONS: u32 = 2;

/// Product identifiers written into generated vCards
pub const PRODUCT_NAME: &str = "cardscribe";
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PRODUCT_ID: &str = const_str::concat!("-//", PRODUCT_NAME, "//", PRODUCT_VERSION, "//EN");

/// Folding defaults (RFC 6350 §3.2 recommends 75 octets)
pub const DEFAULT_MAX_LINE_LENGTH: usize = 75;
pub const DEFAULT_FOLD_INDENT: &str = " ";
pub const CRLF: &str = "\r\n";

pub const DEFAULT_CHARSET: &str = "utf-8";

/// Prefix for environment overrides, e.g. `CARDSCRIBE__WRITER__VERSION=3.0`
pub const ENV_PREFIX: &str = "CARDSCRIBE";
pub const CONFIG_FILE: &str = "cardscribe.toml";

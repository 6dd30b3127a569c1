//! Database schema - embedded SQL files
//!
//! Each script is compiled into the binary with include_str! and written
//! with `IF NOT EXISTS`, so applying the whole list again is a no-op.

/// Schema scripts, applied in order.
/// Format: (filename, sql_content)
pub const MIGRATIONS: &[(&str, &str)] = &[("001_member.sql", include_str!("001_member.sql"))];

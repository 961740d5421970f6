//! Project-wide constants.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Default listen address. Port 3001 is what the front end expects.
pub const DEFAULT_BIND: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3001));

/// Condominium and acting user when none is configured.
pub const DEFAULT_CONDOMINIO_ID: i64 = 1;
pub const DEFAULT_USUARIO_ID: i64 = 1;

/// Events scheduled within this many days count as upcoming deadlines.
pub const UPCOMING_EVENT_DAYS: i64 = 7;

/// Contracts expiring within this many days need attention.
pub const CONTRACT_WARNING_DAYS: i64 = 30;

/// How many items of each kind feed the activity stream.
pub const RECENT_PER_KIND: usize = 5;

/// Maximum entries in the merged activity stream.
pub const ACTIVITY_FEED_LIMIT: usize = 10;

pub const EVENT_BUS_CAPACITY: usize = 64;

/// Default database path: `~/.domus/domus.db`.
/// Falls back to the working directory when there is no home.
pub fn default_db_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".domus").join("domus.db"),
        None => PathBuf::from("domus.db"),
    }
}

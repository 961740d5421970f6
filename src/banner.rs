//! Startup banner and shutdown line.

use crate::config::ServerConfig;
use crate::consts::{AUTHOR, HOMEPAGE, REPO};

/// Server configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub condominio_id: i64,
    pub usuario_id: i64,
}

impl<'a> BannerInfo<'a> {
    pub fn new(config: &'a ServerConfig, url: &'a str) -> Self {
        let database = if config.db_path == ":memory:" {
            "ephemeral"
        } else {
            &config.db_path
        };
        Self {
            url,
            database,
            condominio_id: config.tenant.condominio_id,
            usuario_id: config.tenant.usuario_id,
        }
    }
}

pub fn render_banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║              D O M U S                ║
   ║      gestão de condomínio, via API    ║
   ╚═══════════════════════════════════════╝

   version     {}
   by          {}
   home        {}
   repo        {}
   api         {}/api
   database    {}
   condominio  {}
   usuario     {}
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.url,
        info.database,
        info.condominio_id,
        info.usuario_id,
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", render_banner(info));
}

pub fn print_goodbye() {
    println!("goodbye.");
}

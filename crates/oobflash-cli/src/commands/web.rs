use anyhow::Result;
use oobflash_core::FlashConfig;

#[derive(Debug, Clone, Copy)]
pub(super) struct WebServeOptions<'a> {
    pub(super) host: &'a str,
    pub(super) port: u16,
}

pub(super) fn serve(config: FlashConfig, options: WebServeOptions<'_>) -> Result<()> {
    oobflash_web::serve_web(config, options.host, options.port)
}

use clap::Args;

#[derive(Debug, Args)]
pub struct WebArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, default_value_t = 8788)]
    pub port: u16,
}

#[derive(Debug, Args)]
pub struct PolicyArgs {
    /// Treat the request as a partial update (`HX-Request: true`).
    #[arg(long, default_value_t = false)]
    pub partial: bool,
    /// Pretend notifications are pending.
    #[arg(long, default_value_t = false)]
    pub pending: bool,
    /// Response header name present on the response; repeatable.
    #[arg(long = "header", value_name = "NAME")]
    pub headers: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// Attach offset in milliseconds; repeatable.
    #[arg(long = "at", value_name = "MS", required = true, num_args = 1..)]
    pub at: Vec<u64>,
    /// Override the configured dismiss delay.
    #[arg(long, value_parser = parse_positive_millis)]
    pub dismiss_ms: Option<u64>,
    /// Override the configured removal animation length.
    #[arg(long)]
    pub transition_ms: Option<u64>,
}

fn parse_positive_millis(raw: &str) -> std::result::Result<u64, String> {
    let value = raw
        .parse::<u64>()
        .map_err(|_| format!("invalid millisecond value '{raw}'"))?;
    if value == 0 {
        return Err("dismiss delay must be at least 1ms".to_string());
    }
    Ok(value)
}

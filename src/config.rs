use clap::Parser;

use crate::provider::ProviderKind;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "shadow-gateway")]
#[command(about = "Rate-limited proxy for Shadow Protocol tactical-analysis completions")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Completion provider to forward to; its API key is read from the
    // environment (GEMINI_API_KEY / GROQ_API_KEY), never from a flag
    #[arg(long, value_enum, default_value = "gemini")]
    pub provider: ProviderKind,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 5)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Upstream request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub upstream_timeout: u64,
}

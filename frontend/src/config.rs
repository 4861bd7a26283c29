/// Backend endpoint and credential, baked in at build time. Running without
/// them is not an option: `main` renders a configuration error instead of
/// letting the widget poll an undefined backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub supabase_url: &'static str,
    pub anon_key: &'static str,
}

pub const POLL_INTERVAL_MS: u32 = 3_000;
pub const HEARTBEAT_INTERVAL_MS: u32 = 30_000;

impl Config {
    pub fn from_build_env() -> Option<Self> {
        let supabase_url = option_env!("SUPABASE_URL")?;
        let anon_key = option_env!("SUPABASE_ANON_KEY")?;
        if supabase_url.is_empty() || anon_key.is_empty() {
            return None;
        }
        Some(Self { supabase_url, anon_key })
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base(), table)
    }

    pub fn realtime_url(&self) -> String {
        let socket_base = if let Some(rest) = self.base().strip_prefix("http://") {
            format!("ws://{rest}")
        } else if let Some(rest) = self.base().strip_prefix("https://") {
            format!("wss://{rest}")
        } else {
            format!("wss://{}", self.base())
        };
        format!(
            "{}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
            socket_base, self.anon_key
        )
    }

    fn base(&self) -> &'static str {
        self.supabase_url.trim_end_matches('/')
    }
}

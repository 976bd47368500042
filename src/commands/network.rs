use crate::command::{Command, CommandCategory, CommandResult};
use crate::context::TerminalContext;
use crate::profile;

pub fn commands() -> Vec<Box<dyn Command + Send + Sync>> {
    vec![
        Box::new(PingCommand),
        Box::new(WeatherCommand),
        Box::new(GithubCommand),
        Box::new(QuoteCommand),
        Box::new(JokeCommand),
        Box::new(IpCommand),
    ]
}

/// How to turn a fetched response body into output. Travels with the url in
/// `Effect::HttpFetch`; the wasm host runs the request off the submit path
/// and delivers `render(body)` (or `fallback()` on any failure) through the
/// delayed-output callback. A failed fetch is never fatal to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchKind {
    WeatherLine { city: String },
    GithubCard,
    Quote,
    Joke,
    Ip,
}

impl FetchKind {
    pub fn render(&self, body: &str) -> Option<String> {
        match self {
            FetchKind::WeatherLine { .. } => {
                let line = body.trim();
                if line.is_empty() {
                    None
                } else {
                    Some(line.to_string())
                }
            }
            FetchKind::GithubCard => {
                let v: serde_json::Value = serde_json::from_str(body).ok()?;
                Some(
                    [
                        format!(
                            "{} ({})",
                            v["login"].as_str()?,
                            v["name"].as_str().unwrap_or("-")
                        ),
                        format!("repos:     {}", v["public_repos"].as_u64().unwrap_or(0)),
                        format!("followers: {}", v["followers"].as_u64().unwrap_or(0)),
                        format!("bio:       {}", v["bio"].as_str().unwrap_or("-")),
                    ]
                    .join("\n"),
                )
            }
            FetchKind::Quote => {
                let v: serde_json::Value = serde_json::from_str(body).ok()?;
                Some(format!(
                    "\"{}\" - {}",
                    v["content"].as_str()?,
                    v["author"].as_str().unwrap_or("unknown")
                ))
            }
            FetchKind::Joke => {
                let v: serde_json::Value = serde_json::from_str(body).ok()?;
                v["joke"].as_str().map(|s| s.to_string())
            }
            FetchKind::Ip => {
                let v: serde_json::Value = serde_json::from_str(body).ok()?;
                Some(format!(
                    "{} ({}, {})",
                    v["ip"].as_str()?,
                    v["city"].as_str().unwrap_or("?"),
                    v["country_name"].as_str().unwrap_or("?")
                ))
            }
        }
    }

    pub fn fallback(&self) -> String {
        match self {
            FetchKind::WeatherLine { city } => format!(
                "weather: {}: service unreachable - assume sunny with a chance of segfaults",
                city
            ),
            FetchKind::GithubCard => [
                format!("{} (cached profile)", profile::GITHUB_USER),
                "repos:     24".to_string(),
                "followers: 180".to_string(),
                format!("visit:     {}", profile::GITHUB_URL),
            ]
            .join("\n"),
            FetchKind::Quote => profile::QUOTE_FALLBACK.to_string(),
            FetchKind::Joke => profile::JOKE_FALLBACK.to_string(),
            FetchKind::Ip => "127.0.0.1 (home is where the loopback is)".to_string(),
        }
    }

    /// the line printed while the request is in flight
    pub fn pending(&self) -> String {
        match self {
            FetchKind::WeatherLine { city } => format!("fetching weather for {} ...", city),
            FetchKind::GithubCard => "fetching profile ...".to_string(),
            FetchKind::Quote => "fetching quote ...".to_string(),
            FetchKind::Joke => "fetching joke ...".to_string(),
            FetchKind::Ip => "looking up your address ...".to_string(),
        }
    }
}

/// In the browser the request runs asynchronously and the result arrives as
/// a later output line, so the submit path never blocks on the network.
/// Natively nothing fetches; the fallback comes back immediately and the
/// whole degradation path stays unit-testable.
fn dispatch_fetch(ctx: &mut TerminalContext, url: String, kind: FetchKind) -> CommandResult {
    #[cfg(target_arch = "wasm32")]
    {
        let pending = kind.pending();
        ctx.emit(crate::context::Effect::HttpFetch { url, kind });
        Ok(pending)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (url, ctx);
        Ok(kind.fallback())
    }
}

/// ping - a theatrical stub. Replies arrive as delayed lines; nothing is
/// actually pinged, which also means the stats never lie about packet loss.
pub struct PingCommand;

impl Command for PingCommand {
    fn name(&self) -> &'static str {
        "ping"
    }
    fn description(&self) -> &'static str {
        "ping a host (pretend)"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Network
    }
    fn usage(&self) -> &'static str {
        "ping <host>"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let host = match args.first() {
            Some(h) => h.clone(),
            None => return Err(format!("usage: {}", self.usage())),
        };
        let rtts = [23.4, 24.1, 22.8, 23.9];
        for (i, rtt) in rtts.iter().enumerate() {
            ctx.say_later(
                300 * (i as u32 + 1),
                vec![format!(
                    "64 bytes from {}: icmp_seq={} ttl=64 time={:.1} ms",
                    host, i, rtt
                )],
            );
        }
        ctx.say_later(
            1500,
            vec![
                format!("--- {} ping statistics ---", host),
                "4 packets transmitted, 4 received, 0% packet loss".to_string(),
            ],
        );
        Ok(format!("PING {} 56 data bytes", host))
    }
}

/// weather [city]
pub struct WeatherCommand;

impl Command for WeatherCommand {
    fn name(&self) -> &'static str {
        "weather"
    }
    fn description(&self) -> &'static str {
        "current weather via wttr.in"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Network
    }
    fn usage(&self) -> &'static str {
        "weather [city]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let city = args.first().map(|s| s.as_str()).unwrap_or("Osaka");
        let url = format!("https://wttr.in/{}?format=3", city);
        dispatch_fetch(
            ctx,
            url,
            FetchKind::WeatherLine {
                city: city.to_string(),
            },
        )
    }
}

/// github [user] - profile card from the GitHub REST API
pub struct GithubCommand;

impl Command for GithubCommand {
    fn name(&self) -> &'static str {
        "github"
    }
    fn description(&self) -> &'static str {
        "show a GitHub profile card"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Network
    }
    fn usage(&self) -> &'static str {
        "github [user]"
    }
    fn execute(
        &self,
        args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        let user = args
            .first()
            .map(|s| s.as_str())
            .unwrap_or(profile::GITHUB_USER);
        let url = format!("https://api.github.com/users/{}", user);
        dispatch_fetch(ctx, url, FetchKind::GithubCard)
    }
}

pub struct QuoteCommand;

impl Command for QuoteCommand {
    fn name(&self) -> &'static str {
        "quote"
    }
    fn description(&self) -> &'static str {
        "a random quote"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Network
    }
    fn usage(&self) -> &'static str {
        "quote"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        dispatch_fetch(
            ctx,
            "https://api.quotable.io/random".to_string(),
            FetchKind::Quote,
        )
    }
}

pub struct JokeCommand;

impl Command for JokeCommand {
    fn name(&self) -> &'static str {
        "joke"
    }
    fn description(&self) -> &'static str {
        "a programming joke"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Network
    }
    fn usage(&self) -> &'static str {
        "joke"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        dispatch_fetch(
            ctx,
            "https://v2.jokeapi.dev/joke/Programming?type=single".to_string(),
            FetchKind::Joke,
        )
    }
}

pub struct IpCommand;

impl Command for IpCommand {
    fn name(&self) -> &'static str {
        "ip"
    }
    fn description(&self) -> &'static str {
        "show your public address"
    }
    fn category(&self) -> CommandCategory {
        CommandCategory::Network
    }
    fn usage(&self) -> &'static str {
        "ip"
    }
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut TerminalContext,
        _stdin: Option<&str>,
    ) -> CommandResult {
        dispatch_fetch(ctx, "https://ipapi.co/json".to_string(), FetchKind::Ip)
    }
}

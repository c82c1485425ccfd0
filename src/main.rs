use clap::Parser;
use muxlog::settings::Settings;
use muxlog_core::{Multiplexer, MuxOptions};
use muxlog_sinks::{stdout_sink, FileStore, TcpTransport, WriterChannel};
use std::io::Read;

#[derive(Parser)]
#[command(name = "muxlog", about = "Character-stream log multiplexer — stdin bytes to routed sinks")]
struct Cli {
    /// Write debug logs to /tmp/muxlog-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Severity threshold tag (F/E/W/N/T/V or 1-6); overrides the stored value.
    #[arg(long)]
    level: Option<String>,

    /// Enable the HTTP sink: host:port/url-fragment.
    #[arg(long)]
    http: Option<String>,

    /// Enable the publish channel with this topic (payloads to stderr).
    #[arg(long)]
    topic: Option<String>,

    /// Enable the command channel (payloads to stderr).
    #[arg(long)]
    command: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/muxlog-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("muxlog debug log started — tail -f /tmp/muxlog-debug.log");
    }

    let settings = Settings::load()?;
    let store = FileStore::open(settings.state_path())?;

    let mut mux = Multiplexer::with_options(
        Box::new(stdout_sink()),
        Box::new(WriterChannel::new(std::io::stderr())),
        Box::new(WriterChannel::new(std::io::stderr())),
        Box::new(TcpTransport::new()),
        MuxOptions {
            pause_buffer_bytes: settings.flow.pause_buffer_bytes,
            pause_timeout_ms: settings.flow.pause_timeout_ms,
        },
    );
    mux.setup(Box::new(store), &settings.system_name);

    if let Some(level) = cli.level.as_deref() {
        mux.set_log_level(level);
    }
    if let Some(topic) = cli.topic.as_deref() {
        mux.set_publish(true, topic);
    }
    if cli.command {
        mux.set_command(true);
    }
    if let Some(endpoint) = cli.http.as_deref() {
        let (addr, port, url) = parse_endpoint(endpoint)?;
        mux.set_http(true, &addr, &port, &url);
    }

    run(&mut mux, settings.flow.service_interval_ms)?;

    let stats = mux.stats();
    tracing::info!(?stats, "stream closed");
    Ok(())
}

/// Pump stdin through the multiplexer until EOF, ticking `service` on the
/// configured interval.
fn run(mux: &mut Multiplexer, service_interval_ms: u64) -> anyhow::Result<()> {
    let mut stdin = std::io::stdin().lock();
    let mut buf = [0u8; 512];
    let mut last_service = std::time::Instant::now();

    loop {
        let n = stdin.read(&mut buf)?;
        if n == 0 {
            break;
        }
        for &byte in &buf[..n] {
            mux.ingest(byte);
        }
        if last_service.elapsed().as_millis() as u64 >= service_interval_ms {
            mux.service(None);
            last_service = std::time::Instant::now();
        }
    }
    mux.service(None);
    Ok(())
}

/// Split `host:port/url-fragment` into setter arguments.
fn parse_endpoint(endpoint: &str) -> anyhow::Result<(String, String, String)> {
    let (hostport, url) = endpoint.split_once('/').unwrap_or((endpoint, "log"));
    let (host, port) = hostport
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("expected host:port/url-fragment, got {endpoint:?}"))?;
    Ok((host.to_string(), port.to_string(), url.to_string()))
}

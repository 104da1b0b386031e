use std::time::Duration;

use clap::Parser;
use utils::version;

/// Export T-Mobile/Nokia 5G gateway status as Prometheus metrics
#[derive(Parser, Debug, Clone)]
#[command(about, long_about, version = &**version::VERSION)]
pub struct Cli {
    #[arg(
        long,
        env = "GATEWAY_TARGET",
        value_parser = parse_target,
        help = "IP address (or base URL) of your gateway device, e.g. 192.168.12.1"
    )]
    pub target: String,

    #[arg(
        long,
        env = "EXPORTER_LISTEN_ADDR",
        default_value = "0.0.0.0:9099",
        help = "Exporter listen address"
    )]
    pub listen: String,

    #[arg(
        long,
        env = "SCRAPE_FREQUENCY",
        default_value = "10s",
        value_parser = parse_duration,
        help = "How frequently to get the status from the gateway, e.g. 10s, 1m30s, 500ms"
    )]
    pub scrape_frequency: Duration,
}

fn parse_target(s: &str) -> Result<String, String> {
    let target = s.trim();
    if target.is_empty() {
        return Err("gateway target must not be empty".to_string());
    }
    Ok(target.to_string())
}

/// Parse a duration made of `<number><unit>` parts, units `ms`, `s`, `m`, `h`.
fn parse_duration(s: &str) -> Result<Duration, String> {
    let input = s.trim();
    if input.is_empty() {
        return Err("duration must not be empty".to_string());
    }

    let mut total = Duration::ZERO;
    let mut rest = input;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("missing unit in duration `{input}`"))?;
        if digits == 0 {
            return Err(format!("expected a number in duration `{input}`"));
        }
        let value: u64 = rest[..digits]
            .parse()
            .map_err(|e| format!("invalid number in duration `{input}`: {e}"))?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let part = match &rest[..unit_len] {
            "ms" => Some(Duration::from_millis(value)),
            "s" => Some(Duration::from_secs(value)),
            "m" => value.checked_mul(60).map(Duration::from_secs),
            "h" => value.checked_mul(60 * 60).map(Duration::from_secs),
            unit => return Err(format!("unknown unit `{unit}` in duration `{input}`")),
        };
        total = part
            .and_then(|part| total.checked_add(part))
            .ok_or_else(|| format!("duration `{input}` is too large"))?;
        rest = &rest[unit_len..];
    }

    if total.is_zero() {
        return Err("scrape frequency must be greater than zero".to_string());
    }
    Ok(total)
}

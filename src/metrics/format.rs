use crate::metrics::Throughput;

/// "0.5 ns", "7.0 μs", "60.0 ms".
pub fn format_latency(ns: f64) -> String {
    if ns >= 1_000_000.0 {
        format!("{:.1} ms", ns / 1_000_000.0)
    } else if ns >= 1_000.0 {
        format!("{:.1} μs", ns / 1_000.0)
    } else {
        format!("{:.1} ns", ns)
    }
}

/// "30 GiB/s" -> "30.0 GiB/s". Unparseable input is echoed back trimmed.
pub fn format_throughput(raw: &str) -> String {
    match Throughput::parse(raw) {
        Ok(t) => format!("{:.1} {}", t.value, t.unit),
        Err(_) => raw.trim().to_string(),
    }
}

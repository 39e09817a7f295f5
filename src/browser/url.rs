/// Complete a URL typed on the command line
///
/// Astro dev servers are the usual target, so a bare port means a local server.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();

    if trimmed.contains("://") || trimmed.starts_with("data:") || trimmed.starts_with("about:") {
        return trimmed.to_string();
    }

    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return format!("http://localhost:{}", trimmed);
    }

    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") || trimmed.starts_with("[::1]") {
        return format!("http://{}", trimmed);
    }

    format!("https://{}", trimmed)
}

use url::Url;

const GOOGLE_ORIGIN: &str = "https://www.google.com";

#[derive(Debug, PartialEq, Clone)]
pub enum HtmlTag {
    ATag(String),
}

/// Turns a result link into the url it points at. Google wraps organic
/// results as `/url?q=<target>&sa=...`; those are unwrapped, plain absolute
/// links are kept as they are and everything pointing back at Google is dropped.
pub fn extract_result_url(tag: HtmlTag) -> Option<String> {
    match tag {
        HtmlTag::ATag(href) => {
            let candidate = match href.starts_with("/url?") {
                true => unwrap_redirect(&href)?,
                false => href,
            };

            match Url::parse(&candidate) {
                Ok(parsed_url) => match (parsed_url.scheme(), parsed_url.host_str()) {
                    ("http" | "https", Some(host)) if !is_search_engine_host(host) => {
                        Some(candidate)
                    }
                    _ => None,
                },
                Err(_) => None,
            }
        }
    }
}

fn unwrap_redirect(href: &str) -> Option<String> {
    let redirect = Url::parse(GOOGLE_ORIGIN).ok()?.join(href).ok()?;

    redirect
        .query_pairs()
        .find(|(key, _)| key == "q" || key == "url")
        .map(|(_, value)| value.into_owned())
}

fn is_search_engine_host(host: &str) -> bool {
    let host = host.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    host.starts_with("google.")
        || host.contains(".google.")
        || host.ends_with("googleusercontent.com")
        || host.ends_with("gstatic.com")
}

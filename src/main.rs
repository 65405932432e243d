#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
use std::{env, process::ExitCode, str::FromStr};
use web_client::{HTTPMethod, RequestOptions, Response, WebClient, WebClientOptions, error, info};

const BASE_URL_VAR: &str = "WEB_CLIENT_BASE_URL";
const USAGE: &str = "usage: web-client [--json] [METHOD] <url>";

/// Parsed command line: `[--json] [METHOD] <url>`.
struct Invocation {
    json: bool,
    request: RequestOptions,
}

impl Invocation {
    fn parse(args: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut args: Vec<String> = args.into_iter().collect();
        let json = args.first().is_some_and(|arg| arg == "--json");
        if json {
            args.remove(0);
        }
        let request = match args.as_slice() {
            [url] => RequestOptions::new(url.as_str()),
            [method, url] => {
                RequestOptions::new(url.as_str()).with_method(HTTPMethod::from_str(method).ok()?)
            }
            _ => return None,
        };
        Some(Self { json, request })
    }
}

fn print_response(response: &Response) {
    let resolved = response.request_options();
    info!("{} {} -> {} {}", resolved.method(), resolved.url(), response.status_code(), response.status_message());
    let mut names: Vec<_> = response.headers().keys().collect();
    names.sort();
    for name in names {
        match &response.headers()[name] {
            web_client::HeaderValue::Single(value) => println!("{name}: {value}"),
            web_client::HeaderValue::Multiple(values) => {
                for value in values {
                    println!("{name}: {value}");
                }
            }
        }
    }
    println!();
    println!("{}", response.raw_data());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let Some(invocation) = Invocation::parse(env::args().skip(1)) else {
        error!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let mut options = WebClientOptions::new();
    if let Ok(base_url) = env::var(BASE_URL_VAR) {
        options = options.with_base_url(base_url);
    }

    let pending = match WebClient::new(options).and_then(|client| client.request(invocation.request)) {
        Ok(pending) => pending,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    match pending.await {
        Ok(response) if invocation.json => match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        Ok(response) => print_response(&response),
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

use std::future::Future;

use reqwest::Client;
use tracing::debug;

use crate::{Config, Error, Result};

/// Something that turns a URL into rendered page markup.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>>;
}

/// HTTP session shared by every page of a run.
/// Dropping it (or calling [`Session::close`]) releases the underlying client.
#[derive(Debug)]
pub struct Session {
    client: Client,
}

impl Session {
    /// Builds the client. Failing here is the one error that stops a run before it starts.
    pub fn open(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    pub fn close(self) {
        debug!("closing fetch session");
    }
}

impl Fetcher for Session {
    /// Requests a page and returns its HTML once it is known to hold at least one table.
    async fn fetch(&self, url: &str) -> Result<String> {
        let res = self.client.get(url).send().await.map_err(|e| timeout_or(e, url))?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let html = res.text().await.map_err(|e| timeout_or(e, url))?;
        let html = reveal_commented_tables(&html);
        if !html.contains("<table") {
            return Err(Error::PageNotReady { url: url.to_string() });
        }
        Ok(html)
    }
}

fn timeout_or(e: reqwest::Error, url: &str) -> Error {
    if e.is_timeout() {
        Error::FetchTimeout { url: url.to_string() }
    } else {
        Error::Reqwest(e)
    }
}

/// Report pages ship some tables inside HTML comments and un-comment them with
/// script once loaded. Lifts those tables back into the markup.
pub fn reveal_commented_tables(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find("<!--") {
        let body_start = open + "<!--".len();
        let Some(close) = rest[body_start..].find("-->") else {
            break;
        };
        let body = &rest[body_start..body_start + close];
        out.push_str(&rest[..open]);
        if body.contains("<table") {
            out.push_str(body);
        } else {
            out.push_str(&rest[open..body_start + close + "-->".len()]);
        }
        rest = &rest[body_start + close + "-->".len()..];
    }
    out.push_str(rest);
    out
}

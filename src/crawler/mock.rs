//! In-memory `PageFetcher` for unit tests

use crate::crawler::fetcher::{FetchError, FetchedPage, PageFetcher};
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Serves canned HTML keyed by absolute URL and records every request
#[derive(Debug, Default)]
pub struct PageMap {
    pages: HashMap<String, Result<String, FetchError>>,
    requests: Mutex<Vec<String>>,
}

impl PageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(html.into()));
        self
    }

    pub fn failing(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(
            url.to_string(),
            Err(FetchError::Http {
                url: url.to_string(),
                status,
            }),
        );
        self
    }

    /// Number of times `url` was requested
    pub fn hits(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|requested| requested.as_str() == url)
            .count()
    }

    pub fn total_requests(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl PageFetcher for PageMap {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url.as_str()) {
            Some(Ok(html)) => Ok(FetchedPage::new(url.clone(), html.clone())),
            Some(Err(e)) => Err(e.clone()),
            None => Err(FetchError::Http {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Listing page markup in the directory's layout
pub fn listing_html(entities: &[&str], next: Option<&str>) -> String {
    let mut html = String::from("<html><body>");
    for href in entities {
        html.push_str(&format!(
            r#"<div class="search-result"><h2 class="search-result-title"><a href="{}">link</a></h2></div>"#,
            href
        ));
    }
    if let Some(next) = next {
        html.push_str(&format!(
            r#"<ul class="pagination"><li class="next"><a href="{}">Next</a></li></ul>"#,
            next
        ));
    }
    html.push_str("</body></html>");
    html
}

/// Detail page markup with a name heading and optional telephone block
pub fn detail_html(name: &str, telephone: Option<&str>) -> String {
    let mut html = format!(
        r#"<html><body><div id="content"><header><h1>{}</h1></header>
           <div class="contact-details-block"><span>Contact details</span></div>"#,
        name
    );
    if let Some(telephone) = telephone {
        html.push_str(&format!(
            r#"<div class="contact-details-block"><span itemprop="telephone">{}</span></div>"#,
            telephone
        ));
    }
    html.push_str("</div></body></html>");
    html
}

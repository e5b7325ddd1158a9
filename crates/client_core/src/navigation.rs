//! Page location handling. The sort order lives in the `order` query parameter so a
//! restart or a shared link restores it.

use std::fmt;

use shared::domain::SortOrder;
use url::Url;

pub const DEFAULT_PAGE_LOCATION: &str = "heroes://roster/";
pub const ORDER_QUERY_PARAM: &str = "order";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl Default for PageLocation {
    fn default() -> Self {
        Self {
            url: default_url(),
        }
    }
}

impl PageLocation {
    /// Accepts a full URL or a bare query string such as `?order=dsc`.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }
        if let Some(query) = raw.strip_prefix('?') {
            let mut url = default_url();
            url.set_query((!query.is_empty()).then_some(query));
            return Ok(Self { url });
        }
        Url::parse(raw).map(|url| Self { url })
    }

    /// `asc` when the parameter is absent or holds anything unrecognised.
    pub fn sort_order(&self) -> SortOrder {
        self.url
            .query_pairs()
            .find(|(key, _)| key == ORDER_QUERY_PARAM)
            .and_then(|(_, value)| SortOrder::from_query_value(&value))
            .unwrap_or_default()
    }

    /// Replaces the first `order` parameter in place and drops any duplicates,
    /// leaving every other parameter where it was.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        let mut pairs: Vec<(String, String)> = Vec::new();
        let mut replaced = false;
        for (key, value) in self.url.query_pairs() {
            if key == ORDER_QUERY_PARAM {
                if !replaced {
                    pairs.push((key.into_owned(), order.as_query_value().to_string()));
                    replaced = true;
                }
                continue;
            }
            pairs.push((key.into_owned(), value.into_owned()));
        }
        if !replaced {
            pairs.push((
                ORDER_QUERY_PARAM.to_string(),
                order.as_query_value().to_string(),
            ));
        }

        self.url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

fn default_url() -> Url {
    Url::parse(DEFAULT_PAGE_LOCATION).expect("default page location is a valid url")
}

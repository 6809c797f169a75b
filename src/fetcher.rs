// src/fetcher.rs

use serde_json::Value;

use crate::date_range::StreamSlice;
use crate::error::Result;
use crate::session::{HttpRequest, HttpTransport};
use crate::stream::IncrementalStream;

/// Issues one request per slice and hands back the parsed records.
pub struct SliceFetcher<'a, S: IncrementalStream, T: HttpTransport> {
    stream: &'a S,
    transport: &'a T,
}

impl<'a, S: IncrementalStream, T: HttpTransport> SliceFetcher<'a, S, T> {
    pub fn new(stream: &'a S, transport: &'a T) -> Self {
        SliceFetcher { stream, transport }
    }

    pub fn build_request(&self, slice: &StreamSlice) -> HttpRequest {
        HttpRequest {
            url: format!("{}{}", self.stream.url_base(), self.stream.path(slice)),
            headers: self.stream.request_headers(slice),
            params: self.stream.request_params(slice),
        }
    }

    pub async fn fetch(&self, slice: &StreamSlice) -> Result<Vec<Value>> {
        let request = self.build_request(slice);
        tracing::debug!("Fetching {} for {}", self.stream.name(), slice.date);

        let body = self.transport.get_json(&request).await?;
        if self.stream.next_page_token(&body).is_some() {
            // no stream in this crate paginates
            tracing::warn!("Ignoring next page token for {}", slice.date);
        }
        Ok(self.stream.parse_response(body))
    }
}

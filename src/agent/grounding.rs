//! Citation extraction from grounding metadata.

use crate::genai::GroundingChunk;

use super::response::GroundingUrl;

/// Map raw grounding chunks to displayable citations.
///
/// A citation must carry a non-empty URI to be included at all; a missing or
/// empty title falls back to the strategy's placeholder.
pub(super) fn extract_citations(chunks: &[GroundingChunk], placeholder: &str) -> Vec<GroundingUrl> {
    chunks
        .iter()
        .filter_map(|chunk| {
            let web = chunk.web.as_ref()?;
            let uri = web.uri.as_deref().filter(|uri| !uri.is_empty())?;
            let title = web
                .title
                .as_deref()
                .filter(|title| !title.is_empty())
                .unwrap_or(placeholder);
            Some(GroundingUrl {
                title: title.to_string(),
                uri: uri.to_string(),
            })
        })
        .collect()
}

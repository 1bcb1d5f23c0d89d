//! Token decoding capability for renderers.
//!
//! The core never owns a tokenizer; renderers take any [`TokenDecoder`]
//! and call it per token id. A decoder that does not recognize an id
//! reports [`CanopyError::DecodeFailure`], which renderers propagate
//! instead of silently substituting text.

use crate::error::{CanopyError, Result};
use crate::tree::TokenId;

/// Maps a single token id to its display text.
pub trait TokenDecoder {
    /// Decode one token id.
    ///
    /// May be called many times for the same id; implementations are
    /// free to cache. Fails with [`CanopyError::DecodeFailure`] for ids
    /// outside the vocabulary.
    fn decode_token(&self, token_id: TokenId) -> Result<String>;
}

/// Any `Fn(TokenId) -> Option<String>` works as a decoder; `None`
/// becomes a decode failure.
impl<F> TokenDecoder for F
where
    F: Fn(TokenId) -> Option<String>,
{
    fn decode_token(&self, token_id: TokenId) -> Result<String> {
        self(token_id).ok_or(CanopyError::DecodeFailure { token_id })
    }
}

/// HuggingFace tokenizer integration.
#[cfg(feature = "hf-tokenizers")]
impl TokenDecoder for tokenizers::Tokenizer {
    fn decode_token(&self, token_id: TokenId) -> Result<String> {
        self.decode(&[token_id], false)
            .map_err(|_| CanopyError::DecodeFailure { token_id })
    }
}

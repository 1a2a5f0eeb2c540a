//! Token usage types.

use serde::{Deserialize, Serialize};

/// Token usage for one or more model calls.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_tokens: Option<u32>,
}

impl Usage {
    /// Merge another usage into this one (accumulate).
    pub fn merge(&mut self, other: &Usage) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
        if let Some(v) = other.cached_tokens {
            let cached = self.cached_tokens.get_or_insert(0);
            *cached = cached.saturating_add(v);
        }
        if let Some(v) = other.reasoning_tokens {
            let reasoning = self.reasoning_tokens.get_or_insert(0);
            *reasoning = reasoning.saturating_add(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_accumulates_and_keeps_optional_counters() {
        let mut total = Usage {
            input_tokens: 10,
            output_tokens: 5,
            total_tokens: 15,
            ..Default::default()
        };
        total.merge(&Usage {
            input_tokens: 3,
            output_tokens: 2,
            total_tokens: 5,
            cached_tokens: Some(1),
            reasoning_tokens: None,
        });

        assert_eq!(total.input_tokens, 13);
        assert_eq!(total.output_tokens, 7);
        assert_eq!(total.total_tokens, 20);
        assert_eq!(total.cached_tokens, Some(1));
        assert_eq!(total.reasoning_tokens, None);
    }

    #[test]
    fn merge_saturates_instead_of_overflowing() {
        let mut total = Usage {
            input_tokens: u32::MAX,
            total_tokens: u32::MAX,
            cached_tokens: Some(u32::MAX),
            ..Default::default()
        };
        total.merge(&Usage {
            input_tokens: 1,
            output_tokens: 1,
            total_tokens: 2,
            cached_tokens: Some(1),
            reasoning_tokens: None,
        });

        assert_eq!(total.input_tokens, u32::MAX);
        assert_eq!(total.output_tokens, 1);
        assert_eq!(total.total_tokens, u32::MAX);
        assert_eq!(total.cached_tokens, Some(u32::MAX));
    }
}

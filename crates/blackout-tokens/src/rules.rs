//! Rule-based tokenizer
//!
//! Splits on whitespace, then peels leading and trailing punctuation off each chunk
//! as single-character tokens. Inner punctuation stays attached, so emails, dates
//! and hyphenated identifiers remain one token.

use crate::{Token, Tokenizer};

const PREFIXES: &[char] = &['"', '\'', '(', '[', '{', '<', '*', '$', '#', '¿', '¡', '“', '‘'];
const SUFFIXES: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '\'', ')', ']', '}', '>', '%', '*', '”', '’', '…',
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTokenizer;

impl RuleTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn split_chunk(&self, text: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
        let mut lo = start;
        let mut hi = end;

        while let Some(c) = text[lo..hi].chars().next() {
            if hi - lo <= c.len_utf8() || !PREFIXES.contains(&c) {
                break;
            }
            tokens.push(Token::new(lo, lo + c.len_utf8()));
            lo += c.len_utf8();
        }

        let mut suffixes = Vec::new();
        while let Some(c) = text[lo..hi].chars().next_back() {
            if hi - lo <= c.len_utf8() || !SUFFIXES.contains(&c) {
                break;
            }
            hi -= c.len_utf8();
            suffixes.push(Token::new(hi, hi + c.len_utf8()));
        }

        if lo < hi {
            tokens.push(Token::new(lo, hi));
        }
        tokens.extend(suffixes.into_iter().rev());
    }
}

impl Tokenizer for RuleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut chunk_start = None;

        for (i, c) in text.char_indices() {
            if c.is_whitespace() {
                if let Some(start) = chunk_start.take() {
                    self.split_chunk(text, start, i, &mut tokens);
                }
            } else if chunk_start.is_none() {
                chunk_start = Some(i);
            }
        }
        if let Some(start) = chunk_start {
            self.split_chunk(text, start, text.len(), &mut tokens);
        }

        tokens
    }
}

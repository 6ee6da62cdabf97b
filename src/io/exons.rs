//!
//! Exon annotation of the reference sequence
//!
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

///
/// Exon on the gap-free reference sequence, 0-based with an inclusive `end`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Exon {
    pub start: usize,
    pub end: usize,
}

impl Exon {
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }
}

///
/// Parse whitespace-separated 1-based inclusive `start end` pairs.
///
/// Exons are returned sorted by start.
///
pub fn parse_exons(text: &str) -> Result<Vec<Exon>> {
    let mut values: Vec<(usize, usize)> = Vec::new();
    for (i, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            let value: usize = token.parse().map_err(|_| Error::Parse {
                line: i + 1,
                reason: format!("invalid exon coordinate `{}`", token),
            })?;
            if value == 0 {
                return Err(Error::Parse {
                    line: i + 1,
                    reason: "exon coordinates are 1-based".to_string(),
                });
            }
            values.push((i + 1, value - 1));
        }
    }
    if values.len() % 2 != 0 {
        let line = values.last().map(|&(line, _)| line).unwrap_or(0);
        return Err(Error::Parse {
            line,
            reason: "exon start without an end".to_string(),
        });
    }
    let mut exons = values
        .chunks(2)
        .map(|pair| {
            let (line, start) = pair[0];
            let (_, end) = pair[1];
            if start > end {
                Err(Error::Parse {
                    line,
                    reason: format!("exon start {} after its end {}", start + 1, end + 1),
                })
            } else {
                Ok(Exon { start, end })
            }
        })
        .collect::<Result<Vec<Exon>>>()?;
    exons.sort();
    Ok(exons)
}

pub fn read_exons<P: AsRef<Path>>(path: P) -> Result<Vec<Exon>> {
    let text = std::fs::read_to_string(path)?;
    parse_exons(&text)
}

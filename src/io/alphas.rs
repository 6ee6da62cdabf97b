//!
//! Discretized best alphas, one grid index per line
//!
use crate::error::{Error, Result};
use crate::likelihood::N_ALPHAS;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub fn write_alphas<W: Write>(mut writer: W, alphas: &[usize]) -> Result<()> {
    for alpha in alphas {
        writeln!(writer, "{}", alpha)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn parse_alphas<R: BufRead>(reader: R) -> Result<Vec<usize>> {
    let mut alphas = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        for token in line.split_whitespace() {
            let alpha: usize = token.parse().map_err(|_| Error::Parse {
                line: i + 1,
                reason: format!("invalid alpha index `{}`", token),
            })?;
            if alpha >= N_ALPHAS {
                return Err(Error::Parse {
                    line: i + 1,
                    reason: format!("alpha index {} is not below {}", alpha, N_ALPHAS),
                });
            }
            alphas.push(alpha);
        }
    }
    Ok(alphas)
}

///
/// Save alpha indices so that a later run can skip the grid search.
///
pub fn save_alphas<P: AsRef<Path>>(path: P, alphas: &[usize]) -> Result<()> {
    write_alphas(BufWriter::new(File::create(path)?), alphas)
}

pub fn read_alphas<P: AsRef<Path>>(path: P) -> Result<Vec<usize>> {
    parse_alphas(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let alphas = vec![0, 3, 20, 20, 7];
        let file = tempfile::NamedTempFile::new().unwrap();
        save_alphas(file.path(), &alphas).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "0\n3\n20\n20\n7\n");
        assert_eq!(read_alphas(file.path()).unwrap(), alphas);
    }

    #[test]
    fn out_of_grid() {
        assert!(matches!(
            parse_alphas(&b"1\n2\n21\n"[..]),
            Err(Error::Parse { line: 3, .. })
        ));
        assert!(parse_alphas(&b"1\n-1\n"[..]).is_err());
    }
}

//!
//! Tree edge lists: one `name parent branch_length` line per non-root node
//!
use crate::error::{Error, Result};
use crate::tree::{PhylogeneticTree, TreeRecord};
use std::path::Path;

///
/// Parse an edge list. Lines may come in any order; blank lines and
/// lines starting with `#` are skipped.
///
pub fn parse_edge_list(text: &str) -> Result<Vec<TreeRecord>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| parse_record(i + 1, line))
        .collect()
}

fn parse_record(line_no: usize, line: &str) -> Result<TreeRecord> {
    let parse_error = |reason: String| Error::Parse {
        line: line_no,
        reason,
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [name, parent, branch_length] => {
            let branch_length: f64 = branch_length.parse().map_err(|_| {
                parse_error(format!("invalid branch length `{}`", branch_length))
            })?;
            Ok(TreeRecord::new(*name, *parent, branch_length))
        }
        _ => Err(parse_error(format!(
            "expected `name parent branch_length`, found {} fields",
            fields.len()
        ))),
    }
}

///
/// Read the records of an edge list file.
///
pub fn read_edge_list<P: AsRef<Path>>(path: P) -> Result<Vec<TreeRecord>> {
    let text = std::fs::read_to_string(path)?;
    parse_edge_list(&text)
}

///
/// Read an edge list file and build the tree rooted at `root`.
///
pub fn read_tree<P: AsRef<Path>>(path: P, root: &str) -> Result<PhylogeneticTree> {
    let records = read_edge_list(path)?;
    PhylogeneticTree::from_records_with_root(&records, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse() {
        let text = "# primates\nHuman HC 0.1\n\nChimp  HC\t0.2\nHC Root 1e-1\n";
        let records = parse_edge_list(text).unwrap();
        assert_eq!(
            records,
            vec![
                TreeRecord::new("Human", "HC", 0.1),
                TreeRecord::new("Chimp", "HC", 0.2),
                TreeRecord::new("HC", "Root", 0.1),
            ]
        );
    }

    #[test]
    fn parse_errors_report_line() {
        let r = parse_edge_list("A Root 0.1\nB Root\n");
        assert!(matches!(r, Err(Error::Parse { line: 2, .. })));
        let r = parse_edge_list("A Root 0.1\n\nB Root x\n");
        assert!(matches!(r, Err(Error::Parse { line: 3, .. })));
    }

    #[test]
    fn read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "A AB 0.5\nC Top 1.0\nB AB 0.5\nAB Top 0.5\n").unwrap();
        let tree = read_tree(file.path(), "Top").unwrap();
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.n_leaves(), 3);
        assert_eq!(tree.root().name(), "Top");
        assert!(read_tree(file.path(), "Root").is_err());
    }
}

//! Static name corpora used across harnesses.
//!
//! Lines follow the input format: tab-separated, field 1 is the display name.

use std::path::{Path, PathBuf};

/// A small, well-formed sample in the shape of a name listing export.
pub const CORPUS_ACTORS: &[&str] = &[
    "nm0000001\tFred Astaire\t1899\t1987\tactor,miscellaneous,producer",
    "nm0000002\tLauren Bacall\t1924\t2014\tactress,soundtrack",
    "nm0000003\tBrigitte Bardot\t1934\t\\N\tactress,music_department,producer",
    "nm0000004\tJohn Belushi\t1949\t1982\tactor,writer,music_department",
    "nm0000005\tIngmar Bergman\t1918\t2007\twriter,director,actor",
    "nm0000006\tIngrid Bergman\t1915\t1982\tactress,producer,soundtrack",
    "nm0000007\tHumphrey Bogart\t1899\t1957\tactor,producer,miscellaneous",
    "nm0000008\tMarlon Brando\t1924\t2004\tactor,director,writer",
];

/// Blank lines and malformed lines interleaved with good ones.
/// Good names, in order: Ada, Grace, Barbara, Margaret.
pub const CORPUS_DIRTY: &[&str] = &[
    "1\tAda",
    "",
    "no tab on this line",
    "2\tGrace",
    "   ",
    "\t",
    "3\tBarbara",
    "garbage",
    "4\tMargaret",
    "",
];

pub const CORPUS_DIRTY_NAMES: &[&str] = &["Ada", "Grace", "Barbara", "Margaret"];

/// Generate `n` synthetic well-formed lines (`nm<i>\tActor <i>`).
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("nm{i:07}\tActor {i}\t19{:02}", i % 100)).collect()
}

/// Write `lines` joined by `\n` to `<dir>/<name>.tsv` and return the path.
pub fn write_resource<S: AsRef<str>>(dir: &Path, name: &str, lines: &[S]) -> PathBuf {
    let path = dir.join(format!("{name}.tsv"));
    let text = lines.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
    std::fs::write(&path, text).expect("write fixture resource");
    path
}
